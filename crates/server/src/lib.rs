//! Server crate for the course recommendation engine.
//!
//! This crate contains the engine that coordinates the sources and pipeline
//! crates into a single recommendation request, plus its configuration.

pub mod config;
pub mod engine;
pub mod error;
pub mod recommendation;

pub use config::EngineConfig;
pub use engine::{RecommendRequest, RecommendationEngine, DEFAULT_LIMIT};
pub use error::{ConfigError, RecommendError};
pub use recommendation::{
    ContentRecommendation, PopularityRecommendation, RecommendationEntry, Recommendations,
};
