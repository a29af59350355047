//! Pipeline for filtering, scoring and ranking course candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Scorer for the composite tag / category / popularity score
//! - Top-K selection with a deterministic tie-break
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove candidates that must never be recommended
//! 2. Scorer computes a score for every remaining candidate
//! 3. The selector keeps the best `limit` of them
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{select_top, FilterPipeline, Scorer, ScoringWeights};
//! use pipeline::filters::AlreadyEnrolledFilter;
//!
//! let pipeline = FilterPipeline::new().add_filter(AlreadyEnrolledFilter);
//! let candidates = pipeline.apply(candidates, &context);
//!
//! let scorer = Scorer::new(ScoringWeights::default());
//! let scored = scorer.score_candidates(&candidates, &context.profile, &popularity);
//! let top = select_top(scored, 10);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod scorer;
pub mod selector;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use scorer::{CandidateFeatures, InvalidWeight, ScoredCandidate, Scorer, ScoringWeights};
pub use selector::select_top;
