//! Error types surfaced by the recommendation engine.

use catalog::CatalogError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a recommendation request failed.
///
/// An empty enrollment history is not an error: it routes to the
/// cold-start ranking instead.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The request was rejected before touching the store
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A store query failed; the original error is kept as the source
    #[error("recommendation unavailable: {0}")]
    Repository(#[from] CatalogError),

    /// The caller-supplied deadline passed before the request finished
    #[error("recommendation unavailable: timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors while loading an `EngineConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
