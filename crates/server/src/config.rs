//! Engine configuration loaded from a TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! data_dir = "data/eduhub"
//! default_limit = 10
//! timeout_ms = 5000
//! category_match = "case_insensitive"
//! max_candidates = 50000
//!
//! [weights]
//! tag = 3.0
//! category = 2.0
//! popularity = 0.5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use pipeline::ScoringWeights;
use sources::{CandidateGenerator, CategoryMatch};

use crate::engine::{RecommendRequest, DEFAULT_LIMIT};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory holding `courses.jsonl` and `enrollments.jsonl`
    pub data_dir: PathBuf,
    pub default_limit: usize,
    /// Whole-request deadline
    pub timeout_ms: u64,
    pub category_match: CategoryMatch,
    /// Cap on candidates considered per request; unlimited when absent
    pub max_candidates: Option<usize>,
    pub weights: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/eduhub"),
            default_limit: DEFAULT_LIMIT,
            timeout_ms: 5_000,
            category_match: CategoryMatch::default(),
            max_candidates: None,
            weights: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".to_string()));
        }
        if self.max_candidates == Some(0) {
            return Err(ConfigError::Invalid(
                "max_candidates must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Request carrying the configured defaults
    pub fn request(&self) -> RecommendRequest {
        RecommendRequest::new(self.default_limit)
            .with_weights(self.weights)
            .with_category_match(self.category_match)
    }

    pub fn candidate_generator(&self) -> CandidateGenerator {
        match self.max_candidates {
            Some(max) => CandidateGenerator::new().with_max_candidates(max),
            None => CandidateGenerator::new(),
        }
    }
}
