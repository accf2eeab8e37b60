use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loader::LoadError;
use crate::similarity::{SimilarityWeights, DEFAULT_TOP_N};

/// Engine configuration.
///
/// Every field has a default, so a missing or partial file still yields a
/// working engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-signal weights for the combined similarity score.
    #[serde(default)]
    pub weights: SimilarityWeights,

    /// Recommendations returned when the caller does not pass a count.
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl EngineConfig {
    fn validate(&mut self) {
        if self.default_top_n == 0 {
            log::warn!("default_top_n must be at least 1, falling back to {DEFAULT_TOP_N}");
            self.default_top_n = DEFAULT_TOP_N;
        }

        if !self.weights.is_finite() {
            log::warn!(
                "non-finite similarity weights {:?}, falling back to defaults",
                self.weights
            );
            self.weights = SimilarityWeights::default();
        }
    }

    /// Read the config from a YAML file.
    ///
    /// Creates a file with the defaults when none exists, so a data
    /// directory is self-describing after the first load.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            let config = Self::default();
            std::fs::write(path, serde_yml::to_string(&config)?)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&raw)?;
        config.validate();
        Ok(config)
    }
}
