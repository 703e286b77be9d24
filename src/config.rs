//! Index configuration.
//!
//! Configuration is plain serializable data so it can be embedded in a host
//! application's own settings file.
//!
//! ```rust
//! use linquad::{IndexConfig, QueryStrategy};
//!
//! let json = r#"{
//!     "split_threshold": 5,
//!     "default_strategy": "brute_force"
//! }"#;
//! let config = IndexConfig::from_json_str(json)?;
//! assert_eq!(config.split_threshold, 5);
//! assert_eq!(config.default_strategy, QueryStrategy::BruteForce);
//! # Ok::<(), linquad::IndexError>(())
//! ```

use crate::error::{IndexError, Result};
use crate::query::DEFAULT_SPLIT_THRESHOLD;
use serde::{Deserialize, Serialize};

/// How [`crate::LinearQuadtree::query`] walks the key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    /// Test every key between the sector's corner codes.
    BruteForce,
    /// Split the key range at BIGMIN/LITMAX before collecting.
    #[default]
    RangeSubdivision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Out-of-box keys tolerated in a range before it is split (default: 3).
    ///
    /// Lower values split more eagerly; higher values leave more false
    /// positives for the final filter. Results are the same either way.
    #[serde(default = "IndexConfig::default_split_threshold")]
    pub split_threshold: usize,

    #[serde(default)]
    pub default_strategy: QueryStrategy,

    /// Number of items to reserve space for up front.
    #[serde(default)]
    pub initial_capacity: usize,
}

impl IndexConfig {
    const fn default_split_threshold() -> usize {
        DEFAULT_SPLIT_THRESHOLD
    }

    pub fn with_split_threshold(mut self, threshold: usize) -> Self {
        self.split_threshold = threshold;
        self
    }

    pub fn with_default_strategy(mut self, strategy: QueryStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.split_threshold == 0 {
            return Err(IndexError::InvalidConfig(
                "Split threshold must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a TOML configuration.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            split_threshold: Self::default_split_threshold(),
            default_strategy: QueryStrategy::default(),
            initial_capacity: 0,
        }
    }
}
