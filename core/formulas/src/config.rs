//! FILENAME: core/formulas/src/config.rs
//! PURPOSE: Tunables for compiling and displaying formulas.
//! CONTEXT: The host passes one EngineConfig into every compile/preview call.
//! Partial JSON is accepted; missing fields keep their defaults.

use parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TREE_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_depth must be at least 1")]
    InvalidMaxDepth,

    #[error("max_tree_depth must be at least 1")]
    InvalidMaxTreeDepth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest parser recursion: parentheses, negations and exponents.
    pub max_depth: usize,
    /// Deepest expression tree the parser will build, long operator chains included.
    pub max_tree_depth: usize,
    /// Decimal places used when a result is shown to the user.
    pub display_precision: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            display_precision: 2,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }
        if self.max_tree_depth == 0 {
            return Err(ConfigError::InvalidMaxTreeDepth);
        }
        Ok(())
    }
}
