//! Analysis configuration, loaded from the `[literals]` and `[analysis]`
//! tables of a TOML document.
//!
//! The clone thresholds belong to the runtime's object-construction fast
//! path; they are injected here rather than compiled in so the analysis can
//! be exercised without the runtime.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Literal shape and boilerplate policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralPolicy {
    /// Largest object literal (in static properties) the shallow-clone fast path copies
    pub max_cloned_shallow_object_properties: usize,
    /// Largest array literal (in elements) the shallow-clone fast path copies
    pub max_cloned_shallow_array_elements: usize,
    /// Object literals whose largest index key is at most this prefer dense elements
    pub dense_element_index_limit: u32,
    /// Object literals with `ratio * elements >= max_index` prefer dense elements
    pub dense_element_ratio: u32,
    /// Upper bound on any single boilerplate table (default: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_table_length: Option<usize>,
}

impl LiteralPolicy {
    /// Create a policy with the runtime's default thresholds
    pub fn new() -> Self {
        LiteralPolicy {
            max_cloned_shallow_object_properties: 6,
            max_cloned_shallow_array_elements: 100,
            dense_element_index_limit: 32,
            dense_element_ratio: 2,
            max_table_length: None,
        }
    }

    /// Density heuristic: prefer a dense elements store over a dictionary
    /// when the index keys are small or not too sparse.
    pub fn prefers_dense_elements(&self, elements: u32, max_element_index: u32) -> bool {
        max_element_index <= self.dense_element_index_limit
            || u64::from(self.dense_element_ratio) * u64::from(elements)
                >= u64::from(max_element_index)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dense_element_ratio == 0 {
            return Err(ConfigError::Invalid(
                "dense_element_ratio must be at least 1".to_string(),
            ));
        }
        if self.max_table_length == Some(0) {
            return Err(ConfigError::Invalid(
                "max_table_length must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LiteralPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Full configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Literal policy (`[literals]`)
    #[serde(default, rename = "literals")]
    pub policy: LiteralPolicy,

    /// Worker settings (`[analysis]`)
    #[serde(default)]
    pub analysis: WorkerConfig,
}

/// Worker pool settings for program-level preparation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads (default: number of CPUs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl AnalysisConfig {
    /// Parse a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a config from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        if self.analysis.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Effective number of worker threads
    pub fn worker_count(&self) -> usize {
        self.analysis.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}
