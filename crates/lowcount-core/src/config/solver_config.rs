//! Quantile solver configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CACHE_CAPACITY;

/// Settings for the optional quantile memoization layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum cached quantiles. Default: 10,000.
    pub cache_capacity: Option<u64>,
}

impl SolverConfig {
    /// Returns the effective cache capacity, defaulting to 10,000.
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }
}
