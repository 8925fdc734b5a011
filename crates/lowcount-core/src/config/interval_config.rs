//! Interval configuration.

use serde::{Deserialize, Serialize};

use crate::constants::ONE_SIGMA;
use crate::errors::DomainResult;
use crate::types::{ConfidenceLevel, Sidedness};

/// Defaults for rate and fraction intervals.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IntervalConfig {
    /// Coverage probability. Default: 0.6827 (1σ).
    pub confidence: Option<f64>,
    /// Coverage expressed in sigma; takes precedence over `confidence`.
    pub sigma: Option<f64>,
    /// Two-sided interval or one-sided upper limit. Default: two-sided.
    pub sidedness: Option<Sidedness>,
}

impl IntervalConfig {
    /// Returns the effective sidedness, defaulting to two-sided.
    pub fn effective_sidedness(&self) -> Sidedness {
        self.sidedness.unwrap_or_default()
    }

    /// Builds the configured confidence level.
    pub fn confidence_level(&self) -> DomainResult<ConfidenceLevel> {
        let sidedness = self.effective_sidedness();
        match self.sigma {
            Some(sigma) => ConfidenceLevel::from_sigma(sigma, sidedness),
            None => {
                ConfidenceLevel::with_sidedness(self.confidence.unwrap_or(ONE_SIGMA), sidedness)
            }
        }
    }
}
