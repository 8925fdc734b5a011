//! Significance configuration.

use serde::{Deserialize, Serialize};

use crate::types::SignificanceOptions;

/// Defaults for significance computations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignificanceConfig {
    /// Fractional systematic uncertainty on the background. Default: 0.0.
    pub systematic: Option<f64>,
    /// Report deficits as negative values. Default: false.
    pub signed: Option<bool>,
}

impl SignificanceConfig {
    /// Returns the effective systematic fraction, defaulting to 0.0.
    pub fn effective_systematic(&self) -> f64 {
        self.systematic.unwrap_or(0.0)
    }

    /// Returns the effective signed flag, defaulting to false.
    pub fn effective_signed(&self) -> bool {
        self.signed.unwrap_or(false)
    }

    pub fn options(&self) -> SignificanceOptions {
        SignificanceOptions {
            systematic: self.effective_systematic(),
            signed: self.effective_signed(),
        }
    }
}
