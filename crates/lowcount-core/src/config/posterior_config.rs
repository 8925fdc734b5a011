//! Posterior configuration.

use serde::{Deserialize, Serialize};

use crate::types::{PosteriorOptions, RatePrior, SignalBoundary};

/// Defaults for posterior construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PosteriorConfig {
    /// Exposure converting counts to a rate. Default: 1.0.
    pub exposure: Option<f64>,
    /// Prior on Poisson expectations. Default: uniform.
    pub prior: Option<RatePrior>,
    /// Treatment of mass below zero signal. Default: point mass.
    pub boundary: Option<SignalBoundary>,
}

impl PosteriorConfig {
    /// Returns the effective exposure, defaulting to 1.0.
    pub fn effective_exposure(&self) -> f64 {
        self.exposure.unwrap_or(1.0)
    }

    pub fn options(&self) -> PosteriorOptions {
        PosteriorOptions {
            exposure: self.effective_exposure(),
            prior: self.prior.unwrap_or_default(),
            boundary: self.boundary.unwrap_or_default(),
        }
    }
}
