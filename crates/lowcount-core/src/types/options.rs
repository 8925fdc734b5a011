//! Options for the significance and posterior operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Options for a significance computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceOptions {
    /// Fractional systematic uncertainty on the background (0 = none).
    pub systematic: f64,
    /// Report deficits as negative significances instead of 0.
    pub signed: bool,
}

impl SignificanceOptions {
    pub fn with_systematic(systematic: f64) -> Self {
        Self {
            systematic,
            ..Self::default()
        }
    }

    pub fn signed() -> Self {
        Self {
            signed: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(self.systematic >= 0.0 && self.systematic.is_finite()) {
            return Err(DomainError::NegativeSystematic {
                value: self.systematic,
            });
        }
        Ok(())
    }
}

/// Prior placed on a Poisson expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePrior {
    /// Improper flat prior: posterior Gamma(k + 1).
    #[default]
    Uniform,
    /// Jeffreys prior λ^(-1/2): posterior Gamma(k + 1/2).
    Jeffreys,
}

impl RatePrior {
    /// Amount added to the observed count to get the posterior Gamma shape.
    pub fn shape_offset(&self) -> f64 {
        match self {
            Self::Uniform => 1.0,
            Self::Jeffreys => 0.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Jeffreys => "jeffreys",
        }
    }
}

impl fmt::Display for RatePrior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens to posterior mass that a known-background shift pushes
/// below a zero signal rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalBoundary {
    /// Keep it as a point mass at zero.
    #[default]
    PointMass,
    /// Condition on a non-negative signal and renormalize.
    Renormalize,
}

impl SignalBoundary {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointMass => "point_mass",
            Self::Renormalize => "renormalize",
        }
    }
}

impl fmt::Display for SignalBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for a posterior construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosteriorOptions {
    /// Exposure converting expected counts to a rate.
    pub exposure: f64,
    pub prior: RatePrior,
    pub boundary: SignalBoundary,
}

impl Default for PosteriorOptions {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            prior: RatePrior::default(),
            boundary: SignalBoundary::default(),
        }
    }
}

impl PosteriorOptions {
    pub fn with_exposure(exposure: f64) -> Self {
        Self {
            exposure,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(self.exposure > 0.0 && self.exposure.is_finite()) {
            return Err(DomainError::NonPositiveExposure {
                value: self.exposure,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significance_options_validate() {
        assert!(SignificanceOptions::default().validate().is_ok());
        assert!(SignificanceOptions::with_systematic(0.1).validate().is_ok());
        assert!(SignificanceOptions::with_systematic(-0.1).validate().is_err());
        assert!(SignificanceOptions::with_systematic(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_prior_shape_offset() {
        assert_eq!(RatePrior::Uniform.shape_offset(), 1.0);
        assert_eq!(RatePrior::Jeffreys.shape_offset(), 0.5);
    }

    #[test]
    fn test_posterior_options_validate() {
        assert!(PosteriorOptions::default().validate().is_ok());
        assert!(PosteriorOptions::with_exposure(0.0).validate().is_err());
    }
}
