//! Gamma posterior on a rate.

use statrs::distribution::{Continuous, ContinuousCDF, Gamma};

use lowcount_core::{DomainError, DomainResult};

use super::{check_probability, RateDistribution};
use crate::quantile::{gamma_quantile, gamma_upper_quantile};

/// Gamma(shape, rate) over a non-negative rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaPosterior {
    shape: f64,
    rate: f64,
    dist: Gamma,
}

impl GammaPosterior {
    pub fn new(shape: f64, rate: f64) -> DomainResult<Self> {
        if !(shape > 0.0 && shape.is_finite()) {
            return Err(DomainError::InvalidParameter {
                name: "shape",
                value: shape,
            });
        }
        let dist = Gamma::new(shape, rate).map_err(|_| DomainError::InvalidParameter {
            name: "rate",
            value: rate,
        })?;
        Ok(Self { shape, rate, dist })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `P(S > x)`, computed directly so far-tail values keep precision.
    pub fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            self.dist.sf(x)
        }
    }

    /// `x` with `P(S > x) = q`.
    pub fn upper_quantile(&self, q: f64) -> DomainResult<f64> {
        gamma_upper_quantile(q, self.shape, self.rate)
    }
}

impl RateDistribution for GammaPosterior {
    fn pdf(&self, rate: f64) -> f64 {
        if rate < 0.0 {
            0.0
        } else {
            self.dist.pdf(rate)
        }
    }

    fn cdf(&self, rate: f64) -> f64 {
        if rate <= 0.0 {
            0.0
        } else {
            self.dist.cdf(rate)
        }
    }

    fn quantile(&self, p: f64) -> DomainResult<f64> {
        check_probability(p)?;
        gamma_quantile(p, self.shape, self.rate)
    }

    fn mean(&self) -> f64 {
        self.shape / self.rate
    }
}
