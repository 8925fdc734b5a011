//! Confidence levels, expressed either as a coverage probability or in sigma.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};
use statrs::function::erf::{erf, erf_inv};

use super::sigma::{pvalue_from_significance, significance_from_pvalue};
use crate::constants::{ONE_SIGMA, THREE_SIGMA, TWO_SIGMA};
use crate::errors::{DomainError, DomainResult};

/// Whether a confidence level covers both tails or only the upper one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sidedness {
    /// Central interval: equal probability in each excluded tail.
    #[default]
    TwoSided,
    /// Upper limit: the lower bound is pinned at zero.
    OneSided,
}

impl Sidedness {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoSided => "two_sided",
            Self::OneSided => "one_sided",
        }
    }
}

/// A coverage probability in (0, 1) together with its sidedness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceLevel {
    probability: f64,
    sidedness: Sidedness,
}

impl ConfidenceLevel {
    /// Two-sided confidence level with coverage `probability`.
    pub fn new(probability: f64) -> DomainResult<Self> {
        Self::with_sidedness(probability, Sidedness::TwoSided)
    }

    /// One-sided (upper limit) confidence level with coverage `probability`.
    pub fn one_sided(probability: f64) -> DomainResult<Self> {
        Self::with_sidedness(probability, Sidedness::OneSided)
    }

    pub fn with_sidedness(probability: f64, sidedness: Sidedness) -> DomainResult<Self> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(DomainError::InvalidConfidence { value: probability });
        }
        Ok(Self {
            probability,
            sidedness,
        })
    }

    /// Confidence level equivalent to `sigma` standard deviations.
    ///
    /// Two-sided: P(|Z| < σ). One-sided: P(Z < σ).
    pub fn from_sigma(sigma: f64, sidedness: Sidedness) -> DomainResult<Self> {
        if !sigma.is_finite() {
            return Err(DomainError::InvalidConfidence { value: sigma });
        }
        let probability = match sidedness {
            Sidedness::TwoSided => erf(sigma / SQRT_2),
            Sidedness::OneSided => 1.0 - pvalue_from_significance(sigma),
        };
        Self::with_sidedness(probability, sidedness)
    }

    /// ±1σ two-sided.
    pub fn one_sigma() -> Self {
        Self {
            probability: ONE_SIGMA,
            sidedness: Sidedness::TwoSided,
        }
    }

    /// ±2σ two-sided.
    pub fn two_sigma() -> Self {
        Self {
            probability: TWO_SIGMA,
            sidedness: Sidedness::TwoSided,
        }
    }

    /// ±3σ two-sided.
    pub fn three_sigma() -> Self {
        Self {
            probability: THREE_SIGMA,
            sidedness: Sidedness::TwoSided,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn sidedness(&self) -> Sidedness {
        self.sidedness
    }

    /// The sigma equivalent of this level, inverse of [`Self::from_sigma`].
    pub fn sigma(&self) -> f64 {
        match self.sidedness {
            Sidedness::TwoSided => SQRT_2 * erf_inv(self.probability),
            // 1 - probability is at least f64::EPSILON / 2 here.
            Sidedness::OneSided => {
                significance_from_pvalue(1.0 - self.probability).unwrap_or(f64::INFINITY)
            }
        }
    }

    /// Cumulative probabilities `(lo, hi)` at which the interval bounds sit.
    ///
    /// Two-sided: `((1-CL)/2, 1-(1-CL)/2)`. One-sided: `(0, CL)`, where a
    /// lower tail of zero means the lower bound is zero.
    pub fn tail_probabilities(&self) -> (f64, f64) {
        match self.sidedness {
            Sidedness::TwoSided => {
                let tail = (1.0 - self.probability) / 2.0;
                (tail, 1.0 - tail)
            }
            Sidedness::OneSided => (0.0, self.probability),
        }
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::one_sigma()
    }
}
