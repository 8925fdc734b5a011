//! Posterior distributions over the true signal rate.
//!
//! - Zero known background: a plain Gamma posterior.
//! - Known background B > 0: the total-rate Gamma shifted down by B, with the
//!   mass below zero either kept as an atom at 0 or renormalized away.
//! - Off-region background: the exact marginal over the unknown background,
//!   a finite mixture of Gamma components.

pub mod gamma;
pub mod mixture;
pub mod shifted;

pub use gamma::GammaPosterior;
pub use mixture::{Component, MixturePosterior};
pub use shifted::ShiftedGammaPosterior;

use serde::Serialize;

use lowcount_core::{
    BackgroundSpec, ConfidenceLevel, DomainResult, Interval, PosteriorOptions,
};

/// A distribution over a non-negative signal rate.
///
/// `pdf` is the density of the continuous part; any atom at zero is reported
/// by `zero_mass` and included in `cdf`.
pub trait RateDistribution {
    fn pdf(&self, rate: f64) -> f64;

    /// `P(S ≤ rate)`.
    fn cdf(&self, rate: f64) -> f64;

    /// Smallest rate whose CDF reaches `p`.
    fn quantile(&self, p: f64) -> DomainResult<f64>;

    fn mean(&self) -> f64;

    /// Probability that the signal rate is exactly zero.
    fn zero_mass(&self) -> f64 {
        0.0
    }

    /// Equal-tailed (or one-sided upper) credible interval with the median
    /// as estimate.
    fn credible_interval(&self, confidence: ConfidenceLevel) -> DomainResult<Interval> {
        let (lo_tail, hi_tail) = confidence.tail_probabilities();
        let lower = if lo_tail == 0.0 {
            0.0
        } else {
            self.quantile(lo_tail)?
        };
        Ok(Interval::new(lower, self.quantile(hi_tail)?, self.quantile(0.5)?))
    }
}

/// Point summary of a posterior, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorSummary {
    pub kind: &'static str,
    pub mean: f64,
    pub zero_mass: f64,
    pub interval: Interval,
}

/// Posterior over the signal rate, by background model.
#[derive(Debug, Clone)]
pub enum Posterior {
    Gamma(GammaPosterior),
    Shifted(ShiftedGammaPosterior),
    Mixture(MixturePosterior),
}

impl Posterior {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gamma(_) => "gamma",
            Self::Shifted(_) => "shifted_gamma",
            Self::Mixture(_) => "mixture",
        }
    }

    pub fn summary(&self, confidence: ConfidenceLevel) -> DomainResult<PosteriorSummary> {
        Ok(PosteriorSummary {
            kind: self.kind(),
            mean: self.mean(),
            zero_mass: self.zero_mass(),
            interval: self.credible_interval(confidence)?,
        })
    }

    fn inner(&self) -> &dyn RateDistribution {
        match self {
            Self::Gamma(g) => g,
            Self::Shifted(s) => s,
            Self::Mixture(m) => m,
        }
    }
}

impl RateDistribution for Posterior {
    fn pdf(&self, rate: f64) -> f64 {
        self.inner().pdf(rate)
    }

    fn cdf(&self, rate: f64) -> f64 {
        self.inner().cdf(rate)
    }

    fn quantile(&self, p: f64) -> DomainResult<f64> {
        self.inner().quantile(p)
    }

    fn mean(&self) -> f64 {
        self.inner().mean()
    }

    fn zero_mass(&self) -> f64 {
        self.inner().zero_mass()
    }
}

/// Posterior over the signal rate given `k` on-region counts.
///
/// The rate is per unit `options.exposure`. `options.prior` is the prior on
/// the signal and, for an off-region background, on the background too.
pub fn posterior(
    k: u64,
    background: &BackgroundSpec,
    options: &PosteriorOptions,
) -> DomainResult<Posterior> {
    background.validate()?;
    options.validate()?;
    let exposure = options.exposure;
    let shape = k as f64 + options.prior.shape_offset();

    let result = match *background {
        BackgroundSpec::Known { expected } if expected == 0.0 => {
            Posterior::Gamma(GammaPosterior::new(shape, exposure)?)
        }
        BackgroundSpec::Known { expected } => Posterior::Shifted(ShiftedGammaPosterior::new(
            GammaPosterior::new(shape, exposure)?,
            expected / exposure,
            options.boundary,
        )?),
        BackgroundSpec::OffRegion { off_count, alpha } => Posterior::Mixture(
            MixturePosterior::new(k, off_count, alpha, exposure, options.prior)?,
        ),
    };
    tracing::debug!(
        k,
        kind = result.kind(),
        prior = %options.prior,
        boundary = %options.boundary,
        "built posterior"
    );
    Ok(result)
}

pub(crate) fn check_probability(p: f64) -> DomainResult<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(lowcount_core::DomainError::InvalidProbability { value: p })
    }
}
