//! # lowcount-analysis
//!
//! Statistics for sparse event counts where √N approximations break down:
//! exact Poisson and binomial intervals, detection significance against a
//! known or measured background, and posteriors over the true event rate.
//!
//! Every operation is a pure function over its inputs. Nothing is cached
//! unless the caller injects a [`MemoizedQuantiles`] source.

pub mod fraction;
pub mod posterior;
pub mod quantile;
pub mod rate;
pub mod significance;

pub use fraction::{
    fraction_credible_interval, fraction_quantiles, uncertainties_fraction,
    uncertainties_fraction_with,
};
pub use posterior::{
    posterior, GammaPosterior, MixturePosterior, Posterior, PosteriorSummary, RateDistribution,
    ShiftedGammaPosterior,
};
pub use quantile::{
    beta_quantile, gamma_quantile, gamma_upper_quantile, DirectQuantiles, MemoizedQuantiles,
    QuantileSource,
};
pub use rate::{rate_credible_interval, rate_quantiles, uncertainties_rate, uncertainties_rate_with};
pub use significance::{li_ma, poisson_tail_significance, significance};

pub use lowcount_core::{
    BackgroundSpec, ConfidenceLevel, DomainError, Interval, PosteriorOptions, RatePrior,
    Sidedness, SignalBoundary, SignificanceOptions,
};
