//! Confidence intervals on a binomial success fraction.
//!
//! The frequentist interval is Clopper–Pearson: bounds are Beta(k, n−k+1)
//! and Beta(k+1, n−k) quantiles, with the k = 0 and k = n edges pinned to
//! 0 and 1.

use lowcount_core::{ConfidenceLevel, DomainError, DomainResult, Interval};

use crate::quantile::{beta_quantile, DirectQuantiles, QuantileSource};

/// Clopper–Pearson interval for `k` successes in `n` trials.
///
/// The estimate is `k / n`. The lower bound is 0 exactly when `k = 0` (or the
/// level is one-sided) and the upper bound is 1 exactly when `k = n`.
pub fn uncertainties_fraction(
    k: u64,
    n: u64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    uncertainties_fraction_with(&DirectQuantiles, k, n, confidence)
}

/// [`uncertainties_fraction`] with an explicit quantile source.
pub fn uncertainties_fraction_with<Q: QuantileSource + ?Sized>(
    source: &Q,
    k: u64,
    n: u64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    if n == 0 {
        return Err(DomainError::NoTrials);
    }
    check_counts(k, n)?;

    let (lo_tail, hi_tail) = confidence.tail_probabilities();
    let hits = k as f64;
    let misses = (n - k) as f64;

    let lower = if k == 0 || lo_tail == 0.0 {
        0.0
    } else {
        source.beta(lo_tail, hits, misses + 1.0)?
    };
    let upper = if k == n {
        1.0
    } else {
        source.beta(hi_tail, hits + 1.0, misses)?
    };

    tracing::debug!(k, n, lower, upper, "clopper-pearson interval");
    Ok(Interval::new(lower, upper, hits / n as f64))
}

/// Credible interval on the fraction under a uniform prior.
///
/// The posterior is Beta(k + 1, n − k + 1) and the estimate is its median.
/// `n = 0` is allowed: the posterior is then the prior.
pub fn fraction_credible_interval(
    k: u64,
    n: u64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    check_counts(k, n)?;
    let (a, b) = posterior_shape(k, n);
    let (lo_tail, hi_tail) = confidence.tail_probabilities();
    let lower = if lo_tail == 0.0 {
        0.0
    } else {
        beta_quantile(lo_tail, a, b)?
    };
    let upper = beta_quantile(hi_tail, a, b)?;
    let median = beta_quantile(0.5, a, b)?;
    Ok(Interval::new(lower, upper, median))
}

/// Quantiles of the uniform-prior fraction posterior Beta(k + 1, n − k + 1).
pub fn fraction_quantiles(k: u64, n: u64, probabilities: &[f64]) -> DomainResult<Vec<f64>> {
    check_counts(k, n)?;
    let (a, b) = posterior_shape(k, n);
    probabilities
        .iter()
        .map(|&p| beta_quantile(p, a, b))
        .collect()
}

fn posterior_shape(k: u64, n: u64) -> (f64, f64) {
    (k as f64 + 1.0, (n - k) as f64 + 1.0)
}

fn check_counts(k: u64, n: u64) -> DomainResult<()> {
    if k > n {
        Err(DomainError::CountExceedsTrials { hits: k, tries: n })
    } else {
        Ok(())
    }
}
