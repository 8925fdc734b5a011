//! Confidence intervals on a Poisson rate from an observed count.
//!
//! The frequentist interval is the Garwood construction: the bounds are the
//! Gamma(k) and Gamma(k + 1) quantiles at the two tail probabilities, i.e.
//! half the χ² quantiles with 2k and 2k + 2 degrees of freedom. Coverage is
//! exact (conservative) under the Poisson model for every k, including 0.

use lowcount_core::{ConfidenceLevel, DomainError, DomainResult, Interval};

use crate::quantile::{gamma_quantile, DirectQuantiles, QuantileSource};

/// Garwood interval on the rate `λ = true_count / exposure`.
///
/// The estimate is `k / exposure`. The lower bound is exactly 0 when `k = 0`
/// or when the confidence level is one-sided.
pub fn uncertainties_rate(
    k: u64,
    exposure: f64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    uncertainties_rate_with(&DirectQuantiles, k, exposure, confidence)
}

/// [`uncertainties_rate`] with an explicit quantile source.
pub fn uncertainties_rate_with<Q: QuantileSource + ?Sized>(
    source: &Q,
    k: u64,
    exposure: f64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    check_exposure(exposure)?;
    let (lo_tail, hi_tail) = confidence.tail_probabilities();
    let counts = k as f64;

    let lower = if k == 0 || lo_tail == 0.0 {
        0.0
    } else {
        source.gamma(lo_tail, counts, 1.0)?
    };
    let upper = source.gamma(hi_tail, counts + 1.0, 1.0)?;

    tracing::debug!(k, exposure, lower, upper, "garwood interval on counts");
    Ok(Interval::new(lower / exposure, upper / exposure, counts / exposure))
}

/// Credible interval on the rate under a uniform prior.
///
/// The posterior is Gamma(k + 1, exposure); the estimate is its median.
pub fn rate_credible_interval(
    k: u64,
    exposure: f64,
    confidence: ConfidenceLevel,
) -> DomainResult<Interval> {
    check_exposure(exposure)?;
    let shape = k as f64 + 1.0;
    let (lo_tail, hi_tail) = confidence.tail_probabilities();
    let lower = if lo_tail == 0.0 {
        0.0
    } else {
        gamma_quantile(lo_tail, shape, exposure)?
    };
    let upper = gamma_quantile(hi_tail, shape, exposure)?;
    let median = gamma_quantile(0.5, shape, exposure)?;
    Ok(Interval::new(lower, upper, median))
}

/// Quantiles of the uniform-prior rate posterior Gamma(k + 1, exposure) at
/// each cumulative probability in `probabilities`.
pub fn rate_quantiles(k: u64, exposure: f64, probabilities: &[f64]) -> DomainResult<Vec<f64>> {
    check_exposure(exposure)?;
    let shape = k as f64 + 1.0;
    probabilities
        .iter()
        .map(|&p| gamma_quantile(p, shape, exposure))
        .collect()
}

fn check_exposure(exposure: f64) -> DomainResult<()> {
    if exposure > 0.0 && exposure.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonPositiveExposure { value: exposure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lowcount_core::Sidedness;

    fn cl(p: f64) -> ConfidenceLevel {
        ConfidenceLevel::new(p).unwrap()
    }

    #[test]
    fn test_zero_events_one_sigma() {
        let iv = uncertainties_rate(0, 1.0, cl(0.6827)).unwrap();
        assert_eq!(iv.lower, 0.0);
        assert!((iv.upper - 1.841).abs() < 1e-3, "upper = {}", iv.upper);
        assert_eq!(iv.estimate, 0.0);
    }

    #[test]
    fn test_garwood_table_values() {
        // Standard 1σ Garwood bounds for k = 3: [1.367, 5.918].
        let iv = uncertainties_rate(3, 1.0, ConfidenceLevel::one_sigma()).unwrap();
        assert!((iv.lower - 1.367).abs() < 2e-3, "lower = {}", iv.lower);
        assert!((iv.upper - 5.918).abs() < 2e-3, "upper = {}", iv.upper);
    }

    #[test]
    fn test_exposure_divides_bounds() {
        let unit = uncertainties_rate(7, 1.0, cl(0.9)).unwrap();
        let long = uncertainties_rate(7, 10.0, cl(0.9)).unwrap();
        assert!((unit.lower / 10.0 - long.lower).abs() < 1e-12);
        assert!((unit.upper / 10.0 - long.upper).abs() < 1e-12);
        assert!((long.estimate - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_upper_limit() {
        // 90% one-sided upper limit for zero events is ln(10).
        let iv = uncertainties_rate(0, 1.0, ConfidenceLevel::one_sided(0.9).unwrap()).unwrap();
        assert_eq!(iv.lower, 0.0);
        assert!((iv.upper - 10f64.ln()).abs() < 1e-9);
        let iv = uncertainties_rate(5, 1.0, ConfidenceLevel::with_sidedness(0.9, Sidedness::OneSided).unwrap()).unwrap();
        assert_eq!(iv.lower, 0.0);
    }

    #[test]
    fn test_rejects_bad_exposure() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                uncertainties_rate(1, bad, cl(0.9)),
                Err(DomainError::NonPositiveExposure { .. })
            ));
        }
    }

    #[test]
    fn test_large_count_near_gaussian() {
        let iv = uncertainties_rate(10_000, 1.0, ConfidenceLevel::one_sigma()).unwrap();
        assert!((iv.lower - 9900.0).abs() < 2.0, "lower = {}", iv.lower);
        assert!((iv.upper - 10100.0).abs() < 2.0, "upper = {}", iv.upper);
    }

    #[test]
    fn test_credible_interval_zero_events() {
        // Posterior Exp(1): median ln 2.
        let iv = rate_credible_interval(0, 1.0, ConfidenceLevel::one_sigma()).unwrap();
        assert!((iv.estimate - 2f64.ln()).abs() < 1e-9);
        assert!(iv.lower > 0.0 && iv.lower < iv.estimate && iv.estimate < iv.upper);
    }

    #[test]
    fn test_rate_quantiles_ordered() {
        let qs = rate_quantiles(3, 2.0, &[0.16, 0.5, 0.84]).unwrap();
        assert!(qs[0] < qs[1] && qs[1] < qs[2]);
        assert!(rate_quantiles(3, 2.0, &[0.5, 1.0]).is_err());
    }
}
