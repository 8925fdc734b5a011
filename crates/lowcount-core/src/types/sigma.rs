//! Conversions between one-sided p-values and normal-equivalent sigma.

use std::f64::consts::SQRT_2;

use statrs::consts::LN_SQRT_2PI;
use statrs::function::erf::{erfc, erfc_inv};

use crate::constants::{MAX_SOLVER_ITERATIONS, MIN_PVALUE, QUANTILE_TOLERANCE};
use crate::errors::{DomainError, DomainResult};

/// Upper-tail probability of a standard normal beyond `z`: Φ(−z).
pub fn pvalue_from_significance(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Number of standard deviations whose upper-tail probability is `p`: −Φ⁻¹(p).
///
/// Fails with `PValueUnderflow` when `p` is too small to yield a finite
/// z-score, and with `InvalidProbability` outside (0, 1).
pub fn significance_from_pvalue(p: f64) -> DomainResult<f64> {
    if p.is_nan() || p < 0.0 || p >= 1.0 {
        return Err(DomainError::InvalidProbability { value: p });
    }
    if p <= MIN_PVALUE {
        return Err(DomainError::PValueUnderflow { pvalue: p });
    }
    Ok(SQRT_2 * erfc_inv(2.0 * p))
}

/// [`significance_from_pvalue`] for a p-value given as `ln p`.
///
/// Tails below `f64::MIN_POSITIVE` still give a finite z-score; only
/// `ln p = −∞` fails with `PValueUnderflow`.
pub fn significance_from_log_pvalue(log_p: f64) -> DomainResult<f64> {
    if log_p.is_nan() || log_p >= 0.0 {
        return Err(DomainError::InvalidProbability { value: log_p.exp() });
    }
    if log_p == f64::NEG_INFINITY {
        return Err(DomainError::PValueUnderflow { pvalue: 0.0 });
    }
    let p = log_p.exp();
    if p > MIN_PVALUE {
        return significance_from_pvalue(p);
    }

    // Newton on ln Φ(−z) ≈ −z²/2 − ln z − ln √(2π) + ln(1 − 1/z² + 3/z⁴), z > 37.
    let mut z = (-2.0 * log_p).sqrt();
    for _ in 0..MAX_SOLVER_ITERATIONS {
        let z2 = z * z;
        let residual = -0.5 * z2 - z.ln() - LN_SQRT_2PI + (1.0 - 1.0 / z2 + 3.0 / (z2 * z2)).ln()
            - log_p;
        let step = residual / (z + 1.0 / z);
        z += step;
        if step.abs() <= QUANTILE_TOLERANCE * z {
            return Ok(z);
        }
    }
    Err(DomainError::NoConvergence {
        p,
        iterations: MAX_SOLVER_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sigma_is_half() {
        assert!((pvalue_from_significance(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_one_sigma_tail() {
        let p = pvalue_from_significance(1.0);
        assert!((p - 0.158_655_253_931_457_05).abs() < 1e-12);
        assert!((significance_from_pvalue(p).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_sigma() {
        let p = pvalue_from_significance(-1.0);
        assert!((significance_from_pvalue(p).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_five_sigma() {
        let z = significance_from_pvalue(2.866_515_718_791_939e-7).unwrap();
        assert!((z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            significance_from_pvalue(1.0),
            Err(DomainError::InvalidProbability { .. })
        ));
        assert!(matches!(
            significance_from_pvalue(-0.1),
            Err(DomainError::InvalidProbability { .. })
        ));
        assert!(matches!(
            significance_from_pvalue(f64::NAN),
            Err(DomainError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_log_pvalue_matches_direct() {
        for p in [0.3, 1e-5, 1e-300] {
            let direct = significance_from_pvalue(p).unwrap();
            let logged = significance_from_log_pvalue(p.ln()).unwrap();
            assert!((direct - logged).abs() < 1e-8, "p={p}: {direct} vs {logged}");
        }
    }

    #[test]
    fn test_log_pvalue_beyond_f64() {
        // ln p = −800 is far below f64::MIN_POSITIVE.
        let z = significance_from_log_pvalue(-800.0).unwrap();
        assert!((z - 39.884_694_8).abs() < 1e-6, "z = {z}");
        // Continuous across the switch to the asymptotic branch.
        let edge = MIN_PVALUE.ln();
        let above = significance_from_log_pvalue(edge + 1e-9).unwrap();
        let below = significance_from_log_pvalue(edge - 1e-9).unwrap();
        assert!((above - below).abs() < 1e-8);
        assert!(matches!(
            significance_from_log_pvalue(f64::NEG_INFINITY),
            Err(DomainError::PValueUnderflow { .. })
        ));
        assert!(significance_from_log_pvalue(0.0).is_err());
    }

    #[test]
    fn test_underflow() {
        assert!(matches!(
            significance_from_pvalue(0.0),
            Err(DomainError::PValueUnderflow { .. })
        ));
    }
}
