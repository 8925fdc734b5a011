//! Detection significance of an on-region count over background.
//!
//! Known backgrounds use the exact Poisson tail. Backgrounds measured from
//! an off region use the Li & Ma likelihood-ratio statistic (eq. 17 of
//! Li & Ma 1983). A fractional systematic on the background is folded in as
//! extra variance, which can only lower the result.

use statrs::distribution::{ContinuousCDF, Gamma};
use statrs::function::gamma::ln_gamma;

use lowcount_core::constants::MIN_PVALUE;
use lowcount_core::{
    significance_from_log_pvalue, significance_from_pvalue, BackgroundSpec, DomainError,
    DomainResult, SignificanceOptions,
};

/// Significance, in Gaussian σ, of observing `k` counts over `background`.
///
/// Unsigned results are never negative: a count at or below the expected
/// background gives 0. With `options.signed`, deficits give a negative value
/// whose magnitude is the Poisson lower-tail significance.
pub fn significance(
    k: u64,
    background: &BackgroundSpec,
    options: &SignificanceOptions,
) -> DomainResult<f64> {
    background.validate()?;
    options.validate()?;
    let systematic = options.systematic;

    match *background {
        BackgroundSpec::Known { expected } => {
            let base = poisson_tail_significance(k, expected, options.signed)?;
            if systematic == 0.0 || base <= 0.0 {
                return Ok(base);
            }
            let reduction = systematic_reduction(k as f64, expected, systematic);
            tracing::debug!(k, expected, systematic, reduction, "systematic on known background");
            Ok(base * reduction)
        }
        BackgroundSpec::OffRegion { off_count, alpha } => {
            if k == 0 || off_count == 0 {
                let expected = background.expected();
                tracing::debug!(k, off_count, expected, "li-ma undefined, using poisson tail");
                return poisson_tail_significance(k, expected, options.signed);
            }
            let inflation = 1.0 + systematic * systematic * off_count as f64;
            let off = off_count as f64 / inflation;
            let ratio = alpha * inflation;
            let magnitude = li_ma(k as f64, off, ratio);
            if k as f64 > background.expected() {
                Ok(magnitude)
            } else if options.signed {
                Ok(-magnitude)
            } else {
                Ok(0.0)
            }
        }
    }
}

/// Exact Poisson-tail significance of `k` counts over a known background.
///
/// For an excess the p-value is `P(X ≥ k | background)`; for a signed
/// deficit it is `P(X ≤ k | background)`. Tails too small for an `f64` are
/// summed in log space, so only a zero background with counts (an exactly
/// zero p-value) fails, with [`DomainError::PValueUnderflow`].
pub fn poisson_tail_significance(k: u64, background: f64, signed: bool) -> DomainResult<f64> {
    if !(background >= 0.0 && background.is_finite()) {
        return Err(DomainError::NegativeBackground { value: background });
    }
    let counts = k as f64;
    if counts > background {
        // P(X ≥ k | B) = P(Gamma(k, 1) ≤ B).
        let pvalue = unit_gamma(counts)?.cdf(background);
        Ok(tail_to_sigma(pvalue, k, background, true)?.max(0.0))
    } else if signed {
        // P(X ≤ k | B) = P(Gamma(k + 1, 1) > B).
        let pvalue = unit_gamma(counts + 1.0)?.sf(background);
        Ok(-tail_to_sigma(pvalue, k, background, false)?.max(0.0))
    } else {
        Ok(0.0)
    }
}

/// Li & Ma significance magnitude for `n_on` counts against `n_off`
/// off-region counts with exposure ratio `alpha`.
///
/// Terms with a zero count vanish, so the statistic is continuous at the
/// edges; it is never negative. Inputs that overflow give NaN.
pub fn li_ma(n_on: f64, n_off: f64, alpha: f64) -> f64 {
    let expected = alpha * n_off;
    let on_term = if n_on > 0.0 {
        n_on * ((n_on / (alpha * n_on + expected)).ln() + alpha.ln_1p())
    } else {
        0.0
    };
    let off_term = if n_off > 0.0 {
        n_off * ((expected - n_on) / (n_on + n_off)).ln_1p()
    } else {
        0.0
    };
    let statistic = 2.0 * (on_term + off_term);
    if statistic.is_nan() {
        return statistic;
    }
    statistic.max(0.0).sqrt()
}

/// Factor in `[0, 1]` by which a fractional background systematic shrinks a
/// known-background excess.
///
/// The uncertain background is modelled as an off region of `1/σ²` counts
/// scaled by `Bσ²`; the factor is the Li & Ma statistic of that pseudo
/// measurement relative to the Poisson likelihood ratio with no systematic.
fn systematic_reduction(counts: f64, background: f64, systematic: f64) -> f64 {
    if background <= 0.0 || counts <= 0.0 {
        return 1.0;
    }
    let exact = (2.0 * (counts * (counts / background).ln() - (counts - background)))
        .max(0.0)
        .sqrt();
    if exact <= 0.0 {
        return 1.0;
    }
    let variance = systematic * systematic;
    let off = 1.0 / variance;
    let ratio = background * variance;
    // Below ~1e-155 the pseudo off region is not representable: the limit is exact.
    if !off.is_finite() || ratio == 0.0 {
        return 1.0;
    }
    let pseudo = li_ma(counts, off, ratio);
    if pseudo.is_nan() {
        tracing::debug!(counts, background, systematic, "pseudo off region overflowed");
        return 1.0;
    }
    (pseudo / exact).clamp(0.0, 1.0)
}

fn tail_to_sigma(pvalue: f64, k: u64, background: f64, upper: bool) -> DomainResult<f64> {
    if pvalue >= 1.0 {
        return Ok(0.0);
    }
    if pvalue > MIN_PVALUE {
        return significance_from_pvalue(pvalue);
    }
    let log_p = ln_poisson_tail(k, background, upper);
    tracing::trace!(k, background, log_p, "poisson tail in log space");
    significance_from_log_pvalue(log_p)
}

/// `ln P(X ≥ k | B)` when `upper`, else `ln P(X ≤ k | B)`.
///
/// Sums outward from the term at `k`; only called far in the tail, where
/// the terms shrink geometrically.
fn ln_poisson_tail(k: u64, background: f64, upper: bool) -> f64 {
    let lead = k as f64 * background.ln() - background - ln_gamma(k as f64 + 1.0);
    let mut sum = 1.0_f64;
    let mut term = 1.0_f64;
    let mut i = k as f64;
    loop {
        if upper {
            i += 1.0;
            term *= background / i;
        } else {
            if i == 0.0 {
                break;
            }
            term *= i / background;
            i -= 1.0;
        }
        sum += term;
        if term <= f64::EPSILON * sum {
            break;
        }
    }
    lead + sum.ln()
}

fn unit_gamma(shape: f64) -> DomainResult<Gamma> {
    Gamma::new(shape, 1.0).map_err(|_| DomainError::InvalidParameter {
        name: "shape",
        value: shape,
    })
}
