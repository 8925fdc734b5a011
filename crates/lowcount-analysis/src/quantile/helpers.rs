//! Gamma and Beta quantiles.
//!
//! Beta inversion is statrs'. Gamma inversion is local because statrs loses
//! the far tails: lower-half targets are solved against the CDF and
//! upper-half targets against the survival function, so quantiles deep in
//! either tail keep full relative precision.

use std::f64::consts::SQRT_2;

use statrs::distribution::{Beta, Continuous, ContinuousCDF, Gamma};
use statrs::function::erf::erfc_inv;
use statrs::function::gamma::ln_gamma;

use lowcount_core::constants::MAX_SOLVER_ITERATIONS;
use lowcount_core::{DomainError, DomainResult};

use super::solver::find_root;

/// `x` such that `P(X ≤ x) = p` for `X ~ Gamma(shape, rate)`.
///
/// `shape = 0` is the degenerate distribution at zero and returns 0; this is
/// the convention behind the k = 0 lower bound.
pub fn gamma_quantile(p: f64, shape: f64, rate: f64) -> DomainResult<f64> {
    check_probability(p)?;
    check_gamma_params(shape, rate)?;
    if shape == 0.0 {
        return Ok(0.0);
    }
    Ok(unit_gamma_inverse(p, 1.0 - p, shape)? / rate)
}

/// `x` such that `P(X > x) = q` for `X ~ Gamma(shape, rate)`.
pub fn gamma_upper_quantile(q: f64, shape: f64, rate: f64) -> DomainResult<f64> {
    check_probability(q)?;
    check_gamma_params(shape, rate)?;
    if shape == 0.0 {
        return Ok(0.0);
    }
    Ok(unit_gamma_inverse(1.0 - q, q, shape)? / rate)
}

/// `x` such that `P(X ≤ x) = p` for `X ~ Beta(a, b)`.
///
/// `a = 0` is the degenerate distribution at 0 and `b = 0` the one at 1,
/// the boundary conventions for k = 0 and k = n.
pub fn beta_quantile(p: f64, a: f64, b: f64) -> DomainResult<f64> {
    check_probability(p)?;
    if !(a >= 0.0 && a.is_finite()) {
        return Err(DomainError::InvalidParameter { name: "a", value: a });
    }
    if !(b >= 0.0 && b.is_finite()) {
        return Err(DomainError::InvalidParameter { name: "b", value: b });
    }
    match (a == 0.0, b == 0.0) {
        (true, true) => Err(DomainError::InvalidParameter { name: "a", value: a }),
        (true, false) => Ok(0.0),
        (false, true) => Ok(1.0),
        (false, false) => {
            let dist =
                Beta::new(a, b).map_err(|_| DomainError::InvalidParameter { name: "a", value: a })?;
            let x = dist.inverse_cdf(p);
            if x.is_finite() {
                Ok(x.clamp(0.0, 1.0))
            } else {
                Err(DomainError::NoConvergence {
                    p,
                    iterations: MAX_SOLVER_ITERATIONS,
                })
            }
        }
    }
}

/// Inverse of the unit-rate Gamma CDF given both `p` and its complement `q`.
fn unit_gamma_inverse(p: f64, q: f64, shape: f64) -> DomainResult<f64> {
    let dist = Gamma::new(shape, 1.0).map_err(|_| DomainError::InvalidParameter {
        name: "shape",
        value: shape,
    })?;
    let guess = gamma_guess(p, shape);
    if p <= 0.5 {
        find_root(p, |x| dist.cdf(x) - p, |x| dist.pdf(x), guess)
    } else {
        find_root(p, |x| q - dist.sf(x), |x| dist.pdf(x), guess)
    }
}

/// Wilson–Hilferty starting point, or the small-x series `x^a / Γ(a+1)`
/// when that cube goes non-positive.
fn gamma_guess(p: f64, shape: f64) -> f64 {
    let z = -SQRT_2 * erfc_inv(2.0 * p);
    let c = 1.0 / (9.0 * shape);
    let wh = shape * (1.0 - c + z * c.sqrt()).powi(3);
    if shape >= 1.0 && wh > 0.0 && wh.is_finite() {
        wh
    } else {
        ((p.ln() + ln_gamma(shape + 1.0)) / shape).exp()
    }
}

fn check_probability(p: f64) -> DomainResult<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidProbability { value: p })
    }
}

fn check_gamma_params(shape: f64, rate: f64) -> DomainResult<()> {
    if !(shape >= 0.0 && shape.is_finite()) {
        return Err(DomainError::InvalidParameter {
            name: "shape",
            value: shape,
        });
    }
    if !(rate > 0.0 && rate.is_finite()) {
        return Err(DomainError::InvalidParameter {
            name: "rate",
            value: rate,
        });
    }
    Ok(())
}
