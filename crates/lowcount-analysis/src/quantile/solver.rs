//! Monotone root-finding shared by every quantile lookup.

use lowcount_core::constants::{MAX_SOLVER_ITERATIONS, QUANTILE_TOLERANCE};
use lowcount_core::{DomainError, DomainResult};

/// Find `x ≥ 0` with `residual(x) = 0` for a non-decreasing `residual`.
///
/// The bracket starts at `[0, 2·guess]` and its upper end is doubled until
/// it straddles the root. `slope` is the derivative of `residual` (a density) and drives Newton
/// steps; any step that leaves the current bracket, or a non-finite or zero
/// slope, falls back to bisection. `guess` seeds the search.
pub fn find_root<R, D>(
    p: f64,
    residual: R,
    slope: D,
    guess: f64,
) -> DomainResult<f64>
where
    R: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut lo = 0.0_f64;
    let mut hi = if guess.is_finite() && guess > 0.0 {
        2.0 * guess
    } else {
        1.0
    };
    let mut grown = 0;
    while residual(hi) < 0.0 {
        lo = hi;
        hi *= 2.0;
        grown += 1;
        if !hi.is_finite() || grown > MAX_SOLVER_ITERATIONS {
            return Err(DomainError::NoConvergence {
                p,
                iterations: grown,
            });
        }
    }

    let mut x = if guess > lo && guess < hi {
        guess
    } else {
        0.5 * (lo + hi)
    };

    for _ in 0..MAX_SOLVER_ITERATIONS {
        let f = residual(x);
        if f == 0.0 {
            return Ok(x);
        }
        if f < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        if hi - lo <= QUANTILE_TOLERANCE * hi.abs().max(f64::MIN_POSITIVE) {
            return Ok(0.5 * (lo + hi));
        }

        let d = slope(x);
        let newton = x - f / d;
        let next = if d > 0.0 && newton.is_finite() && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
        if (next - x).abs() <= QUANTILE_TOLERANCE * next.abs().max(f64::MIN_POSITIVE) {
            return Ok(next);
        }
        x = next;
    }

    Err(DomainError::NoConvergence {
        p,
        iterations: MAX_SOLVER_ITERATIONS,
    })
}
