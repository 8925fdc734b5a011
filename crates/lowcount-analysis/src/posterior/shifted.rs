//! Signal posterior over a known background: the total-rate posterior
//! shifted down by the background rate.

use lowcount_core::{DomainError, DomainResult, SignalBoundary};

use super::{check_probability, GammaPosterior, RateDistribution};

/// `S = max(T − b, 0)` for `T ~ Gamma`, or `T − b` conditioned on `T > b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedGammaPosterior {
    total: GammaPosterior,
    shift: f64,
    boundary: SignalBoundary,
    /// `P(T ≤ shift)`.
    below: f64,
    /// `P(T > shift)`.
    above: f64,
}

impl ShiftedGammaPosterior {
    /// `shift` is the background expressed as a rate (B / exposure).
    ///
    /// Renormalizing fails with [`DomainError::PValueUnderflow`] when the
    /// mass above the shift underflows to zero.
    pub fn new(total: GammaPosterior, shift: f64, boundary: SignalBoundary) -> DomainResult<Self> {
        if !(shift >= 0.0 && shift.is_finite()) {
            return Err(DomainError::NegativeBackground { value: shift });
        }
        let above = total.sf(shift);
        if boundary == SignalBoundary::Renormalize && above <= 0.0 {
            return Err(DomainError::PValueUnderflow { pvalue: above });
        }
        Ok(Self {
            total,
            shift,
            boundary,
            below: total.cdf(shift),
            above,
        })
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn boundary(&self) -> SignalBoundary {
        self.boundary
    }

    /// `E[max(T − b, 0)]` via `t·f_a(t) = (a/r)·f_{a+1}(t)`.
    fn clipped_mean(&self) -> f64 {
        let a = self.total.shape();
        let r = self.total.rate();
        let tail_moment = match GammaPosterior::new(a + 1.0, r) {
            Ok(next) => (a / r) * next.sf(self.shift),
            Err(_) => a / r,
        };
        (tail_moment - self.shift * self.above).max(0.0)
    }
}

impl RateDistribution for ShiftedGammaPosterior {
    fn pdf(&self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return 0.0;
        }
        let density = self.total.pdf(rate + self.shift);
        match self.boundary {
            SignalBoundary::PointMass => density,
            SignalBoundary::Renormalize => density / self.above,
        }
    }

    fn cdf(&self, rate: f64) -> f64 {
        if rate < 0.0 {
            return 0.0;
        }
        match self.boundary {
            SignalBoundary::PointMass => self.total.cdf(rate + self.shift),
            SignalBoundary::Renormalize => {
                let beyond = self.total.sf(rate + self.shift);
                ((self.above - beyond) / self.above).clamp(0.0, 1.0)
            }
        }
    }

    fn quantile(&self, p: f64) -> DomainResult<f64> {
        check_probability(p)?;
        let total = match self.boundary {
            SignalBoundary::PointMass => {
                if p <= self.below {
                    return Ok(0.0);
                }
                if p <= 0.5 {
                    self.total.quantile(p)?
                } else {
                    self.total.upper_quantile(1.0 - p)?
                }
            }
            SignalBoundary::Renormalize => self.total.upper_quantile((1.0 - p) * self.above)?,
        };
        Ok((total - self.shift).max(0.0))
    }

    fn mean(&self) -> f64 {
        match self.boundary {
            SignalBoundary::PointMass => self.clipped_mean(),
            SignalBoundary::Renormalize => self.clipped_mean() / self.above,
        }
    }

    fn zero_mass(&self) -> f64 {
        match self.boundary {
            SignalBoundary::PointMass => self.below,
            SignalBoundary::Renormalize => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted(k: f64, b: f64, boundary: SignalBoundary) -> ShiftedGammaPosterior {
        ShiftedGammaPosterior::new(GammaPosterior::new(k + 1.0, 1.0).unwrap(), b, boundary).unwrap()
    }

    #[test]
    fn test_point_mass_at_zero() {
        // k = 0: T ~ Exp(1), P(T ≤ b) = 1 - e^{-b}.
        let post = shifted(0.0, 2.0, SignalBoundary::PointMass);
        let expected = 1.0 - (-2.0f64).exp();
        assert!((post.zero_mass() - expected).abs() < 1e-12);
        assert!((post.cdf(0.0) - expected).abs() < 1e-12);
        assert_eq!(post.quantile(0.5).unwrap(), 0.0);
        // Memoryless: the tail beyond the atom is Exp(1) again.
        let x = post.quantile(0.95).unwrap();
        let tail = (1.0 - 0.95) / (-2.0f64).exp();
        assert!((x + tail.ln()).abs() < 1e-9, "x = {x}");
    }

    #[test]
    fn test_renormalized_exponential_is_memoryless() {
        let post = shifted(0.0, 3.0, SignalBoundary::Renormalize);
        assert_eq!(post.zero_mass(), 0.0);
        assert!((post.mean() - 1.0).abs() < 1e-9);
        assert!((post.quantile(0.5).unwrap() - 2f64.ln()).abs() < 1e-9);
        assert!((post.cdf(1.0) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_point_mass_mean() {
        // E[max(T - 2, 0)] for T ~ Exp(1) is e^{-2}.
        let post = shifted(0.0, 2.0, SignalBoundary::PointMass);
        assert!((post.mean() - (-2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_inverts_cdf_above_atom() {
        for boundary in [SignalBoundary::PointMass, SignalBoundary::Renormalize] {
            let post = shifted(6.0, 2.5, boundary);
            for p in [0.2, 0.5, 0.9, 0.999] {
                if p <= post.zero_mass() {
                    continue;
                }
                let x = post.quantile(p).unwrap();
                assert!((post.cdf(x) - p).abs() < 1e-9, "{boundary} p = {p}");
            }
        }
    }

    #[test]
    fn test_renormalize_underflow() {
        let total = GammaPosterior::new(1.0, 1.0).unwrap();
        assert!(matches!(
            ShiftedGammaPosterior::new(total, 1e4, SignalBoundary::Renormalize),
            Err(DomainError::PValueUnderflow { .. })
        ));
        assert!(ShiftedGammaPosterior::new(total, 1e4, SignalBoundary::PointMass).is_ok());
    }
}
