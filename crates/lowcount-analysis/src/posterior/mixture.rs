//! Signal posterior with the background measured in an off region.
//!
//! With `k` on-region counts, `k_off` off-region counts, exposure ratio α
//! and the prior `x^(c − 1)` on both the signal and the background rate,
//! integrating out the background leaves a finite mixture: `j` of the on
//! counts are signal with weight
//!
//! ```text
//! w_j ∝ (α / (1 + α))^i · Γ(i + k_off + c) / Γ(i + 1) · Γ(j + c) / Γ(j + 1),  i = k − j
//! ```
//!
//! and the signal rate given `j` is Gamma(j + c, exposure). `c` is 1 for the
//! uniform prior and ½ for Jeffreys.

use statrs::function::gamma::ln_gamma;

use lowcount_core::constants::MIXTURE_WEIGHT_CUTOFF;
use lowcount_core::{DomainError, DomainResult, RatePrior};

use super::{check_probability, GammaPosterior, RateDistribution};
use crate::quantile::solver::find_root;

/// One mixture component: `weight · Gamma(signal_counts + c, exposure)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub signal_counts: u64,
    pub weight: f64,
    pub distribution: GammaPosterior,
}

/// Finite Gamma mixture over the signal rate.
#[derive(Debug, Clone, PartialEq)]
pub struct MixturePosterior {
    components: Vec<Component>,
}

impl MixturePosterior {
    /// Only components within [`MIXTURE_WEIGHT_CUTOFF`] of the heaviest are
    /// kept. They are found by walking outward from the background-count
    /// mode, so the cost follows the number kept rather than `k`.
    pub fn new(
        k: u64,
        off_count: u64,
        alpha: f64,
        exposure: f64,
        prior: RatePrior,
    ) -> DomainResult<Self> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(DomainError::NonPositiveRatio { value: alpha });
        }
        if !(exposure > 0.0 && exposure.is_finite()) {
            return Err(DomainError::NonPositiveExposure { value: exposure });
        }

        let log_ratio = alpha.ln() - alpha.ln_1p();
        let off = off_count as f64;
        let offset = prior.shape_offset();
        // Indexed by i = background counts.
        let log_weight = |i: u64| {
            let background_counts = i as f64;
            let signal_counts = (k - i) as f64;
            background_counts * log_ratio + ln_gamma(background_counts + off + offset)
                - ln_gamma(background_counts + 1.0)
                + ln_gamma(signal_counts + offset)
                - ln_gamma(signal_counts + 1.0)
        };

        // Log-weights are concave in i for the uniform prior. The Jeffreys
        // terms add a perturbation bounded by ~ln(k); past `slack` below the
        // cutoff no later weight can climb back above it.
        let slack = match prior {
            RatePrior::Uniform => 0.0,
            RatePrior::Jeffreys => 2.0 * (1.5 + (k as f64 + 1.0).ln()),
        };
        let log_cutoff = MIXTURE_WEIGHT_CUTOFF.ln();
        let mode = (alpha * (off + offset - 1.0) - 1.0).round().clamp(0.0, k as f64) as u64;

        let mut peak = log_weight(mode);
        let mut visited = vec![(mode, peak)];
        for i in (0..mode).rev() {
            let lw = log_weight(i);
            peak = peak.max(lw);
            if lw < peak + log_cutoff - slack {
                break;
            }
            visited.push((i, lw));
        }
        for i in mode + 1..=k {
            let lw = log_weight(i);
            peak = peak.max(lw);
            if lw < peak + log_cutoff - slack {
                break;
            }
            visited.push((i, lw));
        }
        let floor = peak + log_cutoff;
        visited.retain(|&(_, lw)| lw >= floor);
        visited.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let mut components = Vec::with_capacity(visited.len());
        let mut total = 0.0;
        for (i, lw) in visited {
            let j = k - i;
            let weight = (lw - peak).exp();
            total += weight;
            components.push(Component {
                signal_counts: j,
                weight,
                distribution: GammaPosterior::new(j as f64 + offset, exposure)?,
            });
        }
        for c in &mut components {
            c.weight /= total;
        }

        tracing::trace!(
            k,
            off_count,
            kept = components.len(),
            "off-region mixture posterior"
        );
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Expected number of on-region counts that are signal.
    pub fn expected_signal_counts(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.weight * c.signal_counts as f64)
            .sum()
    }

    fn sf(&self, rate: f64) -> f64 {
        self.components
            .iter()
            .map(|c| c.weight * c.distribution.sf(rate))
            .sum()
    }
}

impl RateDistribution for MixturePosterior {
    fn pdf(&self, rate: f64) -> f64 {
        self.components
            .iter()
            .map(|c| c.weight * c.distribution.pdf(rate))
            .sum()
    }

    fn cdf(&self, rate: f64) -> f64 {
        let cdf: f64 = self
            .components
            .iter()
            .map(|c| c.weight * c.distribution.cdf(rate))
            .sum();
        cdf.clamp(0.0, 1.0)
    }

    fn quantile(&self, p: f64) -> DomainResult<f64> {
        check_probability(p)?;
        let guess = self.mean();
        if p <= 0.5 {
            find_root(p, |x| self.cdf(x) - p, |x| self.pdf(x), guess)
        } else {
            let q = 1.0 - p;
            find_root(p, |x| q - self.sf(x), |x| self.pdf(x), guess)
        }
    }

    fn mean(&self) -> f64 {
        self.components
            .iter()
            .map(|c| c.weight * c.distribution.mean())
            .sum()
    }
}
