//! Confidence and credible intervals.

use serde::{Deserialize, Serialize};

/// An ordered pair of non-negative bounds around a point estimate.
///
/// `estimate` is the maximum-likelihood value for frequentist intervals and
/// the posterior median for credible intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
    pub estimate: f64,
}

impl Interval {
    pub fn new(lower: f64, upper: f64, estimate: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
        }
    }

    /// Distance between the bounds.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// Every bound scaled by `factor` (e.g. counts to rates).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            lower: self.lower * factor,
            upper: self.upper * factor,
            estimate: self.estimate * factor,
        }
    }
}
