//! Background specifications for significance and posterior computations.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// How the expected background in the signal region is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundSpec {
    /// Background counts known exactly.
    Known { expected: f64 },
    /// Background estimated from an off-region count, scaled by
    /// `alpha = exposure_on / exposure_off`.
    OffRegion { off_count: u64, alpha: f64 },
}

impl BackgroundSpec {
    pub fn known(expected: f64) -> Self {
        Self::Known { expected }
    }

    pub fn off_region(off_count: u64, alpha: f64) -> Self {
        Self::OffRegion { off_count, alpha }
    }

    /// Check the float parameters. Counts are non-negative by type.
    pub fn validate(&self) -> DomainResult<()> {
        match *self {
            Self::Known { expected } => {
                if !(expected >= 0.0 && expected.is_finite()) {
                    return Err(DomainError::NegativeBackground { value: expected });
                }
            }
            Self::OffRegion { alpha, .. } => {
                if !(alpha > 0.0 && alpha.is_finite()) {
                    return Err(DomainError::NonPositiveRatio { value: alpha });
                }
            }
        }
        Ok(())
    }

    /// Expected background counts in the signal region: B, or α·k_off.
    pub fn expected(&self) -> f64 {
        match *self {
            Self::Known { expected } => expected,
            Self::OffRegion { off_count, alpha } => alpha * off_count as f64,
        }
    }
}
