//! Domain errors raised by every statistical operation.

use super::error_code::{self, ErrorCode};

/// Result alias for statistical operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Input outside the domain of an operation.
///
/// Raised before any computation proceeds; operations never return partial
/// results or NaN.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Probability must lie in (0, 1), got {value}")]
    InvalidProbability { value: f64 },

    #[error("Confidence level must lie in (0, 1), got {value}")]
    InvalidConfidence { value: f64 },

    #[error("Exposure must be positive and finite, got {value}")]
    NonPositiveExposure { value: f64 },

    #[error("Hits ({hits}) exceed tries ({tries})")]
    CountExceedsTrials { hits: u64, tries: u64 },

    #[error("Number of tries must be positive")]
    NoTrials,

    #[error("Background must be non-negative and finite, got {value}")]
    NegativeBackground { value: f64 },

    #[error("Exposure ratio alpha must be positive and finite, got {value}")]
    NonPositiveRatio { value: f64 },

    #[error("Systematic uncertainty must be non-negative and finite, got {value}")]
    NegativeSystematic { value: f64 },

    #[error("Invalid {name} parameter: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("p-value {pvalue:e} is too small for a finite significance")]
    PValueUnderflow { pvalue: f64 },

    #[error("Quantile search for p={p} did not converge after {iterations} iterations")]
    NoConvergence { p: f64, iterations: usize },
}

impl ErrorCode for DomainError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PValueUnderflow { .. } => error_code::PVALUE_UNDERFLOW,
            Self::NoConvergence { .. } => error_code::NO_CONVERGENCE,
            _ => error_code::DOMAIN_ERROR,
        }
    }
}
