//! # lowcount-core
//!
//! Foundation crate for low-count event statistics.
//! Defines the value types, errors, config, tracing setup, and constants
//! shared by the analysis crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::LowcountConfig;
pub use errors::{ConfigError, DomainError, DomainResult, ErrorCode};
pub use types::{
    pvalue_from_significance, significance_from_log_pvalue, significance_from_pvalue,
    BackgroundSpec, ConfidenceLevel, Interval, PosteriorOptions,
    RatePrior, Sidedness, SignalBoundary, SignificanceOptions,
};
