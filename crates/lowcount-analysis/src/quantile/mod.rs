//! Inverse-CDF lookups for the Gamma and Beta distributions.
//!
//! CDFs and densities come from `statrs`; the inversion is a bracketed,
//! safeguarded Newton search so the result is accurate deep into both tails.

pub mod helpers;
pub mod solver;
pub mod source;

pub use helpers::{beta_quantile, gamma_quantile, gamma_upper_quantile};
pub use source::{DirectQuantiles, MemoizedQuantiles, QuantileSource};
