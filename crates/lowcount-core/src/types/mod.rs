//! Value types shared by every operation. All are immutable once built.

pub mod background;
pub mod confidence;
pub mod interval;
pub mod options;
pub mod sigma;

pub use background::BackgroundSpec;
pub use confidence::{ConfidenceLevel, Sidedness};
pub use interval::Interval;
pub use options::{PosteriorOptions, RatePrior, SignalBoundary, SignificanceOptions};
pub use sigma::{pvalue_from_significance, significance_from_log_pvalue, significance_from_pvalue};
