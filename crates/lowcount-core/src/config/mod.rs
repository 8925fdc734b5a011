//! Configuration system for lowcount.
//! TOML-based, 4-layer resolution: overrides > env > project > user > defaults.

pub mod interval_config;
pub mod lowcount_config;
pub mod posterior_config;
pub mod significance_config;
pub mod solver_config;

pub use interval_config::IntervalConfig;
pub use lowcount_config::{ConfigOverrides, LowcountConfig};
pub use posterior_config::PosteriorConfig;
pub use significance_config::SignificanceConfig;
pub use solver_config::SolverConfig;
