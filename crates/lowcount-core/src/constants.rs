/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Two-sided coverage of ±1σ for a standard normal: erf(1/√2).
pub const ONE_SIGMA: f64 = 0.682_689_492_137_085_9;

/// Two-sided coverage of ±2σ.
pub const TWO_SIGMA: f64 = 0.954_499_736_103_641_6;

/// Two-sided coverage of ±3σ.
pub const THREE_SIGMA: f64 = 0.997_300_203_936_739_8;

/// Smallest p-value that still maps to a finite significance.
pub const MIN_PVALUE: f64 = f64::MIN_POSITIVE;

/// Relative tolerance for quantile root-finding.
pub const QUANTILE_TOLERANCE: f64 = 1e-12;

/// Iteration cap for quantile root-finding.
pub const MAX_SOLVER_ITERATIONS: usize = 500;

/// Mixture components whose weight falls below this fraction of the largest
/// weight are dropped from the on/off posterior.
pub const MIXTURE_WEIGHT_CUTOFF: f64 = 1e-16;

/// Default capacity of the memoized quantile cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
