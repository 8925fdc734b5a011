//! Injectable quantile sources: stateless by default, memoized on request.

use moka::sync::Cache;

use lowcount_core::config::SolverConfig;
use lowcount_core::constants::DEFAULT_CACHE_CAPACITY;
use lowcount_core::DomainResult;

use super::helpers::{beta_quantile, gamma_quantile};

/// Provider of Gamma and Beta quantiles.
///
/// Interval operations take a source so callers evaluating many intervals
/// can opt into memoization without any ambient global state.
pub trait QuantileSource {
    /// Lower-tail quantile of Gamma(shape, rate).
    fn gamma(&self, p: f64, shape: f64, rate: f64) -> DomainResult<f64>;

    /// Lower-tail quantile of Beta(a, b).
    fn beta(&self, p: f64, a: f64, b: f64) -> DomainResult<f64>;
}

/// Computes every quantile from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectQuantiles;

impl QuantileSource for DirectQuantiles {
    fn gamma(&self, p: f64, shape: f64, rate: f64) -> DomainResult<f64> {
        gamma_quantile(p, shape, rate)
    }

    fn beta(&self, p: f64, a: f64, b: f64) -> DomainResult<f64> {
        beta_quantile(p, a, b)
    }
}

/// Cache key: the distribution family and the exact bit patterns of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum QuantileKey {
    Gamma { p: u64, shape: u64, rate: u64 },
    Beta { p: u64, a: u64, b: u64 },
}

/// Memoizing wrapper around another source.
///
/// Quantiles are pure functions of their inputs, so a cached value is always
/// identical to a recomputed one. Errors are never cached.
pub struct MemoizedQuantiles<S = DirectQuantiles> {
    inner: S,
    cache: Cache<QuantileKey, f64>,
}

impl MemoizedQuantiles<DirectQuantiles> {
    /// Memoize direct computation with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DirectQuantiles, DEFAULT_CACHE_CAPACITY)
    }
}

impl From<&SolverConfig> for MemoizedQuantiles<DirectQuantiles> {
    fn from(config: &SolverConfig) -> Self {
        Self::with_capacity(DirectQuantiles, config.effective_cache_capacity())
    }
}

impl Default for MemoizedQuantiles<DirectQuantiles> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: QuantileSource> MemoizedQuantiles<S> {
    pub fn with_capacity(inner: S, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(capacity),
        }
    }

    /// Number of cached quantiles (approximate while inserts are pending).
    pub fn cached_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    fn lookup(
        &self,
        key: QuantileKey,
        compute: impl FnOnce() -> DomainResult<f64>,
    ) -> DomainResult<f64> {
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(?key, "quantile cache hit");
            return Ok(hit);
        }
        let value = compute()?;
        self.cache.insert(key, value);
        Ok(value)
    }
}

impl<S: QuantileSource> QuantileSource for MemoizedQuantiles<S> {
    fn gamma(&self, p: f64, shape: f64, rate: f64) -> DomainResult<f64> {
        let key = QuantileKey::Gamma {
            p: p.to_bits(),
            shape: shape.to_bits(),
            rate: rate.to_bits(),
        };
        self.lookup(key, || self.inner.gamma(p, shape, rate))
    }

    fn beta(&self, p: f64, a: f64, b: f64) -> DomainResult<f64> {
        let key = QuantileKey::Beta {
            p: p.to_bits(),
            a: a.to_bits(),
            b: b.to_bits(),
        };
        self.lookup(key, || self.inner.beta(p, a, b))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for MemoizedQuantiles<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedQuantiles")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
