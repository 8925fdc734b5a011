//! Top-level lowcount configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IntervalConfig, PosteriorConfig, SignificanceConfig, SolverConfig};
use crate::errors::ConfigError;
use crate::types::{RatePrior, Sidedness, SignalBoundary};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LOWCOUNT_*`)
/// 3. Project config (`lowcount.toml` in project root)
/// 4. User config (`~/.lowcount/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LowcountConfig {
    pub intervals: IntervalConfig,
    pub significance: SignificanceConfig,
    pub posterior: PosteriorConfig,
    pub solver: SolverConfig,
}

/// Override arguments that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub confidence: Option<f64>,
    pub sigma: Option<f64>,
    pub systematic: Option<f64>,
    pub signed: Option<bool>,
    pub exposure: Option<f64>,
}

impl LowcountConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(path = %user_config_path.display(), %err, "skipping user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("lowcount.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LowcountConfig) -> Result<(), ConfigError> {
        if let Some(confidence) = config.intervals.confidence {
            if !(confidence > 0.0 && confidence < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "intervals.confidence".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.intervals.sigma.is_some() {
            config
                .intervals
                .confidence_level()
                .map_err(|e| ConfigError::ValidationFailed {
                    field: "intervals.sigma".to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Some(systematic) = config.significance.systematic {
            if !(systematic >= 0.0 && systematic.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: "significance.systematic".to_string(),
                    message: "must be a non-negative fraction".to_string(),
                });
            }
        }
        if let Some(exposure) = config.posterior.exposure {
            if !(exposure > 0.0 && exposure.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: "posterior.exposure".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if config.solver.cache_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "solver.cache_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.lowcount/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut LowcountConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LowcountConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut LowcountConfig, other: &LowcountConfig) {
        // Intervals
        if other.intervals.confidence.is_some() {
            base.intervals.confidence = other.intervals.confidence;
        }
        if other.intervals.sigma.is_some() {
            base.intervals.sigma = other.intervals.sigma;
        }
        if other.intervals.sidedness.is_some() {
            base.intervals.sidedness = other.intervals.sidedness;
        }

        // Significance
        if other.significance.systematic.is_some() {
            base.significance.systematic = other.significance.systematic;
        }
        if other.significance.signed.is_some() {
            base.significance.signed = other.significance.signed;
        }

        // Posterior
        if other.posterior.exposure.is_some() {
            base.posterior.exposure = other.posterior.exposure;
        }
        if other.posterior.prior.is_some() {
            base.posterior.prior = other.posterior.prior;
        }
        if other.posterior.boundary.is_some() {
            base.posterior.boundary = other.posterior.boundary;
        }

        // Solver
        if other.solver.cache_capacity.is_some() {
            base.solver.cache_capacity = other.solver.cache_capacity;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LOWCOUNT_CONFIDENCE`, `LOWCOUNT_SYSTEMATIC`, etc.
    fn apply_env_overrides(config: &mut LowcountConfig) {
        if let Ok(val) = std::env::var("LOWCOUNT_CONFIDENCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.intervals.confidence = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_SIGMA") {
            if let Ok(v) = val.parse::<f64>() {
                config.intervals.sigma = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_SIDEDNESS") {
            match val.as_str() {
                "two_sided" => config.intervals.sidedness = Some(Sidedness::TwoSided),
                "one_sided" => config.intervals.sidedness = Some(Sidedness::OneSided),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_SYSTEMATIC") {
            if let Ok(v) = val.parse::<f64>() {
                config.significance.systematic = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_SIGNED") {
            if let Ok(v) = val.parse::<bool>() {
                config.significance.signed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_EXPOSURE") {
            if let Ok(v) = val.parse::<f64>() {
                config.posterior.exposure = Some(v);
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_PRIOR") {
            match val.as_str() {
                "uniform" => config.posterior.prior = Some(RatePrior::Uniform),
                "jeffreys" => config.posterior.prior = Some(RatePrior::Jeffreys),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("LOWCOUNT_BOUNDARY") {
            match val.as_str() {
                "point_mass" => config.posterior.boundary = Some(SignalBoundary::PointMass),
                "renormalize" => config.posterior.boundary = Some(SignalBoundary::Renormalize),
                _ => {}
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut LowcountConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.confidence {
            config.intervals.confidence = Some(v);
        }
        if let Some(v) = overrides.sigma {
            config.intervals.sigma = Some(v);
        }
        if let Some(v) = overrides.systematic {
            config.significance.systematic = Some(v);
        }
        if let Some(v) = overrides.signed {
            config.significance.signed = Some(v);
        }
        if let Some(v) = overrides.exposure {
            config.posterior.exposure = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns `~/.lowcount`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".lowcount"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
