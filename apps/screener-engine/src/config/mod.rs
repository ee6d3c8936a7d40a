//! Configuration module for the screener engine.
//!
//! Provides YAML configuration loading with environment variable
//! interpolation and eager validation. Every numeric contract (weight
//! sums, delta ranges, percentile bounds) is checked at load time so the
//! scoring pipelines never have to re-validate per call.
//!
//! The YAML is parsed straight into typed structs; tagged constructs that
//! would imply deserialization-time code execution in looser formats are
//! rejected as parse errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use screener_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

mod condor;
mod leaps;
mod pricing;
mod screener;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use condor::{CondorConfig, CondorWeights};
pub use leaps::{LeapsConfig, LeapsDisplay, LeapsFilters, LeapsMode, LeapsModeWeights, LeapsScoring};
pub use pricing::PricingConfig;
pub use screener::{ScreenerConfig, SpreadWeights};

/// Tolerance for weight-sum checks.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Per-ticker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Upside price target as a fraction of spot (e.g. 0.16 = +16%).
    #[serde(default = "default_target_pct")]
    pub target_pct: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            target_pct: default_target_pct(),
        }
    }
}

const fn default_target_pct() -> f64 {
    0.16
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tickers to screen, with per-ticker settings.
    #[serde(default)]
    pub tickers: BTreeMap<String, TickerConfig>,
    /// Credit spread screener configuration.
    #[serde(default)]
    pub screener: ScreenerConfig,
    /// Iron condor ranking configuration.
    #[serde(default)]
    pub condor: CondorConfig,
    /// LEAPS ranking configuration.
    #[serde(default)]
    pub leaps: LeapsConfig,
    /// Pricing model configuration.
    #[serde(default)]
    pub pricing: PricingConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable
/// interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or
/// validated. Validation runs before the config is handed out, so no
/// scoring ever starts against an invalid weight set.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    let interpolated = interpolate_env_vars(&contents);

    let config: Config = serde_yaml_bw::from_str(&interpolated)?;

    validate_config(&config)?;

    Ok(config)
}

/// Replace `${VAR}` references with the environment variable's value.
///
/// Unset variables are left as-is so the subsequent parse surfaces a
/// useful error instead of silently substituting an empty string.
fn interpolate_env_vars(contents: &str) -> String {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    let pattern = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();

    pattern
        .replace_all(contents, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Validate a loaded configuration.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first offending
/// value.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_screener(&config.screener)?;
    validate_condor(&config.condor)?;
    validate_leaps(&config.leaps)?;

    for (symbol, ticker) in &config.tickers {
        if ticker.target_pct <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tickers.{symbol}.target_pct must be positive, got {}",
                ticker.target_pct
            )));
        }
    }

    Ok(())
}

fn validate_screener(screener: &ScreenerConfig) -> Result<(), ConfigError> {
    if screener.min_dte < 0 || screener.min_dte > screener.max_dte {
        return Err(ConfigError::ValidationError(format!(
            "screener DTE window invalid: min_dte={}, max_dte={}",
            screener.min_dte, screener.max_dte
        )));
    }
    if !(0.0..=1.0).contains(&screener.min_delta)
        || !(0.0..=1.0).contains(&screener.max_delta)
        || screener.min_delta > screener.max_delta
    {
        return Err(ConfigError::ValidationError(format!(
            "screener delta band invalid: min_delta={}, max_delta={}",
            screener.min_delta, screener.max_delta
        )));
    }
    if screener.max_width <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "screener.max_width must be positive, got {}",
            screener.max_width
        )));
    }
    if screener.min_roc < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "screener.min_roc must be non-negative, got {}",
            screener.min_roc
        )));
    }
    if !(0.0..=100.0).contains(&screener.min_ivp) {
        return Err(ConfigError::ValidationError(format!(
            "screener.min_ivp must be within [0, 100], got {}",
            screener.min_ivp
        )));
    }
    for (name, value) in [
        ("min_liquidity_score", screener.min_liquidity_score),
        ("min_slippage_score", screener.min_slippage_score),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "screener.{name} must be within [0, 1], got {value}"
            )));
        }
    }

    let w = &screener.weights;
    for (name, value) in [
        ("roc", w.roc),
        ("convexity", w.convexity),
        ("slippage", w.slippage),
        ("liquidity", w.liquidity),
        ("prob", w.prob),
        ("ease", w.ease),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "screener.weights.{name} must be within [0, 1], got {value}"
            )));
        }
    }
    if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationError(format!(
            "screener weights must sum to 1.0, got {}",
            w.sum()
        )));
    }

    Ok(())
}

fn validate_condor(condor: &CondorConfig) -> Result<(), ConfigError> {
    let w = &condor.weights;
    for (name, value) in [
        ("roc", w.roc),
        ("pop", w.pop),
        ("width", w.width),
        ("liquidity", w.liquidity),
        ("tail", w.tail),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "condor.weights.{name} must be within [0, 1], got {value}"
            )));
        }
    }
    if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::ValidationError(format!(
            "condor weights must sum to 1.0, got {}",
            w.sum()
        )));
    }
    Ok(())
}

fn validate_leaps(leaps: &LeapsConfig) -> Result<(), ConfigError> {
    for (mode, weights) in [
        ("high_prob", leaps.scoring.high_prob),
        ("high_convexity", leaps.scoring.high_convexity),
    ] {
        if !(0.0..=1.0).contains(&weights.ease_weight) || !(0.0..=1.0).contains(&weights.roi_weight)
        {
            return Err(ConfigError::ValidationError(format!(
                "leaps.scoring.{mode} weights must be within [0, 1]"
            )));
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::ValidationError(format!(
                "leaps.scoring.{mode} weights must sum to 1.0, got {}",
                weights.sum()
            )));
        }
    }
    if leaps.filters.min_dte < 0 {
        return Err(ConfigError::ValidationError(format!(
            "leaps.filters.min_dte must be non-negative, got {}",
            leaps.filters.min_dte
        )));
    }
    Ok(())
}
