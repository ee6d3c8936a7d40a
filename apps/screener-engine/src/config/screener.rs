//! Credit spread screener configuration.

use serde::{Deserialize, Serialize};

/// Scoring weights for credit spreads.
///
/// Active (non-zero) weights must sum to 1.0; this is checked once at
/// config load, never per scoring call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadWeights {
    /// Weight on the normalized return-on-capital score.
    #[serde(default = "default_roc_weight")]
    pub roc: f64,
    /// Weight on the convexity score.
    #[serde(default = "default_convexity_weight")]
    pub convexity: f64,
    /// Weight on the slippage score.
    #[serde(default = "default_slippage_weight")]
    pub slippage: f64,
    /// Weight on the liquidity score.
    #[serde(default = "default_liquidity_weight")]
    pub liquidity: f64,
    /// Weight on probability of profit (inactive by default).
    #[serde(default)]
    pub prob: f64,
    /// Weight on the ease score (inactive by default).
    #[serde(default)]
    pub ease: f64,
}

impl SpreadWeights {
    /// Sum of all weights (active set).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.roc + self.convexity + self.slippage + self.liquidity + self.prob + self.ease
    }
}

impl Default for SpreadWeights {
    fn default() -> Self {
        Self {
            roc: default_roc_weight(),
            convexity: default_convexity_weight(),
            slippage: default_slippage_weight(),
            liquidity: default_liquidity_weight(),
            prob: 0.0,
            ease: 0.0,
        }
    }
}

const fn default_roc_weight() -> f64 {
    0.40
}

const fn default_convexity_weight() -> f64 {
    0.25
}

const fn default_slippage_weight() -> f64 {
    0.15
}

const fn default_liquidity_weight() -> f64 {
    0.20
}

/// Credit spread screener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Minimum days to expiration.
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    /// Maximum days to expiration.
    #[serde(default = "default_max_dte")]
    pub max_dte: i64,
    /// Minimum |delta| for the short strike.
    #[serde(default = "default_min_delta")]
    pub min_delta: f64,
    /// Maximum |delta| for the short strike.
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,
    /// Maximum spread width in dollars.
    #[serde(default = "default_max_width")]
    pub max_width: f64,
    /// Minimum return on capital (credit / max loss).
    #[serde(default = "default_min_roc")]
    pub min_roc: f64,
    /// Minimum IV percentile for the underlying.
    #[serde(default = "default_min_ivp")]
    pub min_ivp: f64,
    /// Minimum liquidity score to survive filtering.
    #[serde(default = "default_min_metric_score")]
    pub min_liquidity_score: f64,
    /// Minimum slippage score to survive filtering.
    #[serde(default = "default_min_metric_score")]
    pub min_slippage_score: f64,
    /// Scoring weights.
    #[serde(default)]
    pub weights: SpreadWeights,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            min_dte: default_min_dte(),
            max_dte: default_max_dte(),
            min_delta: default_min_delta(),
            max_delta: default_max_delta(),
            max_width: default_max_width(),
            min_roc: default_min_roc(),
            min_ivp: default_min_ivp(),
            min_liquidity_score: default_min_metric_score(),
            min_slippage_score: default_min_metric_score(),
            weights: SpreadWeights::default(),
        }
    }
}

const fn default_min_dte() -> i64 {
    14
}

const fn default_max_dte() -> i64 {
    30
}

const fn default_min_delta() -> f64 {
    0.08
}

const fn default_max_delta() -> f64 {
    0.35
}

const fn default_max_width() -> f64 {
    10.0
}

const fn default_min_roc() -> f64 {
    0.20
}

const fn default_min_ivp() -> f64 {
    40.0
}

const fn default_min_metric_score() -> f64 {
    0.10
}
