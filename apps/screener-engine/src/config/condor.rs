//! Iron condor ranking configuration.

use serde::{Deserialize, Serialize};

/// Scoring weights for iron condors. Must sum to 1.0 at load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CondorWeights {
    /// Weight on the return-on-capital score.
    #[serde(default = "default_roc_weight")]
    pub roc: f64,
    /// Weight on probability of profit.
    #[serde(default = "default_pop_weight")]
    pub pop: f64,
    /// Weight on the wing-width score.
    #[serde(default = "default_width_weight")]
    pub width: f64,
    /// Weight on the liquidity score.
    #[serde(default = "default_liquidity_weight")]
    pub liquidity: f64,
    /// Weight on the tail-risk score.
    #[serde(default = "default_tail_weight")]
    pub tail: f64,
}

impl CondorWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.roc + self.pop + self.width + self.liquidity + self.tail
    }
}

impl Default for CondorWeights {
    fn default() -> Self {
        Self {
            roc: default_roc_weight(),
            pop: default_pop_weight(),
            width: default_width_weight(),
            liquidity: default_liquidity_weight(),
            tail: default_tail_weight(),
        }
    }
}

const fn default_roc_weight() -> f64 {
    0.30
}

const fn default_pop_weight() -> f64 {
    0.30
}

const fn default_width_weight() -> f64 {
    0.10
}

const fn default_liquidity_weight() -> f64 {
    0.15
}

const fn default_tail_weight() -> f64 {
    0.15
}

/// Iron condor ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondorConfig {
    /// Maximum ranked condors to return.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Scoring weights.
    #[serde(default)]
    pub weights: CondorWeights,
}

impl Default for CondorConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            weights: CondorWeights::default(),
        }
    }
}

const fn default_top_n() -> usize {
    20
}
