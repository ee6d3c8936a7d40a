//! LEAPS ranking configuration.

use serde::{Deserialize, Serialize};

/// Scoring mode for the LEAPS ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapsMode {
    /// Favor contracts the underlying can most easily reach (ease-heavy).
    HighProb,
    /// Favor contracts with the largest ROI at target (ROI-heavy).
    HighConvexity,
}

impl std::fmt::Display for LeapsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighProb => write!(f, "high_prob"),
            Self::HighConvexity => write!(f, "high_convexity"),
        }
    }
}

/// Ease/ROI weight pair for one scoring mode. Must sum to 1.0 at load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeapsModeWeights {
    /// Weight on the ease-of-touch score.
    pub ease_weight: f64,
    /// Weight on the normalized ROI score.
    pub roi_weight: f64,
}

impl LeapsModeWeights {
    /// Sum of the pair.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.ease_weight + self.roi_weight
    }
}

/// Per-mode scoring weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapsScoring {
    /// Weights for [`LeapsMode::HighProb`].
    #[serde(default = "default_high_prob")]
    pub high_prob: LeapsModeWeights,
    /// Weights for [`LeapsMode::HighConvexity`].
    #[serde(default = "default_high_convexity")]
    pub high_convexity: LeapsModeWeights,
}

impl LeapsScoring {
    /// Weights for the requested mode.
    #[must_use]
    pub const fn for_mode(&self, mode: LeapsMode) -> LeapsModeWeights {
        match mode {
            LeapsMode::HighProb => self.high_prob,
            LeapsMode::HighConvexity => self.high_convexity,
        }
    }
}

impl Default for LeapsScoring {
    fn default() -> Self {
        Self {
            high_prob: default_high_prob(),
            high_convexity: default_high_convexity(),
        }
    }
}

const fn default_high_prob() -> LeapsModeWeights {
    LeapsModeWeights {
        ease_weight: 0.85,
        roi_weight: 0.15,
    }
}

const fn default_high_convexity() -> LeapsModeWeights {
    LeapsModeWeights {
        ease_weight: 0.10,
        roi_weight: 0.90,
    }
}

/// Contract filters applied before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapsFilters {
    /// Minimum days to expiration.
    #[serde(default = "default_min_dte")]
    pub min_dte: i64,
    /// Keep only the single farthest expiration per symbol.
    #[serde(default = "default_longest_only")]
    pub longest_only: bool,
}

impl Default for LeapsFilters {
    fn default() -> Self {
        Self {
            min_dte: default_min_dte(),
            longest_only: default_longest_only(),
        }
    }
}

const fn default_min_dte() -> i64 {
    365
}

const fn default_longest_only() -> bool {
    true
}

/// Display options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeapsDisplay {
    /// Maximum ranked contracts to return.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for LeapsDisplay {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

const fn default_top_n() -> usize {
    20
}

/// LEAPS ranking configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeapsConfig {
    /// Per-mode scoring weights.
    #[serde(default)]
    pub scoring: LeapsScoring,
    /// Contract filters.
    #[serde(default)]
    pub filters: LeapsFilters,
    /// Display options.
    #[serde(default)]
    pub display: LeapsDisplay,
}
