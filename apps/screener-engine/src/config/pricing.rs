//! Pricing model configuration for delta estimation and Greeks.

use serde::{Deserialize, Serialize};

/// Pricing model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Risk-free rate (annualized).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Dividend yield (continuous, annualized).
    #[serde(default = "default_dividend_yield")]
    pub dividend_yield: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            dividend_yield: default_dividend_yield(),
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    0.05
}

const fn default_dividend_yield() -> f64 {
    0.013
}
