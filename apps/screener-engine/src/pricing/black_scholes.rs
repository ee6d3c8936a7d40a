//! Black-Scholes delta estimation and Greeks.
//!
//! Degenerate inputs (non-positive price, strike, DTE, or IV) produce
//! neutral values (0.0 delta, all-None Greeks) rather than errors - sparse
//! real-world chains hit these paths routinely.

// Black-Scholes uses standard mathematical notation (s, k, t, r, q, sigma)
// Financial formulas use standard notation where mul_add() obscures meaning
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::chain::OptionType;
use crate::config::PricingConfig;

/// Days per year used to annualize DTE.
const DAYS_PER_YEAR: f64 = 365.0;

/// Standard normal CDF (cumulative distribution function).
fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal PDF (probability density function).
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter.
fn d1(s: f64, k: f64, t: f64, r: f64, q: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Round to 4 decimal places, mapping non-finite values to None.
fn round4(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some((value * 10_000.0).round() / 10_000.0)
    } else {
        None
    }
}

/// Estimate an option's delta from Black-Scholes d1.
///
/// This is the fallback used when a chain row carries no market delta;
/// consumers flag such candidates as `delta_estimated` so downstream
/// output can distinguish estimated from chain-provided deltas.
///
/// Returns 0.0 for degenerate inputs (`dte <= 0`, `iv <= 0`,
/// `underlying_price <= 0`, or `strike <= 0`) - there is no valid forward
/// pricing for them.
///
/// Puts return a negative delta by convention.
#[must_use]
pub fn estimate_delta(
    strike: f64,
    underlying_price: f64,
    dte: i64,
    iv: f64,
    option_type: OptionType,
    pricing: &PricingConfig,
) -> f64 {
    if dte <= 0 || iv <= 0.0 || underlying_price <= 0.0 || strike <= 0.0 {
        return 0.0;
    }

    let t = dte as f64 / DAYS_PER_YEAR;
    let q = pricing.dividend_yield;
    let d1_val = d1(underlying_price, strike, t, pricing.risk_free_rate, q, iv);

    match option_type {
        OptionType::Call => (-q * t).exp() * norm_cdf(d1_val),
        OptionType::Put => (-q * t).exp() * (norm_cdf(d1_val) - 1.0),
    }
}

/// Option Greeks, rounded to 4 decimal places.
///
/// Every field is None when the inputs were degenerate or the computation
/// produced a non-finite value - NaN never propagates to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta - sensitivity to underlying price.
    pub delta: Option<f64>,
    /// Gamma - rate of change of delta.
    pub gamma: Option<f64>,
    /// Theta - time decay per day.
    pub theta: Option<f64>,
    /// Vega - sensitivity per 1% change in IV.
    pub vega: Option<f64>,
    /// Rho - sensitivity per 1% change in rates.
    pub rho: Option<f64>,
}

impl Greeks {
    /// Greeks with every field None (degenerate inputs).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            rho: None,
        }
    }
}

/// Calculate full Black-Scholes Greeks for a single contract.
///
/// IV is auto-detected as percentage vs. decimal: values >= 1 are treated
/// as percentages and divided by 100.
///
/// Returns [`Greeks::none`] when `dte <= 0`, `iv <= 0`,
/// `underlying_price <= 0`, or `strike <= 0`.
#[must_use]
pub fn calculate_greeks(
    option_type: OptionType,
    strike: f64,
    underlying_price: f64,
    dte: i64,
    iv: f64,
    r: f64,
    q: f64,
) -> Greeks {
    if dte <= 0 || iv <= 0.0 || underlying_price <= 0.0 || strike <= 0.0 {
        return Greeks::none();
    }

    let s = underlying_price;
    let k = strike;
    let sigma = if iv < 1.0 { iv } else { iv / 100.0 };
    let t = dte as f64 / DAYS_PER_YEAR;
    let sqrt_t = t.sqrt();

    let d1_val = d1(s, k, t, r, q, sigma);
    let d2_val = d1_val - sigma * sqrt_t;
    let n_d1 = norm_pdf(d1_val);

    let (delta, rho) = match option_type {
        OptionType::Call => (
            (-q * t).exp() * norm_cdf(d1_val),
            k * t * (-r * t).exp() * norm_cdf(d2_val) / 100.0,
        ),
        OptionType::Put => (
            (-q * t).exp() * (norm_cdf(d1_val) - 1.0),
            -k * t * (-r * t).exp() * norm_cdf(-d2_val) / 100.0,
        ),
    };

    // Gamma and vega are identical for calls and puts
    let gamma = (-q * t).exp() * n_d1 / (s * sigma * sqrt_t);
    let vega = s * (-q * t).exp() * n_d1 * sqrt_t / 100.0;

    let common_term = -s * (-q * t).exp() * n_d1 * sigma / (2.0 * sqrt_t);
    let theta = match option_type {
        OptionType::Call => {
            (common_term - r * k * (-r * t).exp() * norm_cdf(d2_val)
                + q * s * (-q * t).exp() * norm_cdf(d1_val))
                / DAYS_PER_YEAR
        }
        OptionType::Put => {
            (common_term + r * k * (-r * t).exp() * norm_cdf(-d2_val)
                - q * s * (-q * t).exp() * norm_cdf(-d1_val))
                / DAYS_PER_YEAR
        }
    };

    Greeks {
        delta: round4(delta),
        gamma: round4(gamma),
        theta: round4(theta),
        vega: round4(vega),
        rho: round4(rho),
    }
}
