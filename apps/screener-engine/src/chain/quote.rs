//! Per-contract chain rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// A single option contract snapshot row.
///
/// Rows arrive from the market-data port with whatever the provider had;
/// missing numeric fields surface as NaN (prices) or None (IV, delta) and
/// every consumer defines its own behavior for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Contract identifier (e.g. `SPY251219P00495000`).
    pub contract_symbol: String,
    /// Option type (call/put).
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Days to expiration at snapshot time.
    pub dte: i64,
    /// Last traded price.
    pub last: f64,
    /// Bid price.
    pub bid: f64,
    /// Ask price.
    pub ask: f64,
    /// Trading volume.
    pub volume: i64,
    /// Open interest.
    pub open_interest: i64,
    /// Implied volatility (decimal), when the provider supplied one.
    pub implied_volatility: Option<f64>,
    /// Market delta, when the provider supplied one.
    pub delta: Option<f64>,
}

impl OptionQuote {
    /// Midpoint of bid/ask. NaN when either side is missing.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Whether the row carries a usable two-sided market.
    ///
    /// Requires finite bid and ask, a non-negative bid, and ask >= bid.
    #[must_use]
    pub fn has_priceable_market(&self) -> bool {
        self.bid.is_finite() && self.ask.is_finite() && self.bid >= 0.0 && self.ask >= self.bid
    }
}

/// OTM puts: strike strictly below the underlying price.
///
/// ITM rows are excluded - they cannot form the target credit-spread shape.
#[must_use]
pub fn otm_puts(chain: &[OptionQuote], underlying_price: f64) -> Vec<&OptionQuote> {
    chain
        .iter()
        .filter(|q| q.option_type == OptionType::Put && q.strike < underlying_price)
        .collect()
}

/// OTM calls: strike strictly above the underlying price.
#[must_use]
pub fn otm_calls(chain: &[OptionQuote], underlying_price: f64) -> Vec<&OptionQuote> {
    chain
        .iter()
        .filter(|q| q.option_type == OptionType::Call && q.strike > underlying_price)
        .collect()
}
