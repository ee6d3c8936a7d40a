//! Candidate records produced by the spread builder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ConstructionError;
use super::spread::{CreditSpread, SpreadType};

/// A candidate credit spread with full per-leg market data.
///
/// This is the rich row the builder emits for the metrics and scoring
/// stages; [`SpreadCandidate::to_credit_spread`] collapses it to the
/// compact [`CreditSpread`] consumed by the condor assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadCandidate {
    /// Underlying symbol.
    pub symbol: String,
    /// Spread type (PCS/CCS).
    pub spread_type: SpreadType,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Days to expiration.
    pub dte: i64,
    /// Short leg strike.
    pub short_strike: f64,
    /// Long leg strike.
    pub long_strike: f64,
    /// Strike width.
    pub width: f64,
    /// Net credit per share.
    pub credit: f64,
    /// Maximum loss per share.
    pub max_loss: f64,
    /// Return on capital (credit / max loss).
    pub roc: f64,
    /// Short leg delta (signed).
    pub short_delta: f64,
    /// Whether the short delta was Black-Scholes estimated rather than
    /// chain-provided. Surfaces in every output that shows the delta.
    pub delta_estimated: bool,
    /// Probability of profit (1 - |short delta|, clamped).
    pub prob_profit: f64,
    /// Break-even price at expiration.
    pub break_even: f64,
    /// Distance from spot to break-even, as a fraction of spot.
    pub break_even_distance_pct: f64,
    /// Short leg bid.
    pub short_bid: f64,
    /// Short leg ask.
    pub short_ask: f64,
    /// Long leg bid.
    pub long_bid: f64,
    /// Long leg ask.
    pub long_ask: f64,
    /// Short leg volume.
    pub short_volume: i64,
    /// Long leg volume.
    pub long_volume: i64,
    /// Short leg open interest.
    pub short_oi: i64,
    /// Long leg open interest.
    pub long_oi: i64,
    /// IV percentile of the underlying at screen time.
    pub ivp: f64,
    /// Underlying price at screen time.
    pub underlying_price: f64,
}

impl SpreadCandidate {
    /// Collapse to the compact [`CreditSpread`] value.
    ///
    /// Aggregates per-leg market data conservatively: the wider of the
    /// two legs' bid-ask spreads, the thinner leg's volume and open
    /// interest.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstructionError`] when the candidate's fields
    /// violate the spread invariants.
    pub fn to_credit_spread(&self) -> Result<CreditSpread, ConstructionError> {
        let short_spread = self.short_ask - self.short_bid;
        let long_spread = self.long_ask - self.long_bid;

        CreditSpread::new(
            self.symbol.clone(),
            self.expiration,
            self.spread_type,
            self.short_strike,
            self.long_strike,
            self.credit,
            self.short_delta,
            short_spread.max(long_spread),
            self.short_volume.min(self.long_volume),
            self.short_oi.min(self.long_oi),
        )
    }
}
