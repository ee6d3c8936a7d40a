//! Deterministic sample market data feed.
//!
//! Serves a synthetic but realistically shaped option chain: premiums
//! decay exponentially away from the money, scale with the square root
//! of time, and carry Black-Scholes deltas. Used by the demo binary and
//! integration tests; real adapters live behind the same port in the
//! serving layer.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::chain::{OptionQuote, OptionType};
use crate::config::PricingConfig;
use crate::pricing::estimate_delta;

/// Implied volatility stamped on every generated row.
const SAMPLE_IV: f64 = 0.22;

/// Time value at the money, as a fraction of spot, for a 21-DTE chain.
const ATM_TIME_VALUE_PCT: f64 = 0.018;

/// Exponential decay length of time value, in dollars of strike distance.
const TIME_VALUE_DECAY: f64 = 15.0;

/// Half-width of the generated strike ladder, as a fraction of spot.
const STRIKE_SPAN_PCT: f64 = 0.15;

/// Strike ladder step in dollars.
const STRIKE_STEP: f64 = 5.0;

/// Deterministic sample feed keyed by an as-of date.
#[derive(Debug, Clone)]
pub struct SampleFeed {
    as_of: NaiveDate,
    prices: HashMap<String, f64>,
    pricing: PricingConfig,
}

impl SampleFeed {
    /// Create a sample feed seeded with a small default universe.
    #[must_use]
    pub fn new(as_of: NaiveDate) -> Self {
        let mut prices = HashMap::new();
        prices.insert("SPY".to_string(), 502.0);
        prices.insert("QQQ".to_string(), 520.0);

        Self {
            as_of,
            prices,
            pricing: PricingConfig::default(),
        }
    }

    /// Add or override a symbol's spot price.
    #[must_use]
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    fn price_of(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Synthetic premium for one contract: intrinsic plus decaying time
    /// value, scaled by sqrt of time.
    fn premium(&self, spot: f64, strike: f64, option_type: OptionType, dte: i64) -> f64 {
        let intrinsic = match option_type {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        };
        let tenor_scale = (dte as f64 / 21.0).sqrt();
        let time_value = spot
            * ATM_TIME_VALUE_PCT
            * (-(strike - spot).abs() / TIME_VALUE_DECAY).exp()
            * tenor_scale;
        intrinsic + time_value
    }

    fn build_row(
        &self,
        symbol: &str,
        spot: f64,
        strike: f64,
        option_type: OptionType,
        expiration: NaiveDate,
        dte: i64,
    ) -> OptionQuote {
        let premium = self.premium(spot, strike, option_type, dte);
        let delta = estimate_delta(strike, spot, dte, SAMPLE_IV, option_type, &self.pricing);

        let side = match option_type {
            OptionType::Call => "C",
            OptionType::Put => "P",
        };

        OptionQuote {
            contract_symbol: format!("{symbol}{}{side}{:08}", expiration.format("%y%m%d"), (strike * 1000.0) as i64),
            option_type,
            strike,
            expiration,
            dte,
            last: premium,
            bid: premium * 0.98,
            ask: premium * 1.02,
            volume: 1_000,
            open_interest: 5_000,
            implied_volatility: Some(SAMPLE_IV),
            delta: Some(delta),
        }
    }
}

#[async_trait]
impl MarketDataPort for SampleFeed {
    async fn fetch_current_price(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.price_of(symbol)
    }

    async fn fetch_expirations(&self, symbol: &str) -> Result<Vec<NaiveDate>, MarketDataError> {
        self.price_of(symbol)?;
        // One monthly inside the spread window, one long-dated for LEAPS.
        Ok(vec![
            self.as_of + Days::new(21),
            self.as_of + Days::new(500),
        ])
    }

    async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
    ) -> Result<Vec<OptionQuote>, MarketDataError> {
        let spot = self.price_of(symbol)?;
        let dte = (expiration - self.as_of).num_days();
        if dte <= 0 {
            return Ok(Vec::new());
        }

        let low = ((spot * (1.0 - STRIKE_SPAN_PCT)) / STRIKE_STEP).ceil() * STRIKE_STEP;
        let high = spot * (1.0 + STRIKE_SPAN_PCT);

        let mut chain = Vec::new();
        let mut strike = low;
        while strike <= high {
            chain.push(self.build_row(symbol, spot, strike, OptionType::Put, expiration, dte));
            chain.push(self.build_row(symbol, spot, strike, OptionType::Call, expiration, dte));
            strike += STRIKE_STEP;
        }

        Ok(chain)
    }

    async fn fetch_iv_percentile(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.price_of(symbol)?;
        Ok(55.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 28).unwrap()
    }

    #[tokio::test]
    async fn known_symbol_has_price_and_expirations() {
        let feed = SampleFeed::new(as_of());

        assert_eq!(feed.fetch_current_price("SPY").await.unwrap(), 502.0);
        let expirations = feed.fetch_expirations("SPY").await.unwrap();
        assert_eq!(expirations.len(), 2);
        assert!(expirations[0] < expirations[1]);
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let feed = SampleFeed::new(as_of());
        let err = feed.fetch_current_price("ZZZZ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotFound { .. }));
    }

    #[tokio::test]
    async fn chain_rows_are_otm_and_itm_priced_sanely() {
        let feed = SampleFeed::new(as_of());
        let expiration = as_of() + Days::new(21);
        let chain = feed.fetch_option_chain("SPY", expiration).await.unwrap();

        assert!(!chain.is_empty());
        for row in &chain {
            assert!(row.bid > 0.0 && row.ask > row.bid);
            assert_eq!(row.dte, 21);
            assert!(row.delta.is_some());
        }

        // premiums decay away from the money on the OTM side
        let otm_puts: Vec<_> = chain
            .iter()
            .filter(|q| q.option_type == OptionType::Put && q.strike < 502.0)
            .collect();
        for pair in otm_puts.windows(2) {
            assert!(pair[0].mid() <= pair[1].mid());
        }
    }

    #[tokio::test]
    async fn long_dated_chain_supports_leaps() {
        let feed = SampleFeed::new(as_of());
        let expiration = as_of() + Days::new(500);
        let chain = feed.fetch_option_chain("SPY", expiration).await.unwrap();

        assert!(chain.iter().all(|q| q.dte == 500));
        // longer tenor carries more time value than the monthly
        let monthly = feed
            .fetch_option_chain("SPY", as_of() + Days::new(21))
            .await
            .unwrap();
        let far_atm = chain.iter().find(|q| q.strike == 505.0 && q.option_type == OptionType::Call);
        let near_atm = monthly.iter().find(|q| q.strike == 505.0 && q.option_type == OptionType::Call);
        assert!(far_atm.unwrap().mid() > near_atm.unwrap().mid());
    }
}
