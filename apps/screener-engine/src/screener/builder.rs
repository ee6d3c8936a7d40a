//! Credit spread construction from a chain snapshot.
//!
//! Enumerates ordered strike pairs among the OTM rows of one side of the
//! chain, applying the width/credit/delta/ROC constraints from
//! [`ScreenerConfig`]. The enumeration touches no shared state, so pairs
//! are generated on the rayon thread pool.

use rayon::prelude::*;
use tracing::debug;

use crate::chain::{OptionQuote, OptionType, otm_calls, otm_puts};
use crate::config::{PricingConfig, ScreenerConfig};
use crate::pricing::estimate_delta;
use crate::screener::candidate::SpreadCandidate;
use crate::screener::metrics::clamp;
use crate::screener::spread::SpreadType;

/// Build all valid credit spread candidates from a chain snapshot.
///
/// Puts with strikes below the underlying form PCS pairs; calls above it
/// form CCS pairs. ITM rows are excluded up front. Empty or single-row
/// chains, and chains yielding no valid pair, return an empty vector -
/// never an error.
#[must_use]
pub fn build_credit_spreads(
    chain: &[OptionQuote],
    underlying_price: f64,
    config: &ScreenerConfig,
    pricing: &PricingConfig,
    symbol: &str,
    ivp: f64,
) -> Vec<SpreadCandidate> {
    if chain.len() < 2 || underlying_price.is_nan() || underlying_price <= 0.0 {
        return Vec::new();
    }

    let puts = otm_puts(chain, underlying_price);
    let calls = otm_calls(chain, underlying_price);

    let mut candidates = build_pairs(
        &puts,
        SpreadType::Pcs,
        underlying_price,
        config,
        pricing,
        symbol,
        ivp,
    );
    candidates.extend(build_pairs(
        &calls,
        SpreadType::Ccs,
        underlying_price,
        config,
        pricing,
        symbol,
        ivp,
    ));

    debug!(
        symbol,
        total = candidates.len(),
        puts = puts.len(),
        calls = calls.len(),
        "built credit spread candidates"
    );

    candidates
}

/// Enumerate ordered (short, long) pairs within one side of the chain.
fn build_pairs(
    rows: &[&OptionQuote],
    spread_type: SpreadType,
    underlying_price: f64,
    config: &ScreenerConfig,
    pricing: &PricingConfig,
    symbol: &str,
    ivp: f64,
) -> Vec<SpreadCandidate> {
    rows.par_iter()
        .flat_map_iter(|&short| {
            rows.iter()
                .filter_map(|&long| {
                    build_pair(
                        short,
                        long,
                        spread_type,
                        underlying_price,
                        config,
                        pricing,
                        symbol,
                        ivp,
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Validate one (short, long) pair against the screener constraints.
///
/// Returns None for any rejected pair: wrong strike order, excessive
/// width, unpriceable legs, non-positive credit, delta outside the band,
/// or ROC below the floor.
#[allow(clippy::too_many_arguments)]
fn build_pair(
    short: &OptionQuote,
    long: &OptionQuote,
    spread_type: SpreadType,
    underlying_price: f64,
    config: &ScreenerConfig,
    pricing: &PricingConfig,
    symbol: &str,
    ivp: f64,
) -> Option<SpreadCandidate> {
    if short.expiration != long.expiration {
        return None;
    }
    if short.dte < config.min_dte || short.dte > config.max_dte {
        return None;
    }

    let width = match spread_type {
        SpreadType::Pcs => short.strike - long.strike,
        SpreadType::Ccs => long.strike - short.strike,
    };
    if width.is_nan() || width <= 0.0 || width > config.max_width {
        return None;
    }

    // Missing or crossed markets make the pair unpriceable; skip, never crash.
    if !short.has_priceable_market() || !long.has_priceable_market() {
        return None;
    }

    // Conservative fill: sell the short at bid, buy the long at ask.
    let credit = short.bid - long.ask;
    if credit <= 0.0 {
        return None;
    }

    let (short_delta, delta_estimated) = match short.delta.filter(|d| d.is_finite()) {
        Some(delta) => (delta, false),
        None => {
            let option_type = match spread_type {
                SpreadType::Pcs => OptionType::Put,
                SpreadType::Ccs => OptionType::Call,
            };
            let iv = short.implied_volatility.unwrap_or(0.0);
            let estimated = estimate_delta(
                short.strike,
                underlying_price,
                short.dte,
                iv,
                option_type,
                pricing,
            );
            (estimated, true)
        }
    };

    let delta_abs = short_delta.abs();
    if delta_abs < config.min_delta || delta_abs > config.max_delta {
        return None;
    }

    let max_loss = (width - credit).max(0.0);
    let roc = if max_loss > 0.0 { credit / max_loss } else { 0.0 };
    if roc < config.min_roc {
        return None;
    }

    let break_even = match spread_type {
        SpreadType::Pcs => short.strike - credit,
        SpreadType::Ccs => short.strike + credit,
    };
    let break_even_distance_pct = if underlying_price > 0.0 {
        (underlying_price - break_even).abs() / underlying_price
    } else {
        0.0
    };

    Some(SpreadCandidate {
        symbol: symbol.to_string(),
        spread_type,
        expiration: short.expiration,
        dte: short.dte,
        short_strike: short.strike,
        long_strike: long.strike,
        width,
        credit,
        max_loss,
        roc,
        short_delta,
        delta_estimated,
        prob_profit: clamp(1.0 - delta_abs, 0.0, 1.0),
        break_even,
        break_even_distance_pct,
        short_bid: short.bid,
        short_ask: short.ask,
        long_bid: long.bid,
        long_ask: long.ask,
        short_volume: short.volume,
        long_volume: long.volume,
        short_oi: short.open_interest,
        long_oi: long.open_interest,
        ivp,
        underlying_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()
    }

    fn quote(option_type: OptionType, strike: f64, bid: f64, ask: f64) -> OptionQuote {
        OptionQuote {
            contract_symbol: format!("SPY-{option_type}-{strike}"),
            option_type,
            strike,
            expiration: expiry(),
            dte: 21,
            last: (bid + ask) / 2.0,
            bid,
            ask,
            volume: 1000,
            open_interest: 5000,
            implied_volatility: Some(0.22),
            delta: None,
        }
    }

    /// Chain with OTM puts below 502 and OTM calls above it, premiums
    /// rising toward the money on both sides.
    fn mock_chain() -> Vec<OptionQuote> {
        let mut chain = Vec::new();
        for strike in [485.0, 490.0, 495.0, 500.0] {
            let base = 2.0 + (strike - 485.0) * 0.12;
            chain.push(quote(OptionType::Put, strike, base, base + 0.2));
        }
        for strike in [505.0, 510.0, 515.0, 520.0] {
            let base = 2.0 + (520.0 - strike) * 0.12;
            chain.push(quote(OptionType::Call, strike, base, base + 0.2));
        }
        chain
    }

    fn loose_config() -> ScreenerConfig {
        ScreenerConfig {
            min_delta: 0.05,
            max_delta: 0.45,
            min_roc: 0.05,
            ..Default::default()
        }
    }

    fn build(chain: &[OptionQuote], config: &ScreenerConfig) -> Vec<SpreadCandidate> {
        build_credit_spreads(chain, 502.0, config, &PricingConfig::default(), "SPY", 50.0)
    }

    #[test]
    fn builds_pcs_with_short_above_long() {
        let spreads = build(&mock_chain(), &loose_config());
        let pcs: Vec<_> = spreads
            .iter()
            .filter(|s| s.spread_type == SpreadType::Pcs)
            .collect();

        assert!(!pcs.is_empty());
        for spread in pcs {
            assert!(spread.short_strike > spread.long_strike);
            assert!(spread.credit > 0.0);
        }
    }

    #[test]
    fn builds_ccs_with_short_below_long() {
        let spreads = build(&mock_chain(), &loose_config());
        let ccs: Vec<_> = spreads
            .iter()
            .filter(|s| s.spread_type == SpreadType::Ccs)
            .collect();

        assert!(!ccs.is_empty());
        for spread in ccs {
            assert!(spread.short_strike < spread.long_strike);
            assert!(spread.credit > 0.0);
        }
    }

    #[test]
    fn respects_max_width() {
        let config = ScreenerConfig {
            max_width: 5.0,
            min_roc: 0.02,
            ..loose_config()
        };
        let spreads = build(&mock_chain(), &config);

        assert!(!spreads.is_empty());
        for spread in &spreads {
            assert!((spread.short_strike - spread.long_strike).abs() <= 5.0);
        }
    }

    #[test]
    fn respects_min_roc() {
        let config = ScreenerConfig {
            min_roc: 0.50,
            ..loose_config()
        };

        // Low-credit chain: all pairs fall below the ROC floor.
        let chain = vec![
            quote(OptionType::Put, 490.0, 0.50, 0.60),
            quote(OptionType::Put, 495.0, 0.50, 0.60),
        ];
        let spreads = build(&chain, &config);
        assert!(spreads.is_empty());
    }

    #[test]
    fn respects_delta_band() {
        // ATM-ish short put has |delta| ~0.4+, outside a tight band.
        let config = ScreenerConfig {
            min_delta: 0.01,
            max_delta: 0.05,
            min_roc: 0.0,
            ..Default::default()
        };
        let spreads = build(&mock_chain(), &config);
        for spread in &spreads {
            let d = spread.short_delta.abs();
            assert!((0.01..=0.05).contains(&d));
        }
    }

    #[test]
    fn estimated_delta_is_flagged() {
        let spreads = build(&mock_chain(), &loose_config());
        assert!(!spreads.is_empty());
        // mock chain supplies no deltas: everything is estimated
        assert!(spreads.iter().all(|s| s.delta_estimated));
    }

    #[test]
    fn chain_delta_is_used_when_present() {
        let mut chain = mock_chain();
        for row in &mut chain {
            row.delta = Some(if row.option_type == OptionType::Put { -0.20 } else { 0.20 });
        }
        let spreads = build(&chain, &loose_config());
        assert!(!spreads.is_empty());
        assert!(spreads.iter().all(|s| !s.delta_estimated));
        assert!(spreads.iter().all(|s| s.short_delta.abs() == 0.20));
    }

    #[test]
    fn empty_chain_returns_empty() {
        assert!(build(&[], &loose_config()).is_empty());
    }

    #[test]
    fn single_row_chain_returns_empty() {
        let chain = vec![quote(OptionType::Put, 495.0, 2.0, 2.2)];
        assert!(build(&chain, &loose_config()).is_empty());
    }

    #[test]
    fn all_itm_puts_build_nothing() {
        // Puts struck above the underlying are ITM and excluded.
        let chain = vec![
            quote(OptionType::Put, 505.0, 5.0, 5.5),
            quote(OptionType::Put, 510.0, 10.0, 10.5),
        ];
        let spreads = build_credit_spreads(
            &chain,
            500.0,
            &loose_config(),
            &PricingConfig::default(),
            "SPY",
            50.0,
        );
        assert!(spreads.is_empty());
    }

    #[test]
    fn nan_priced_legs_are_skipped_not_fatal() {
        let mut chain = mock_chain();
        chain[0].bid = f64::NAN;
        chain[1].ask = f64::NAN;

        let spreads = build(&chain, &loose_config());
        for spread in &spreads {
            assert!(spread.credit.is_finite());
            assert!(spread.short_bid.is_finite());
            assert!(spread.long_ask.is_finite());
        }
    }

    #[test]
    fn extreme_values_do_not_panic() {
        let chain = vec![
            quote(OptionType::Put, 1e10, 1e10, 1e10),
            quote(OptionType::Put, 0.001, 0.001, 0.001),
        ];
        let spreads = build(&chain, &ScreenerConfig::default());
        // Nothing sensible to build, but nothing crashes either.
        assert!(spreads.is_empty());
    }

    #[test]
    fn rejects_rows_outside_dte_window() {
        let mut chain = mock_chain();
        for row in &mut chain {
            row.dte = 90; // outside the default 14-30 window
        }
        assert!(build(&chain, &loose_config()).is_empty());
    }

    #[test]
    fn credit_is_short_bid_minus_long_ask() {
        let spreads = build(&mock_chain(), &loose_config());
        for spread in &spreads {
            let expected = spread.short_bid - spread.long_ask;
            assert!((spread.credit - expected).abs() < 1e-12);
        }
    }
}
