//! Screener Engine Binary
//!
//! Runs the full screening pipeline against the bundled sample feed and
//! prints ranked credit spreads, iron condors, and LEAPS candidates.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin screener-engine [config.yaml]
//! ```
//!
//! Without an argument the built-in defaults are used (SPY and QQQ
//! against the sample feed).
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::info;

use screener_engine::application::ports::{MarketDataPort, iv_percentile_or_default};
use screener_engine::application::use_cases::ScreenSpreadsUseCase;
use screener_engine::condor::rank_iron_condors;
use screener_engine::config::{Config, LeapsMode, TickerConfig, load_config};
use screener_engine::infrastructure::feed::SampleFeed;
use screener_engine::leaps::rank_leaps;
use screener_engine::observability::init_tracing;
use screener_engine::screener::{CreditSpread, SpreadType, format_output_table};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Some(&path)).with_context(|| format!("loading {path}"))?,
        None => default_config(),
    };

    let as_of = Utc::now().date_naive();
    let feed = Arc::new(SampleFeed::new(as_of));

    // Credit spreads
    let screen = ScreenSpreadsUseCase::new(Arc::clone(&feed), config.clone());
    let ranked = screen.execute(as_of).await;

    println!("Ranked credit spreads ({}):", ranked.len());
    println!("{}", format_output_table(&ranked));

    // Iron condors per ticker, assembled from the surviving spreads
    for symbol in config.tickers.keys() {
        let puts: Vec<CreditSpread> = ranked
            .iter()
            .filter(|s| s.spread.symbol == *symbol && s.spread.spread_type == SpreadType::Pcs)
            .filter_map(|s| s.spread.to_credit_spread().ok())
            .collect();
        let calls: Vec<CreditSpread> = ranked
            .iter()
            .filter(|s| s.spread.symbol == *symbol && s.spread.spread_type == SpreadType::Ccs)
            .filter_map(|s| s.spread.to_credit_spread().ok())
            .collect();

        let Some(reference) = ranked.iter().find(|s| s.spread.symbol == *symbol) else {
            continue;
        };

        let condors = rank_iron_condors(
            &puts,
            &calls,
            reference.spread.underlying_price,
            reference.spread.dte,
            config.condor.top_n,
            &config.condor.weights,
        );

        println!("Top iron condors for {symbol} ({}):", condors.len());
        for scored in &condors {
            let c = &scored.condor;
            println!(
                "  {}/{} | {}/{} credit={:.2} max_loss={:.2} BE=[{:.2}, {:.2}] pop={:.3} score={:.3}",
                c.short_put_strike(),
                c.long_put_strike(),
                c.short_call_strike(),
                c.long_call_strike(),
                c.total_credit(),
                c.max_loss_per_share(),
                c.breakeven_low(),
                c.breakeven_high(),
                scored.score.pop,
                scored.score.total_score,
            );
        }
    }

    // LEAPS per ticker, against the farthest sample expiration
    for (symbol, ticker) in &config.tickers {
        let Ok(price) = feed.fetch_current_price(symbol).await else {
            continue;
        };
        let ivp = iv_percentile_or_default(feed.as_ref(), symbol).await;
        let Ok(expirations) = feed.fetch_expirations(symbol).await else {
            continue;
        };

        let mut chain = Vec::new();
        for expiration in expirations {
            if (expiration - as_of).num_days() >= config.leaps.filters.min_dte {
                if let Ok(rows) = feed.fetch_option_chain(symbol, expiration).await {
                    chain.extend(rows);
                }
            }
        }

        let leaps = rank_leaps(
            &chain,
            price,
            symbol,
            ticker.target_pct,
            &config.leaps,
            LeapsMode::HighProb,
        );

        info!(symbol, ivp, candidates = leaps.len(), "LEAPS ranking complete");
        println!("Top LEAPS for {symbol} (target +{:.0}%):", ticker.target_pct * 100.0);
        for c in &leaps {
            println!(
                "  {} strike={:.0} exp={} premium={:.2} cost={:.0} roi@target={:.2} ease={:.3} score={:.3}",
                c.contract_symbol,
                c.strike,
                c.expiration,
                c.premium,
                c.cost,
                c.roi_target,
                c.ease_score,
                c.total_score,
            );
        }
    }

    Ok(())
}

/// Defaults used when no config file is supplied.
fn default_config() -> Config {
    let mut config = Config::default();
    config.tickers.insert("SPY".to_string(), TickerConfig::default());
    config.tickers.insert("QQQ".to_string(), TickerConfig::default());
    config
}
