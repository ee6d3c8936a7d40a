//! Screen Spreads Use Case
//!
//! Orchestrates the full credit spread screen across the configured
//! tickers: fetch price, IV percentile (fail-open), and chains for every
//! expiration inside the DTE window, then run the pure pipeline
//! (build -> metrics -> score -> filter) and aggregate one ranked table.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::application::ports::{MarketDataPort, iv_percentile_or_default};
use crate::config::Config;
use crate::screener::{
    ScoredSpread, build_credit_spreads, compute_spread_metrics, filter_and_sort, score_spreads,
};

/// Use case for running the credit spread screen.
pub struct ScreenSpreadsUseCase<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    config: Config,
}

impl<M> ScreenSpreadsUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new screen use case.
    pub const fn new(market_data: Arc<M>, config: Config) -> Self {
        Self {
            market_data,
            config,
        }
    }

    /// Execute the screen across every configured ticker.
    ///
    /// Candidates from all tickers form one population: metric
    /// normalization and ranking run over the combined set so scores are
    /// comparable across the whole screen. Per-ticker upstream failures
    /// are logged and skip that ticker; an unknown or adversarial symbol
    /// therefore yields an empty contribution, never a crash.
    pub async fn execute(&self, as_of: NaiveDate) -> Vec<ScoredSpread> {
        let mut candidates = Vec::new();

        for symbol in self.config.tickers.keys() {
            match self.build_ticker_candidates(symbol, as_of).await {
                Ok(mut built) => candidates.append(&mut built),
                Err(error) => {
                    warn!(symbol, %error, "skipping ticker after upstream failure");
                }
            }
        }

        let measured = compute_spread_metrics(candidates);
        let scored = score_spreads(measured, &self.config.screener);
        let ranked = filter_and_sort(scored, &self.config.screener);
        info!(candidates = ranked.len(), "credit spread screen complete");
        ranked
    }

    /// Build raw candidates for a single ticker across its in-window
    /// expirations.
    async fn build_ticker_candidates(
        &self,
        symbol: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<crate::screener::SpreadCandidate>, crate::application::ports::MarketDataError>
    {
        let price = self.market_data.fetch_current_price(symbol).await?;
        let ivp = iv_percentile_or_default(self.market_data.as_ref(), symbol).await;

        let screener = &self.config.screener;
        let expirations: Vec<NaiveDate> = self
            .market_data
            .fetch_expirations(symbol)
            .await?
            .into_iter()
            .filter(|expiration| {
                let dte = (*expiration - as_of).num_days();
                dte >= screener.min_dte && dte <= screener.max_dte
            })
            .collect();

        let mut candidates = Vec::new();
        for expiration in expirations {
            match self.market_data.fetch_option_chain(symbol, expiration).await {
                Ok(chain) => {
                    candidates.extend(build_credit_spreads(
                        &chain,
                        price,
                        screener,
                        &self.config.pricing,
                        symbol,
                        ivp,
                    ));
                }
                Err(error) => {
                    warn!(symbol, %expiration, %error, "skipping expiration after chain fetch failure");
                }
            }
        }

        Ok(candidates)
    }
}
