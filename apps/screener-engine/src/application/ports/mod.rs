//! Port definitions for external collaborators.

mod insight;
mod market_data;
mod score_store;

pub use insight::{InsightContext, InsightError, InsightPayload, InsightPort};
pub use market_data::{
    DEFAULT_IV_PERCENTILE, MarketDataError, MarketDataPort, iv_percentile_or_default,
};
pub use score_store::{ScoreSample, ScoreStoreError, ScoreStorePort};

#[cfg(test)]
pub use market_data::MockMarketDataPort;
