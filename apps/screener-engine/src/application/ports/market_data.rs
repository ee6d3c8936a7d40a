//! Market Data Port (Driven Port)
//!
//! Interface for fetching prices, option chains, and IV percentiles from
//! external providers. The core never calls these directly; the use-case
//! layer awaits them before entering the pure pipelines.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

#[cfg(test)]
use mockall::automock;

use crate::chain::OptionQuote;

/// Neutral IV percentile used when the provider cannot answer.
pub const DEFAULT_IV_PERCENTILE: f64 = 50.0;

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// No data exists for the symbol.
    #[error("No market data for symbol: {symbol}")]
    NotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Data temporarily unavailable.
    #[error("Market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// Upstream provider error.
    #[error("Market data provider error: {message}")]
    Upstream {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from external providers.
///
/// This is a driven (secondary/outbound) port; the infrastructure layer
/// provides implementations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Current price of the underlying.
    async fn fetch_current_price(&self, symbol: &str) -> Result<f64, MarketDataError>;

    /// Available expiration dates for the underlying, ascending.
    async fn fetch_expirations(&self, symbol: &str) -> Result<Vec<NaiveDate>, MarketDataError>;

    /// Option chain rows for one expiration.
    async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
    ) -> Result<Vec<OptionQuote>, MarketDataError>;

    /// IV percentile in [0, 100].
    async fn fetch_iv_percentile(&self, symbol: &str) -> Result<f64, MarketDataError>;
}

/// Fetch the IV percentile, failing open to [`DEFAULT_IV_PERCENTILE`].
///
/// This is the one documented fail-open in the data path: a ranking is
/// still useful against a neutral percentile, so an IVP fetch failure
/// never fails the whole screen.
pub async fn iv_percentile_or_default<P>(port: &P, symbol: &str) -> f64
where
    P: MarketDataPort + ?Sized,
{
    match port.fetch_iv_percentile(symbol).await {
        Ok(ivp) => ivp,
        Err(error) => {
            warn!(symbol, %error, "IV percentile fetch failed, using neutral default");
            DEFAULT_IV_PERCENTILE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn iv_percentile_passes_through_on_success() {
        let mut mock = MockMarketDataPort::new();
        mock.expect_fetch_iv_percentile()
            .returning(|_| Ok(62.5));

        assert_eq!(iv_percentile_or_default(&mock, "SPY").await, 62.5);
    }

    #[tokio::test]
    async fn iv_percentile_fails_open_to_neutral() {
        let mut mock = MockMarketDataPort::new();
        mock.expect_fetch_iv_percentile().returning(|_| {
            Err(MarketDataError::Upstream {
                message: "provider down".to_string(),
            })
        });

        assert_eq!(iv_percentile_or_default(&mock, "SPY").await, 50.0);
    }
}
