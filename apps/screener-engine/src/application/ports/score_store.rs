//! Score Store Port (Driven Port)
//!
//! Opaque key-value capability for score history. The boundary layer
//! reads and writes series around each screen; the core never touches it.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical score observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSample {
    /// Observation date.
    pub as_of: NaiveDate,
    /// Best total score observed that day.
    pub total_score: f64,
}

/// Score store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScoreStoreError {
    /// Storage backend failure.
    #[error("Score store error: {message}")]
    Storage {
        /// Error details.
        message: String,
    },
}

/// Port for the score-history store.
#[async_trait]
pub trait ScoreStorePort: Send + Sync {
    /// Read the stored series for a symbol, if any.
    async fn get(&self, symbol: &str) -> Result<Option<Vec<ScoreSample>>, ScoreStoreError>;

    /// Replace the stored series for a symbol.
    async fn put(&self, symbol: &str, samples: Vec<ScoreSample>) -> Result<(), ScoreStoreError>;
}
