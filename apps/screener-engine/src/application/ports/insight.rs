//! Insight Port (Driven Port)
//!
//! Text-generation capability that turns a ranked screen into a short
//! narrative. Invoked by the boundary layer only, never by the core
//! pipelines.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Context handed to the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightContext {
    /// Underlying symbol.
    pub symbol: String,
    /// Ranked candidates, serialized by the boundary layer.
    pub ranked: serde_json::Value,
}

/// Structured summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightPayload {
    /// One-line headline.
    pub headline: String,
    /// Supporting bullet points.
    pub bullets: Vec<String>,
}

/// Insight generation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InsightError {
    /// The generator declined or failed.
    #[error("Insight generation failed: {message}")]
    Generation {
        /// Error details.
        message: String,
    },
}

/// Port for the summary generator.
#[async_trait]
pub trait InsightPort: Send + Sync {
    /// Summarize a ranked screen into a structured insight payload.
    async fn summarize(&self, context: &InsightContext) -> Result<InsightPayload, InsightError>;
}
