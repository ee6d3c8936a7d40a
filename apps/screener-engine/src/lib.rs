// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Screener Engine - Options Strategy Ranking Core
//!
//! Deterministic screening and ranking engine for options strategies:
//! vertical credit spreads (PCS/CCS), iron condors, and long-dated calls
//! (LEAPS).
//!
//! # Architecture (Hexagonal)
//!
//! - **Core**: pure, synchronous pipelines with no I/O
//!   - `pricing`: Black-Scholes delta estimation and full Greeks
//!   - `chain`: option-chain snapshot rows and OTM partitioning
//!   - `screener`: spread construction, metrics, scoring, ranking
//!   - `condor`: iron condor assembly, scoring, payoff/ROI curves
//!   - `leaps`: single-leg long-call ranking
//!
//! - **Application**: use cases and port definitions
//!   - `ports`: interfaces for external collaborators
//!     (`MarketDataPort`, `ScoreStorePort`, `InsightPort`)
//!   - `use_cases`: `ScreenSpreadsUseCase` orchestration
//!
//! - **Infrastructure**: adapters
//!   - `feed`: deterministic sample feed for demos and integration tests
//!
//! All market data enters through the ports before the core runs; the core
//! itself never initiates network calls and holds no state between
//! invocations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Layers
// =============================================================================

/// Application layer - Use cases and port definitions.
pub mod application;

/// Option-chain snapshot types.
pub mod chain;

/// Iron condor assembly, scoring, and payoff curves.
pub mod condor;

/// Configuration loading and validation.
pub mod config;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

/// LEAPS (long-dated call) ranking pipeline.
pub mod leaps;

/// Observability (tracing initialization).
pub mod observability;

/// Black-Scholes pricing math.
pub mod pricing;

/// Credit spread construction, metrics, and scoring.
pub mod screener;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{
    InsightPort, MarketDataError, MarketDataPort, ScoreStorePort, iv_percentile_or_default,
};
pub use application::use_cases::ScreenSpreadsUseCase;
pub use chain::{OptionQuote, OptionType};
pub use condor::{
    CurvePoint, CurveRange, IronCondor, IronCondorLeg, ScoredCondor, build_iron_condors,
    payoff_per_contract, payoff_roi_curve, rank_iron_condors, roi_at_price,
};
pub use config::{Config, ConfigError, ScreenerConfig, load_config};
pub use infrastructure::feed::SampleFeed;
pub use leaps::{LeapsMode, ScoredLeaps, rank_leaps};
pub use pricing::{Greeks, calculate_greeks, estimate_delta};
pub use screener::{
    ConstructionError, CreditSpread, ScoredSpread, SpreadCandidate, SpreadType,
    build_credit_spreads, compute_spread_metrics, filter_and_sort, score_spreads,
};
