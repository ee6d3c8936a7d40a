//! Credit spread screening pipeline.
//!
//! Chain snapshot -> [`build_credit_spreads`] -> [`compute_spread_metrics`]
//! -> [`score_spreads`] -> [`filter_and_sort`] produces a ranked, filtered
//! sequence of scored spreads. Every stage is a pure function of its
//! inputs; empty inputs flow through as empty outputs.

mod builder;
mod candidate;
mod error;
mod format;
mod metrics;
mod scoring;
mod spread;

pub use builder::build_credit_spreads;
pub use candidate::SpreadCandidate;
pub use error::ConstructionError;
pub use format::format_output_table;
pub use metrics::{
    MeasuredSpread, clamp, compute_spread_metrics, convexity_score, ease_score, liquidity_score,
    slippage_score,
};
pub use scoring::{ScoredSpread, filter_and_sort, min_max_scores, score_spreads};
pub use spread::{CreditSpread, SpreadType};
