//! Per-candidate financial metrics.
//!
//! Every metric is a pure function of one candidate's fields, clamped to
//! [0, 1] through the shared [`clamp`] primitive. Empty input collections
//! produce empty output collections.

use serde::{Deserialize, Serialize};

use super::candidate::SpreadCandidate;

/// Open interest (thinner leg) at which the liquidity component saturates.
pub const OI_FULL_SCORE: f64 = 2_000.0;

/// Volume (thinner leg) at which the liquidity component saturates.
pub const VOLUME_FULL_SCORE: f64 = 500.0;

/// Open-interest weight inside the liquidity blend.
const LIQUIDITY_OI_WEIGHT: f64 = 0.6;

/// Volume weight inside the liquidity blend.
const LIQUIDITY_VOLUME_WEIGHT: f64 = 0.4;

/// Relative bid-ask spread at which the slippage score reaches zero.
pub const REL_SPREAD_MAX_FOR_SCORE: f64 = 0.25;

/// Expected-win to expected-loss ratio earning a full convexity score.
pub const CONVEXITY_RATIO_TARGET: f64 = 2.0;

/// Break-even cushion (fraction of spot) earning a full ease score.
pub const EASE_CUSHION_TARGET: f64 = 0.05;

/// Clamp a value into [lo, hi]. Identity within range, saturating at the
/// bounds. NaN input resolves to `lo` so NaN never escapes a metric.
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Liquidity score from the thinner leg's open interest and volume.
///
/// Monotonic non-decreasing in both inputs: thin markets score near 0,
/// deep markets saturate at 1.
#[must_use]
pub fn liquidity_score(min_open_interest: i64, min_volume: i64) -> f64 {
    let oi_part = clamp(min_open_interest as f64 / OI_FULL_SCORE, 0.0, 1.0);
    let volume_part = clamp(min_volume as f64 / VOLUME_FULL_SCORE, 0.0, 1.0);
    LIQUIDITY_OI_WEIGHT * oi_part + LIQUIDITY_VOLUME_WEIGHT * volume_part
}

/// Slippage score from a relative bid-ask spread (spread / mid).
///
/// Decreasing in the relative spread: tight markets score near 1. A
/// non-finite or negative input (no usable mid) scores 0.
#[must_use]
pub fn slippage_score(relative_spread: f64) -> f64 {
    if !relative_spread.is_finite() || relative_spread < 0.0 {
        return 0.0;
    }
    1.0 - clamp(relative_spread / REL_SPREAD_MAX_FOR_SCORE, 0.0, 1.0)
}

/// Convexity score: asymmetry of the expected win (credit weighted by POP)
/// against the expected loss (max loss weighted by 1 - POP).
#[must_use]
pub fn convexity_score(roc: f64, prob_profit: f64) -> f64 {
    if roc <= 0.0 {
        return 0.0;
    }
    let pop = clamp(prob_profit, 0.0, 1.0);
    if pop >= 1.0 {
        return 1.0;
    }
    let ratio = roc * pop / (1.0 - pop);
    clamp(ratio / CONVEXITY_RATIO_TARGET, 0.0, 1.0)
}

/// Ease score for a spread: how much cushion sits between spot and the
/// break-even, relative to the target cushion.
#[must_use]
pub fn ease_score(break_even_distance_pct: f64) -> f64 {
    clamp(break_even_distance_pct / EASE_CUSHION_TARGET, 0.0, 1.0)
}

/// The wider of the two legs' bid-ask spread relative to that leg's mid.
///
/// Infinite when a leg has no positive mid, which drives the slippage
/// score to 0 for effectively unpriceable markets.
fn wider_leg_relative_spread(candidate: &SpreadCandidate) -> f64 {
    let legs = [
        (candidate.short_bid, candidate.short_ask),
        (candidate.long_bid, candidate.long_ask),
    ];
    legs.into_iter()
        .map(|(bid, ask)| {
            let mid = (bid + ask) / 2.0;
            if mid > 0.0 { (ask - bid) / mid } else { f64::INFINITY }
        })
        .fold(0.0_f64, f64::max)
}

/// A spread candidate with its computed metric scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasuredSpread {
    /// The underlying candidate.
    pub spread: SpreadCandidate,
    /// Liquidity score in [0, 1].
    pub liquidity_score: f64,
    /// Slippage score in [0, 1].
    pub slippage_score: f64,
    /// Convexity score in [0, 1].
    pub convexity_score: f64,
    /// Ease score in [0, 1].
    pub ease_score: f64,
}

/// Compute the metric scores for each candidate.
#[must_use]
pub fn compute_spread_metrics(candidates: Vec<SpreadCandidate>) -> Vec<MeasuredSpread> {
    candidates
        .into_iter()
        .map(|spread| {
            let liquidity =
                liquidity_score(spread.short_oi.min(spread.long_oi), spread.short_volume.min(spread.long_volume));
            let slippage = slippage_score(wider_leg_relative_spread(&spread));
            let convexity = convexity_score(spread.roc, spread.prob_profit);
            let ease = ease_score(spread.break_even_distance_pct);

            MeasuredSpread {
                spread,
                liquidity_score: liquidity,
                slippage_score: slippage,
                convexity_score: convexity,
                ease_score: ease,
            }
        })
        .collect()
}
