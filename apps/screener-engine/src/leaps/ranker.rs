//! Long-dated call ranking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::{OptionQuote, OptionType};
use crate::condor::CONTRACT_MULTIPLIER;
use crate::config::{LeapsConfig, LeapsMode};
use crate::screener::{clamp, min_max_scores};

/// Required move to break even (fraction of spot) at which the ease
/// component bottoms out.
const MOVE_REQUIRED_MAX: f64 = 0.50;

/// Open interest at which the ease liquidity component saturates.
const OI_FULL_SCORE: f64 = 2_000.0;

/// Relative bid-ask spread at which the ease spread component bottoms out.
const REL_SPREAD_MAX: f64 = 0.25;

/// Ease blend weights: required move dominates, then depth, then spread.
const EASE_MOVE_WEIGHT: f64 = 0.60;
const EASE_OI_WEIGHT: f64 = 0.25;
const EASE_SPREAD_WEIGHT: f64 = 0.15;

/// A ranked LEAPS contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredLeaps {
    /// Contract identifier.
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Expiration date.
    pub expiration: NaiveDate,
    /// Days to expiration.
    pub dte: i64,
    /// Entry premium per share (mid when priceable, else last).
    pub premium: f64,
    /// Cost per contract (premium x 100).
    pub cost: f64,
    /// Target underlying price.
    pub target_price: f64,
    /// Intrinsic payoff per contract at the target price.
    pub payoff_at_target: f64,
    /// ROI at target: (payoff - cost) / cost, 0 when cost is 0.
    pub roi_target: f64,
    /// Ease-of-touch score in [0, 1].
    pub ease_score: f64,
    /// Population-normalized ROI score in [0, 1].
    pub roi_score: f64,
    /// Weighted total score in [0, 1].
    pub total_score: f64,
    /// Trading volume.
    pub volume: i64,
    /// Open interest.
    pub open_interest: i64,
}

/// Rank long-dated calls against an upside price target.
///
/// Filters to calls with `dte >= min_dte` (optionally only the single
/// farthest expiration), prices each entry conservatively, scores, and
/// returns the top `display.top_n` sorted by total score descending.
/// Rows without a usable premium are skipped. Empty chains produce empty
/// output.
#[must_use]
pub fn rank_leaps(
    chain: &[OptionQuote],
    underlying_price: f64,
    symbol: &str,
    target_pct: f64,
    config: &LeapsConfig,
    mode: LeapsMode,
) -> Vec<ScoredLeaps> {
    if chain.is_empty() || underlying_price.is_nan() || underlying_price <= 0.0 {
        return Vec::new();
    }

    let mut calls: Vec<&OptionQuote> = chain
        .iter()
        .filter(|q| q.option_type == OptionType::Call && q.dte >= config.filters.min_dte)
        .collect();

    if config.filters.longest_only {
        if let Some(farthest) = calls.iter().map(|q| q.expiration).max() {
            calls.retain(|q| q.expiration == farthest);
        }
    }

    let target_price = underlying_price * (1.0 + target_pct);

    let mut candidates: Vec<ScoredLeaps> = calls
        .into_iter()
        .filter_map(|q| build_candidate(q, underlying_price, target_price))
        .collect();

    let rois: Vec<f64> = candidates.iter().map(|c| c.roi_target).collect();
    let roi_scores = min_max_scores(&rois);
    let weights = config.scoring.for_mode(mode);

    for (candidate, roi_score) in candidates.iter_mut().zip(roi_scores) {
        candidate.roi_score = roi_score;
        candidate.total_score = clamp(
            weights.ease_weight * candidate.ease_score + weights.roi_weight * roi_score,
            0.0,
            1.0,
        );
    }

    candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    candidates.truncate(config.display.top_n);

    debug!(symbol, %mode, ranked = candidates.len(), "ranked LEAPS candidates");
    candidates
}

/// Cost and score one contract. None when no usable premium exists.
fn build_candidate(
    quote: &OptionQuote,
    underlying_price: f64,
    target_price: f64,
) -> Option<ScoredLeaps> {
    let premium = entry_premium(quote)?;

    let cost = premium * CONTRACT_MULTIPLIER;
    let payoff_at_target = (target_price - quote.strike).max(0.0) * CONTRACT_MULTIPLIER;
    let roi_target = if cost > 0.0 {
        (payoff_at_target - cost) / cost
    } else {
        0.0
    };

    let required_move = ((quote.strike + premium) / underlying_price - 1.0).max(0.0);
    let move_part = 1.0 - clamp(required_move / MOVE_REQUIRED_MAX, 0.0, 1.0);
    let oi_part = clamp(quote.open_interest as f64 / OI_FULL_SCORE, 0.0, 1.0);
    let spread_part = if quote.has_priceable_market() && quote.mid() > 0.0 {
        1.0 - clamp((quote.ask - quote.bid) / quote.mid() / REL_SPREAD_MAX, 0.0, 1.0)
    } else {
        0.0
    };
    let ease_score =
        EASE_MOVE_WEIGHT * move_part + EASE_OI_WEIGHT * oi_part + EASE_SPREAD_WEIGHT * spread_part;

    Some(ScoredLeaps {
        contract_symbol: quote.contract_symbol.clone(),
        strike: quote.strike,
        expiration: quote.expiration,
        dte: quote.dte,
        premium,
        cost,
        target_price,
        payoff_at_target,
        roi_target,
        ease_score,
        roi_score: 0.0,
        total_score: 0.0,
        volume: quote.volume,
        open_interest: quote.open_interest,
    })
}

/// Conservative entry premium: the mid when the market is two-sided,
/// otherwise the last trade. None when neither is usable.
fn entry_premium(quote: &OptionQuote) -> Option<f64> {
    if quote.has_priceable_market() && quote.mid() > 0.0 {
        return Some(quote.mid());
    }
    if quote.last.is_finite() && quote.last > 0.0 {
        return Some(quote.last);
    }
    None
}
