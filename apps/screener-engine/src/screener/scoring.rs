//! Score normalization, weighted totals, filtering, and ranking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScreenerConfig;

use super::candidate::SpreadCandidate;
use super::metrics::{MeasuredSpread, clamp};

/// Two populations closer than this are treated as degenerate (all-equal)
/// during min-max scaling.
const MIN_MAX_EPSILON: f64 = 1e-12;

/// Min-max scale a raw metric population into [0, 1].
///
/// Boundary policy:
/// - Negative raw values are clipped to 0 before scaling - a negative ROI
///   never ranks above a break-even ROI.
/// - Non-finite raw values are treated as 0 after clipping; no NaN ever
///   reaches a score.
/// - An all-equal population maps to all 1.0 when the common value is
///   positive, all 0.0 otherwise - never a division by zero.
/// - The population maximum always maps to exactly 1.0.
#[must_use]
pub fn min_max_scores(raw: &[f64]) -> Vec<f64> {
    let clipped: Vec<f64> = raw
        .iter()
        .map(|&v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect();

    let Some(&max) = clipped
        .iter()
        .max_by(|a, b| a.total_cmp(b))
    else {
        return Vec::new();
    };
    #[allow(clippy::unwrap_used)] // non-empty: max above succeeded
    let min = *clipped.iter().min_by(|a, b| a.total_cmp(b)).unwrap();

    if max - min < MIN_MAX_EPSILON {
        let level = if max > 0.0 { 1.0 } else { 0.0 };
        return vec![level; clipped.len()];
    }

    clipped.iter().map(|v| (v - min) / (max - min)).collect()
}

/// A fully scored spread candidate.
///
/// Created once per ranking pass and never mutated - re-scoring produces
/// a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSpread {
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
    /// Population-normalized ROC score in [0, 1].
    pub roc_score: f64,
    /// Weighted total score in [0, 1].
    pub total_score: f64,
}

/// Combine metric scores into weighted totals.
///
/// ROC is normalized against the current population via
/// [`min_max_scores`]; the weight set was validated to sum to 1.0 when
/// the configuration loaded.
#[must_use]
pub fn score_spreads(measured: Vec<MeasuredSpread>, config: &ScreenerConfig) -> Vec<ScoredSpread> {
    let rocs: Vec<f64> = measured.iter().map(|m| m.spread.roc).collect();
    let roc_scores = min_max_scores(&rocs);
    let weights = &config.weights;

    measured
        .into_iter()
        .zip(roc_scores)
        .map(|(m, roc_score)| {
            let total = weights.roc * roc_score
                + weights.convexity * m.convexity_score
                + weights.slippage * m.slippage_score
                + weights.liquidity * m.liquidity_score
                + weights.prob * m.spread.prob_profit
                + weights.ease * m.ease_score;

            ScoredSpread {
                spread: m.spread,
                liquidity_score: m.liquidity_score,
                slippage_score: m.slippage_score,
                convexity_score: m.convexity_score,
                ease_score: m.ease_score,
                roc_score,
                total_score: clamp(total, 0.0, 1.0),
            }
        })
        .collect()
}

/// Apply the hard filters and rank by total score.
///
/// Retains only candidates meeting the IVP, liquidity, and slippage
/// floors; the survivors are stable-sorted by total score descending, so
/// ties preserve their original relative order.
#[must_use]
pub fn filter_and_sort(scored: Vec<ScoredSpread>, config: &ScreenerConfig) -> Vec<ScoredSpread> {
    let before = scored.len();
    let mut kept: Vec<ScoredSpread> = scored
        .into_iter()
        .filter(|s| {
            s.spread.ivp >= config.min_ivp
                && s.liquidity_score >= config.min_liquidity_score
                && s.slippage_score >= config.min_slippage_score
        })
        .collect();

    kept.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    debug!(before, after = kept.len(), "filtered and ranked spreads");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::metrics::compute_spread_metrics;
    use crate::screener::spread::SpreadType;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn candidate(roc: f64, ivp: f64) -> SpreadCandidate {
        SpreadCandidate {
            symbol: "SPY".to_string(),
            spread_type: SpreadType::Pcs,
            expiration: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            dte: 21,
            short_strike: 495.0,
            long_strike: 490.0,
            width: 5.0,
            credit: 1.0,
            max_loss: 4.0,
            roc,
            short_delta: -0.15,
            delta_estimated: false,
            prob_profit: 0.85,
            break_even: 494.0,
            break_even_distance_pct: 0.02,
            short_bid: 2.0,
            short_ask: 2.2,
            long_bid: 1.0,
            long_ask: 1.1,
            short_volume: 1000,
            long_volume: 800,
            short_oi: 5000,
            long_oi: 4000,
            ivp,
            underlying_price: 502.0,
        }
    }

    #[test]
    fn min_max_basic_bounds() {
        let scores = min_max_scores(&[0.0, 1.0, 2.0, 5.0, 10.0]);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        assert_eq!(scores[4], 1.0);
    }

    #[test]
    fn min_max_negative_values_score_zero() {
        let scores = min_max_scores(&[-1.0, -0.5, 0.0]);
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn min_max_preserves_ordering() {
        let scores = min_max_scores(&[0.5, 1.0, 2.0, 5.0]);
        assert!(scores[0] < scores[1]);
        assert!(scores[1] < scores[2]);
        assert!(scores[2] < scores[3]);
    }

    #[test]
    fn min_max_maximum_maps_to_one() {
        let scores = min_max_scores(&[0.5, 1.0, 5.0, 10.0]);
        assert_eq!(scores.iter().copied().fold(f64::MIN, f64::max), 1.0);
    }

    #[test]
    fn min_max_identical_positive_values_map_to_one() {
        assert_eq!(min_max_scores(&[1.0, 1.0, 1.0]), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn min_max_identical_zero_values_map_to_zero() {
        assert_eq!(min_max_scores(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn min_max_nan_treated_as_zero() {
        let scores = min_max_scores(&[1.0, f64::NAN, 2.0]);
        assert!(scores.iter().all(|s| s.is_finite()));
        assert_eq!(scores[1], 0.0);
        assert_eq!(scores[2], 1.0);
    }

    #[test]
    fn min_max_extreme_values_stay_bounded() {
        let scores = min_max_scores(&[1.0, 100.0, 1000.0]);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn min_max_empty_input() {
        assert!(min_max_scores(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn min_max_scores_always_bounded_and_monotone(
            raw in proptest::collection::vec(-1e6..1e6_f64, 1..40)
        ) {
            let scores = min_max_scores(&raw);
            prop_assert_eq!(scores.len(), raw.len());
            for s in &scores {
                prop_assert!((0.0..=1.0).contains(s));
            }
            // non-decreasing in the raw value
            for (i, a) in raw.iter().enumerate() {
                for (j, b) in raw.iter().enumerate() {
                    if a.max(0.0) <= b.max(0.0) {
                        prop_assert!(scores[i] <= scores[j] + 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn total_score_bounded_and_present() {
        let measured = compute_spread_metrics(vec![candidate(0.25, 50.0), candidate(0.35, 50.0)]);
        let scored = score_spreads(measured, &ScreenerConfig::default());

        assert_eq!(scored.len(), 2);
        for s in &scored {
            assert!((0.0..=1.0).contains(&s.total_score));
        }
    }

    #[test]
    fn all_weight_on_roc_ranks_by_roc() {
        let config = ScreenerConfig {
            weights: crate::config::SpreadWeights {
                roc: 1.0,
                convexity: 0.0,
                slippage: 0.0,
                liquidity: 0.0,
                prob: 0.0,
                ease: 0.0,
            },
            ..Default::default()
        };

        let measured = compute_spread_metrics(vec![candidate(0.25, 50.0), candidate(0.35, 50.0)]);
        let scored = score_spreads(measured, &config);

        assert!(scored[1].total_score > scored[0].total_score);
        assert_eq!(scored[1].total_score, 1.0);
    }

    #[test]
    fn filters_by_ivp_liquidity_slippage() {
        let config = ScreenerConfig {
            min_ivp: 40.0,
            min_liquidity_score: 0.1,
            min_slippage_score: 0.1,
            ..Default::default()
        };

        let measured = compute_spread_metrics(vec![
            candidate(0.25, 60.0),
            candidate(0.30, 30.0), // below min_ivp
        ]);
        let kept = filter_and_sort(score_spreads(measured, &config), &config);

        assert_eq!(kept.len(), 1);
        for s in &kept {
            assert!(s.spread.ivp >= config.min_ivp);
            assert!(s.liquidity_score >= config.min_liquidity_score);
            assert!(s.slippage_score >= config.min_slippage_score);
        }
    }

    #[test]
    fn sorts_by_total_score_descending() {
        let config = ScreenerConfig {
            min_ivp: 0.0,
            min_liquidity_score: 0.0,
            min_slippage_score: 0.0,
            ..Default::default()
        };

        let measured = compute_spread_metrics(vec![
            candidate(0.20, 50.0),
            candidate(0.40, 50.0),
            candidate(0.30, 50.0),
        ]);
        let ranked = filter_and_sort(score_spreads(measured, &config), &config);

        let scores: Vec<f64> = ranked.iter().map(|s| s.total_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn ties_preserve_original_order() {
        let config = ScreenerConfig {
            min_ivp: 0.0,
            min_liquidity_score: 0.0,
            min_slippage_score: 0.0,
            ..Default::default()
        };

        // identical candidates: identical scores; stable sort keeps order
        let mut first = candidate(0.25, 50.0);
        first.short_strike = 496.0;
        let second = candidate(0.25, 50.0);

        let measured = compute_spread_metrics(vec![first.clone(), second]);
        let ranked = filter_and_sort(score_spreads(measured, &config), &config);

        assert_eq!(ranked[0].spread.short_strike, 496.0);
    }
}
