//! Iron condor assembly and ranking.

use rayon::prelude::*;
use tracing::debug;

use crate::config::CondorWeights;
use crate::screener::CreditSpread;

use super::types::{IronCondor, IronCondorLeg, ScoredCondor};

/// Assemble every valid condor from the PCS x CCS cross product.
///
/// Cross products over heterogeneous inputs routinely produce invalid
/// shapes, so each combination validates independently and invalid ones
/// are silently excluded - a single bad pair never aborts the batch.
#[must_use]
pub fn build_iron_condors(
    put_spreads: &[CreditSpread],
    call_spreads: &[CreditSpread],
    underlying_price: f64,
    days_to_expiration: i64,
) -> Vec<IronCondor> {
    let condors: Vec<IronCondor> = put_spreads
        .par_iter()
        .flat_map_iter(|put| {
            call_spreads
                .iter()
                .filter_map(|call| {
                    let put_leg = IronCondorLeg::put(put.clone()).ok()?;
                    let call_leg = IronCondorLeg::call(call.clone()).ok()?;
                    IronCondor::new(put_leg, call_leg, underlying_price, days_to_expiration).ok()
                })
                .collect::<Vec<_>>()
        })
        .collect();

    debug!(
        puts = put_spreads.len(),
        calls = call_spreads.len(),
        condors = condors.len(),
        "assembled iron condors"
    );

    condors
}

/// Build, score, rank, and truncate condors.
///
/// Sorted by total score descending (stable); empty inputs produce empty
/// output.
#[must_use]
pub fn rank_iron_condors(
    put_spreads: &[CreditSpread],
    call_spreads: &[CreditSpread],
    underlying_price: f64,
    days_to_expiration: i64,
    top_n: usize,
    weights: &CondorWeights,
) -> Vec<ScoredCondor> {
    let mut scored: Vec<ScoredCondor> =
        build_iron_condors(put_spreads, call_spreads, underlying_price, days_to_expiration)
            .into_iter()
            .map(|condor| {
                let score = condor.score(weights);
                ScoredCondor { condor, score }
            })
            .collect();

    scored.sort_by(|a, b| b.score.total_score.total_cmp(&a.score.total_score));
    scored.truncate(top_n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::SpreadType;
    use chrono::NaiveDate;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()
    }

    fn pcs(short: f64, long: f64, credit: f64, delta: f64) -> CreditSpread {
        CreditSpread::new("QQQ", expiry(), SpreadType::Pcs, short, long, credit, delta, 0.08, 1200, 5500)
            .unwrap()
    }

    fn ccs(short: f64, long: f64, credit: f64, delta: f64) -> CreditSpread {
        CreditSpread::new("QQQ", expiry(), SpreadType::Ccs, short, long, credit, delta, 0.08, 1100, 5000)
            .unwrap()
    }

    fn put_spreads() -> Vec<CreditSpread> {
        vec![
            pcs(490.0, 485.0, 0.85, 0.12),
            pcs(495.0, 490.0, 1.10, 0.15),
        ]
    }

    fn call_spreads() -> Vec<CreditSpread> {
        vec![
            ccs(540.0, 545.0, 0.90, 0.12),
            ccs(535.0, 540.0, 1.15, 0.15),
        ]
    }

    #[test]
    fn builds_full_cross_product_when_all_valid() {
        let condors = build_iron_condors(&put_spreads(), &call_spreads(), 520.0, 45);
        assert_eq!(condors.len(), 4);
    }

    #[test]
    fn excludes_invalid_shapes() {
        // PCS struck above every CCS short: no valid combination
        let inverted = vec![pcs(550.0, 545.0, 1.0, 0.15)];
        let condors = build_iron_condors(&inverted, &call_spreads(), 520.0, 45);
        assert!(condors.is_empty());
    }

    #[test]
    fn excludes_mismatched_underlying() {
        let mut other = ccs(540.0, 545.0, 0.90, 0.12);
        other.underlying = "SPY".to_string();
        let condors = build_iron_condors(&put_spreads(), &[other], 520.0, 45);
        assert!(condors.is_empty());
    }

    #[test]
    fn excludes_mismatched_expiration() {
        let mut other = ccs(540.0, 545.0, 0.90, 0.12);
        other.expiration = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
        let condors = build_iron_condors(&put_spreads(), &[other], 520.0, 45);
        assert!(condors.is_empty());
    }

    #[test]
    fn one_bad_spread_does_not_abort_the_batch() {
        let mut calls = call_spreads();
        calls[0].underlying = "SPY".to_string();
        let condors = build_iron_condors(&put_spreads(), &calls, 520.0, 45);
        // 2 puts x 1 surviving call
        assert_eq!(condors.len(), 2);
    }

    #[test]
    fn ranks_by_total_score_descending() {
        let ranked = rank_iron_condors(
            &put_spreads(),
            &call_spreads(),
            520.0,
            45,
            20,
            &CondorWeights::default(),
        );

        let scores: Vec<f64> = ranked.iter().map(|c| c.score.total_score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn respects_top_n() {
        let ranked = rank_iron_condors(
            &put_spreads(),
            &call_spreads(),
            520.0,
            45,
            3,
            &CondorWeights::default(),
        );
        assert!(ranked.len() <= 3);
    }

    #[test]
    fn empty_inputs_produce_empty_output() {
        let ranked = rank_iron_condors(&[], &[], 520.0, 45, 20, &CondorWeights::default());
        assert!(ranked.is_empty());
    }
}
