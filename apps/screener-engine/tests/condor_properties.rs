//! Property tests for condor payoff geometry.

use chrono::NaiveDate;
use proptest::prelude::*;

use screener_engine::condor::{
    CurveRange, IronCondor, IronCondorLeg, payoff_per_contract, payoff_roi_curve, roi_at_price,
};
use screener_engine::screener::{CreditSpread, SpreadType};

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()
}

/// Arbitrary valid condor with real break-evens (credit below each wing
/// width, short put strictly below short call).
fn condor_strategy() -> impl Strategy<Value = IronCondor> {
    (
        80.0..100.0_f64,  // short put strike
        1.0..10.0_f64,    // put width
        0.5..15.0_f64,    // gap between short strikes
        1.0..10.0_f64,    // call width
        0.05..0.95_f64,   // credit as fraction of the thinner wing
        0.01..0.45_f64,   // put short delta magnitude
        0.01..0.45_f64,   // call short delta magnitude
    )
        .prop_map(
            |(short_put, put_width, gap, call_width, credit_frac, dput, dcall)| {
                let short_call = short_put + gap;
                let total_credit = credit_frac * put_width.min(call_width);

                let pcs = CreditSpread::new(
                    "TEST",
                    expiry(),
                    SpreadType::Pcs,
                    short_put,
                    short_put - put_width,
                    total_credit / 2.0,
                    -dput,
                    0.05,
                    500,
                    1000,
                )
                .unwrap();
                let ccs = CreditSpread::new(
                    "TEST",
                    expiry(),
                    SpreadType::Ccs,
                    short_call,
                    short_call + call_width,
                    total_credit / 2.0,
                    dcall,
                    0.05,
                    500,
                    1000,
                )
                .unwrap();

                IronCondor::new(
                    IronCondorLeg::put(pcs).unwrap(),
                    IronCondorLeg::call(ccs).unwrap(),
                    (short_put + short_call) / 2.0,
                    30,
                )
                .unwrap()
            },
        )
}

proptest! {
    #[test]
    fn payoff_is_zero_at_both_breakevens(condor in condor_strategy()) {
        prop_assert!(payoff_per_contract(&condor, condor.breakeven_low()).abs() < 1e-6);
        prop_assert!(payoff_per_contract(&condor, condor.breakeven_high()).abs() < 1e-6);
    }

    #[test]
    fn payoff_plateau_and_floors_bound_the_curve(condor in condor_strategy()) {
        let curve = payoff_roi_curve(
            &condor,
            CurveRange { move_low_pct: -0.90, move_high_pct: 0.90, step_pct: 0.01 },
        );
        prop_assert!(!curve.is_empty());
        for point in &curve {
            prop_assert!(point.payoff <= condor.max_profit_dollars() + 1e-9);
            prop_assert!(point.payoff >= -condor.max_loss_dollars() - 1e-9);
        }
    }

    #[test]
    fn payoff_is_unimodal_tent(condor in condor_strategy()) {
        let curve = payoff_roi_curve(
            &condor,
            CurveRange { move_low_pct: -0.90, move_high_pct: 0.90, step_pct: 0.005 },
        );

        // once the payoff starts decreasing it never increases again
        let mut decreasing = false;
        for pair in curve.windows(2) {
            let delta = pair[1].payoff - pair[0].payoff;
            if delta < -1e-9 {
                decreasing = true;
            } else if delta > 1e-9 {
                prop_assert!(!decreasing, "payoff rose after falling");
            }
        }
    }

    #[test]
    fn roi_matches_payoff_over_max_loss(condor in condor_strategy()) {
        for price in [0.0, condor.breakeven_low(), condor.underlying_price, condor.breakeven_high(), 1e4] {
            let roi = roi_at_price(&condor, price);
            let expected = payoff_per_contract(&condor, price) / condor.max_loss_dollars();
            prop_assert!((roi - expected).abs() < 1e-9);
            prop_assert!(roi >= -1.0 - 1e-9);
        }
    }

    #[test]
    fn derived_financials_are_consistent(condor in condor_strategy()) {
        prop_assert!((condor.total_credit() - (condor.credit_pcs() + condor.credit_ccs())).abs() < 1e-12);
        prop_assert!(condor.max_loss_per_share() >= 0.0);
        prop_assert!(condor.breakeven_low() < condor.breakeven_high());
        prop_assert!(condor.short_put_strike() < condor.short_call_strike());
    }
}
