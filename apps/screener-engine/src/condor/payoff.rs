//! Piecewise-linear condor payoff and ROI curves.

use serde::{Deserialize, Serialize};

use crate::screener::clamp;

use super::types::IronCondor;

/// Shares per standard equity option contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Payoff per contract (dollars) of a short condor at expiration.
///
/// The position keeps the full credit between the short strikes, gives
/// back each wing's intrinsic value linearly through the breached side,
/// and bottoms out at the wing width beyond the long strikes. The payoff
/// is exactly zero at both break-evens. A non-finite price yields 0.0.
#[must_use]
pub fn payoff_per_contract(condor: &IronCondor, price_at_expiration: f64) -> f64 {
    if !price_at_expiration.is_finite() {
        return 0.0;
    }

    let put_give_back = clamp(
        condor.short_put_strike() - price_at_expiration,
        0.0,
        condor.put_width(),
    );
    let call_give_back = clamp(
        price_at_expiration - condor.short_call_strike(),
        0.0,
        condor.call_width(),
    );

    (condor.total_credit() - put_give_back - call_give_back) * CONTRACT_MULTIPLIER
}

/// ROI at a given expiration price: payoff over max loss.
///
/// Defined as 0.0 when the condor has no loss basis (max loss of zero).
#[must_use]
pub fn roi_at_price(condor: &IronCondor, price_at_expiration: f64) -> f64 {
    let max_loss_dollars = condor.max_loss_dollars();
    if max_loss_dollars > 0.0 {
        payoff_per_contract(condor, price_at_expiration) / max_loss_dollars
    } else {
        0.0
    }
}

/// Sampling range for [`payoff_roi_curve`], in fractional moves off spot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurveRange {
    /// Lowest sampled move (e.g. -0.20 = -20%).
    pub move_low_pct: f64,
    /// Highest sampled move.
    pub move_high_pct: f64,
    /// Step between samples.
    pub step_pct: f64,
}

impl Default for CurveRange {
    fn default() -> Self {
        Self {
            move_low_pct: -0.20,
            move_high_pct: 0.20,
            step_pct: 0.01,
        }
    }
}

/// One sampled point of the payoff/ROI curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Fractional move off spot.
    pub move_pct: f64,
    /// Underlying price at that move.
    pub price: f64,
    /// Payoff per contract in dollars.
    pub payoff: f64,
    /// ROI against max loss.
    pub roi: f64,
}

/// Sample the payoff/ROI curve at evenly spaced moves off spot,
/// inclusive of both bounds, in ascending move order.
///
/// A non-positive or non-finite step, or an inverted range, yields an
/// empty curve.
#[must_use]
pub fn payoff_roi_curve(condor: &IronCondor, range: CurveRange) -> Vec<CurvePoint> {
    if !range.step_pct.is_finite()
        || range.step_pct <= 0.0
        || !range.move_low_pct.is_finite()
        || !range.move_high_pct.is_finite()
        || range.move_high_pct < range.move_low_pct
    {
        return Vec::new();
    }

    let span = range.move_high_pct - range.move_low_pct;
    let steps = (span / range.step_pct).round() as usize;

    (0..=steps)
        .map(|i| {
            let move_pct = range.move_low_pct + i as f64 * range.step_pct;
            let price = condor.underlying_price * (1.0 + move_pct);
            CurvePoint {
                move_pct,
                price,
                payoff: payoff_per_contract(condor, price),
                roi: roi_at_price(condor, price),
            }
        })
        .collect()
}
