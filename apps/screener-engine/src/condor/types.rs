//! Iron condor value types and scoring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CondorWeights;
use crate::screener::{ConstructionError, CreditSpread, SpreadType, clamp, liquidity_score};

/// Return on capital earning a full ROC score.
pub const ROC_TARGET_FOR_FULL_SCORE: f64 = 0.50;

/// Average wing width (as a fraction of spot) at which the width score
/// reaches zero.
pub const WIDTH_PCT_MAX_FOR_SCORE: f64 = 0.10;

/// Which side of the condor a leg sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    /// Put credit spread side.
    Put,
    /// Call credit spread side.
    Call,
}

/// One wing of an iron condor: a credit spread tagged with its side.
///
/// The side tag and spread type must agree; the constructors enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IronCondorLeg {
    /// The wrapped credit spread.
    pub spread: CreditSpread,
    /// Side tag.
    pub side: LegSide,
}

impl IronCondorLeg {
    /// Wrap a PCS as the put leg.
    ///
    /// # Errors
    ///
    /// Rejects any spread that is not a PCS.
    pub fn put(spread: CreditSpread) -> Result<Self, ConstructionError> {
        if spread.spread_type != SpreadType::Pcs {
            return Err(ConstructionError::PutLegRequiresPcs {
                spread_type: spread.spread_type,
            });
        }
        Ok(Self {
            spread,
            side: LegSide::Put,
        })
    }

    /// Wrap a CCS as the call leg.
    ///
    /// # Errors
    ///
    /// Rejects any spread that is not a CCS.
    pub fn call(spread: CreditSpread) -> Result<Self, ConstructionError> {
        if spread.spread_type != SpreadType::Ccs {
            return Err(ConstructionError::CallLegRequiresCcs {
                spread_type: spread.spread_type,
            });
        }
        Ok(Self {
            spread,
            side: LegSide::Call,
        })
    }
}

/// A four-leg iron condor: one PCS below one CCS on the same underlying
/// and expiration.
///
/// The condor exclusively owns its two legs; every combination builds
/// fresh leg wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IronCondor {
    /// Put (PCS) leg.
    pub put_leg: IronCondorLeg,
    /// Call (CCS) leg.
    pub call_leg: IronCondorLeg,
    /// Underlying price at assembly time.
    pub underlying_price: f64,
    /// Days to expiration at assembly time.
    pub days_to_expiration: i64,
}

impl IronCondor {
    /// Assemble a condor, validating the combination invariants.
    ///
    /// # Errors
    ///
    /// - Legs on different underlyings or expirations.
    /// - `short_put_strike >= short_call_strike` (degenerate profit zone).
    pub fn new(
        put_leg: IronCondorLeg,
        call_leg: IronCondorLeg,
        underlying_price: f64,
        days_to_expiration: i64,
    ) -> Result<Self, ConstructionError> {
        if put_leg.spread.underlying != call_leg.spread.underlying {
            return Err(ConstructionError::MismatchedUnderlying {
                put: put_leg.spread.underlying.clone(),
                call: call_leg.spread.underlying.clone(),
            });
        }
        if put_leg.spread.expiration != call_leg.spread.expiration {
            return Err(ConstructionError::MismatchedExpiration {
                put: put_leg.spread.expiration,
                call: call_leg.spread.expiration,
            });
        }
        if put_leg.spread.short_strike >= call_leg.spread.short_strike {
            return Err(ConstructionError::InvalidCondorShape {
                short_put_strike: put_leg.spread.short_strike,
                short_call_strike: call_leg.spread.short_strike,
            });
        }

        Ok(Self {
            put_leg,
            call_leg,
            underlying_price,
            days_to_expiration,
        })
    }

    /// Underlying symbol shared by both legs.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.put_leg.spread.underlying
    }

    /// Expiration shared by both legs.
    #[must_use]
    pub const fn expiration(&self) -> NaiveDate {
        self.put_leg.spread.expiration
    }

    /// Short put strike.
    #[must_use]
    pub const fn short_put_strike(&self) -> f64 {
        self.put_leg.spread.short_strike
    }

    /// Long put strike.
    #[must_use]
    pub const fn long_put_strike(&self) -> f64 {
        self.put_leg.spread.long_strike
    }

    /// Short call strike.
    #[must_use]
    pub const fn short_call_strike(&self) -> f64 {
        self.call_leg.spread.short_strike
    }

    /// Long call strike.
    #[must_use]
    pub const fn long_call_strike(&self) -> f64 {
        self.call_leg.spread.long_strike
    }

    /// Credit collected on the put side.
    #[must_use]
    pub const fn credit_pcs(&self) -> f64 {
        self.put_leg.spread.credit
    }

    /// Credit collected on the call side.
    #[must_use]
    pub const fn credit_ccs(&self) -> f64 {
        self.call_leg.spread.credit
    }

    /// Total credit across both legs.
    #[must_use]
    pub const fn total_credit(&self) -> f64 {
        self.put_leg.spread.credit + self.call_leg.spread.credit
    }

    /// Put wing width.
    #[must_use]
    pub fn put_width(&self) -> f64 {
        self.put_leg.spread.width()
    }

    /// Call wing width.
    #[must_use]
    pub fn call_width(&self) -> f64 {
        self.call_leg.spread.width()
    }

    /// Maximum loss per share: the wider wing minus the total credit,
    /// clamped at zero.
    #[must_use]
    pub fn max_loss_per_share(&self) -> f64 {
        (self.put_width().max(self.call_width()) - self.total_credit()).max(0.0)
    }

    /// Maximum profit per contract in dollars.
    #[must_use]
    pub fn max_profit_dollars(&self) -> f64 {
        self.total_credit() * super::payoff::CONTRACT_MULTIPLIER
    }

    /// Maximum loss per contract in dollars.
    #[must_use]
    pub fn max_loss_dollars(&self) -> f64 {
        self.max_loss_per_share() * super::payoff::CONTRACT_MULTIPLIER
    }

    /// Lower break-even price.
    #[must_use]
    pub fn breakeven_low(&self) -> f64 {
        self.short_put_strike() - self.total_credit()
    }

    /// Upper break-even price.
    #[must_use]
    pub fn breakeven_high(&self) -> f64 {
        self.short_call_strike() + self.total_credit()
    }

    /// Distance from spot down to the lower break-even, as a fraction of
    /// spot. Zero when spot is non-positive.
    #[must_use]
    pub fn distance_to_breakeven_low_pct(&self) -> f64 {
        if self.underlying_price > 0.0 {
            (self.underlying_price - self.breakeven_low()) / self.underlying_price
        } else {
            0.0
        }
    }

    /// Distance from spot up to the upper break-even, as a fraction of
    /// spot. Zero when spot is non-positive.
    #[must_use]
    pub fn distance_to_breakeven_high_pct(&self) -> f64 {
        if self.underlying_price > 0.0 {
            (self.breakeven_high() - self.underlying_price) / self.underlying_price
        } else {
            0.0
        }
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    /// Raw return on capital: total credit over max loss per share.
    /// Zero for a fully credit-funded condor.
    #[must_use]
    pub fn roc_raw(&self) -> f64 {
        let max_loss = self.max_loss_per_share();
        if max_loss > 0.0 {
            self.total_credit() / max_loss
        } else {
            0.0
        }
    }

    /// ROC score: raw ROC scaled against [`ROC_TARGET_FOR_FULL_SCORE`].
    #[must_use]
    pub fn roc_score(&self) -> f64 {
        clamp(self.roc_raw() / ROC_TARGET_FOR_FULL_SCORE, 0.0, 1.0)
    }

    /// Probability of profit: 1 minus the summed short-strike delta
    /// magnitudes, clamped to [0, 1].
    #[must_use]
    pub fn pop(&self) -> f64 {
        let mass = self.put_leg.spread.short_delta.abs() + self.call_leg.spread.short_delta.abs();
        clamp(1.0 - mass, 0.0, 1.0)
    }

    /// Width score: narrower wings relative to spot score higher. Zero
    /// when spot is non-positive.
    #[must_use]
    pub fn width_score(&self) -> f64 {
        if self.underlying_price <= 0.0 {
            return 0.0;
        }
        let avg_width_pct =
            (self.put_width() + self.call_width()) / 2.0 / self.underlying_price;
        1.0 - clamp(avg_width_pct / WIDTH_PCT_MAX_FOR_SCORE, 0.0, 1.0)
    }

    /// Liquidity score from the thinner leg's open interest and volume.
    #[must_use]
    pub fn liquidity_score(&self) -> f64 {
        let put = &self.put_leg.spread;
        let call = &self.call_leg.spread;
        liquidity_score(
            put.open_interest.min(call.open_interest),
            put.volume.min(call.volume),
        )
    }

    /// Tail-risk score: the complement of the wing-width-weighted
    /// probability mass beyond both break-evens (delta as the ITM-touch
    /// proxy, the wider wing weighted by its share of the combined
    /// width). Higher is safer.
    #[must_use]
    pub fn tail_risk(&self) -> f64 {
        let put_width = self.put_width();
        let call_width = self.call_width();
        let total_width = put_width + call_width;
        if total_width <= 0.0 {
            return 0.0;
        }
        let mass = self.put_leg.spread.short_delta.abs() * (put_width / total_width)
            + self.call_leg.spread.short_delta.abs() * (call_width / total_width);
        1.0 - clamp(mass, 0.0, 1.0)
    }

    /// Weighted total score.
    ///
    /// The weight set was validated to sum to 1.0 at config load.
    #[must_use]
    pub fn total_score(&self, weights: &CondorWeights) -> f64 {
        let total = weights.roc * self.roc_score()
            + weights.pop * self.pop()
            + weights.width * self.width_score()
            + weights.liquidity * self.liquidity_score()
            + weights.tail * self.tail_risk();
        clamp(total, 0.0, 1.0)
    }

    /// Compute the full score breakdown.
    #[must_use]
    pub fn score(&self, weights: &CondorWeights) -> CondorScore {
        CondorScore {
            roc_raw: self.roc_raw(),
            roc_score: self.roc_score(),
            pop: self.pop(),
            width_score: self.width_score(),
            liquidity_score: self.liquidity_score(),
            tail_risk: self.tail_risk(),
            total_score: self.total_score(weights),
        }
    }
}

/// Score breakdown for a condor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CondorScore {
    /// Raw return on capital.
    pub roc_raw: f64,
    /// ROC score in [0, 1].
    pub roc_score: f64,
    /// Probability of profit in [0, 1].
    pub pop: f64,
    /// Width score in [0, 1].
    pub width_score: f64,
    /// Liquidity score in [0, 1].
    pub liquidity_score: f64,
    /// Tail-risk score in [0, 1].
    pub tail_risk: f64,
    /// Weighted total in [0, 1].
    pub total_score: f64,
}

/// A condor with its score breakdown, as ranked output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCondor {
    /// The condor.
    pub condor: IronCondor,
    /// Its score breakdown.
    pub score: CondorScore,
}
