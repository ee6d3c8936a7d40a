//! Credit spread value type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ConstructionError;

/// Vertical credit spread type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpreadType {
    /// Put credit spread: short put struck above the long put.
    #[serde(rename = "PCS")]
    Pcs,
    /// Call credit spread: short call struck below the long call.
    #[serde(rename = "CCS")]
    Ccs,
}

impl std::fmt::Display for SpreadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pcs => write!(f, "PCS"),
            Self::Ccs => write!(f, "CCS"),
        }
    }
}

/// A two-leg vertical credit spread.
///
/// Constructed only through [`CreditSpread::new`], which enforces the
/// shape invariants; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSpread {
    /// Underlying symbol.
    pub underlying: String,
    /// Expiration date shared by both legs.
    pub expiration: NaiveDate,
    /// Spread type (PCS/CCS).
    pub spread_type: SpreadType,
    /// Short leg strike.
    pub short_strike: f64,
    /// Long leg strike.
    pub long_strike: f64,
    /// Net credit per share (sell at bid, buy at ask).
    pub credit: f64,
    /// Short leg delta, signed; magnitude within [0, 1].
    pub short_delta: f64,
    /// Wider of the two legs' bid-ask spread (absolute).
    pub bid_ask_spread: f64,
    /// Thinner of the two legs' volume.
    pub volume: i64,
    /// Thinner of the two legs' open interest.
    pub open_interest: i64,
}

impl CreditSpread {
    /// Build a credit spread, validating the shape invariants.
    ///
    /// # Errors
    ///
    /// - PCS with `short_strike <= long_strike`, or CCS with
    ///   `short_strike >= long_strike` (also covers zero width).
    /// - Negative or non-finite credit (a debit spread is not a valid
    ///   member of this strategy class).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        underlying: impl Into<String>,
        expiration: NaiveDate,
        spread_type: SpreadType,
        short_strike: f64,
        long_strike: f64,
        credit: f64,
        short_delta: f64,
        bid_ask_spread: f64,
        volume: i64,
        open_interest: i64,
    ) -> Result<Self, ConstructionError> {
        let ordered = match spread_type {
            SpreadType::Pcs => short_strike > long_strike,
            SpreadType::Ccs => short_strike < long_strike,
        };
        if !ordered {
            let expected = match spread_type {
                SpreadType::Pcs => "short_strike > long_strike",
                SpreadType::Ccs => "short_strike < long_strike",
            };
            return Err(ConstructionError::InvalidStrikeOrder {
                spread_type,
                expected,
                short_strike,
                long_strike,
            });
        }
        if !credit.is_finite() || credit < 0.0 {
            return Err(ConstructionError::InvalidCredit { credit });
        }

        Ok(Self {
            underlying: underlying.into(),
            expiration,
            spread_type,
            short_strike,
            long_strike,
            credit,
            short_delta,
            bid_ask_spread,
            volume,
            open_interest,
        })
    }

    /// Distance between the strikes. Positive for any valid spread.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.short_strike - self.long_strike).abs()
    }

    /// Maximum loss per share (width minus credit, clamped at zero).
    #[must_use]
    pub fn max_loss(&self) -> f64 {
        (self.width() - self.credit).max(0.0)
    }

    /// Return on capital: credit / max loss. Zero when the spread is
    /// fully credit-funded (no loss basis to divide by).
    #[must_use]
    pub fn roc(&self) -> f64 {
        let max_loss = self.max_loss();
        if max_loss > 0.0 {
            self.credit / max_loss
        } else {
            0.0
        }
    }

    /// Break-even price at expiration.
    #[must_use]
    pub fn break_even(&self) -> f64 {
        match self.spread_type {
            SpreadType::Pcs => self.short_strike - self.credit,
            SpreadType::Ccs => self.short_strike + self.credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()
    }

    fn pcs(short: f64, long: f64, credit: f64) -> Result<CreditSpread, ConstructionError> {
        CreditSpread::new("SPY", expiry(), SpreadType::Pcs, short, long, credit, 0.15, 0.10, 1000, 5000)
    }

    fn ccs(short: f64, long: f64, credit: f64) -> Result<CreditSpread, ConstructionError> {
        CreditSpread::new("SPY", expiry(), SpreadType::Ccs, short, long, credit, 0.15, 0.08, 800, 4000)
    }

    #[test]
    fn pcs_short_above_long() {
        let spread = pcs(495.0, 490.0, 1.50).unwrap();
        assert!(spread.short_strike > spread.long_strike);
        assert_eq!(spread.width(), 5.0);
        assert_eq!(spread.break_even(), 493.5);
    }

    #[test]
    fn ccs_short_below_long() {
        let spread = ccs(505.0, 510.0, 1.30).unwrap();
        assert!(spread.short_strike < spread.long_strike);
        assert_eq!(spread.width(), 5.0);
        assert_eq!(spread.break_even(), 506.3);
    }

    #[test]
    fn pcs_rejects_inverted_strikes() {
        let err = pcs(490.0, 495.0, 1.0).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidStrikeOrder { .. }));
    }

    #[test]
    fn ccs_rejects_inverted_strikes() {
        let err = ccs(510.0, 505.0, 1.0).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidStrikeOrder { .. }));
    }

    #[test]
    fn equal_strikes_rejected_for_both_types() {
        assert!(pcs(495.0, 495.0, 1.0).is_err());
        assert!(ccs(505.0, 505.0, 1.0).is_err());
    }

    #[test]
    fn negative_credit_is_a_debit_spread() {
        let err = pcs(495.0, 490.0, -0.25).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidCredit { .. }));
    }

    #[test]
    fn nan_credit_rejected() {
        assert!(pcs(495.0, 490.0, f64::NAN).is_err());
    }

    #[test]
    fn max_loss_and_roc() {
        let spread = pcs(495.0, 490.0, 1.0).unwrap();
        assert_eq!(spread.max_loss(), 4.0);
        assert_eq!(spread.roc(), 0.25);
    }

    #[test]
    fn fully_funded_spread_has_zero_roc() {
        // credit equals width: no loss basis
        let spread = pcs(495.0, 490.0, 5.0).unwrap();
        assert_eq!(spread.max_loss(), 0.0);
        assert_eq!(spread.roc(), 0.0);
    }
}
