//! Construction errors for spread and condor value types.

use chrono::NaiveDate;
use thiserror::Error;

use super::spread::SpreadType;

/// Errors from constructing spread/condor value types.
///
/// A construction failure is scoped to the single candidate being built;
/// assemblers catch and skip, they never abort the surrounding batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// Strike ordering violates the spread type's shape.
    #[error(
        "{spread_type} requires {expected}, got short={short_strike}, long={long_strike}"
    )]
    InvalidStrikeOrder {
        /// The spread type being built.
        spread_type: SpreadType,
        /// Expected ordering, e.g. `"short_strike > long_strike"`.
        expected: &'static str,
        /// Offending short strike.
        short_strike: f64,
        /// Offending long strike.
        long_strike: f64,
    },

    /// Net credit is negative or not finite (a debit spread).
    #[error("credit must be finite and non-negative, got {credit}")]
    InvalidCredit {
        /// Offending credit.
        credit: f64,
    },

    /// A put leg was given a non-PCS spread.
    #[error("Put leg must use a PCS spread, got {spread_type}")]
    PutLegRequiresPcs {
        /// The offending spread type.
        spread_type: SpreadType,
    },

    /// A call leg was given a non-CCS spread.
    #[error("Call leg must use a CCS spread, got {spread_type}")]
    CallLegRequiresCcs {
        /// The offending spread type.
        spread_type: SpreadType,
    },

    /// Condor legs reference different underlyings.
    #[error("condor legs must share the same underlying, got {put} and {call}")]
    MismatchedUnderlying {
        /// Put leg underlying.
        put: String,
        /// Call leg underlying.
        call: String,
    },

    /// Condor legs reference different expirations.
    #[error("condor legs must share the same expiration, got {put} and {call}")]
    MismatchedExpiration {
        /// Put leg expiration.
        put: NaiveDate,
        /// Call leg expiration.
        call: NaiveDate,
    },

    /// Short put is not below short call.
    #[error(
        "Invalid condor shape: short put ({short_put_strike}) must be below short call ({short_call_strike})"
    )]
    InvalidCondorShape {
        /// Short put strike.
        short_put_strike: f64,
        /// Short call strike.
        short_call_strike: f64,
    },
}
