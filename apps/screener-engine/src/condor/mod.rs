//! Iron condor assembly, scoring, and payoff analysis.
//!
//! Independently ranked PCS and CCS sequences combine into four-leg
//! condors; each combination validates the shape invariants and invalid
//! ones are skipped, not errors. Payoff and ROI are piecewise-linear
//! functions of the expiration price.

mod assembler;
mod payoff;
mod types;

pub use assembler::{build_iron_condors, rank_iron_condors};
pub use payoff::{
    CONTRACT_MULTIPLIER, CurvePoint, CurveRange, payoff_per_contract, payoff_roi_curve,
    roi_at_price,
};
pub use types::{
    CondorScore, IronCondor, IronCondorLeg, LegSide, ROC_TARGET_FOR_FULL_SCORE, ScoredCondor,
    WIDTH_PCT_MAX_FOR_SCORE,
};
