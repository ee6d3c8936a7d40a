//! LEAPS (long-dated call) ranking pipeline.
//!
//! A thinner sibling of the spread pipeline: single-leg long calls are
//! costed against an upside price target and ranked by a two-term
//! weighted blend of ease and normalized ROI.

mod ranker;

pub use crate::config::LeapsMode;
pub use ranker::{ScoredLeaps, rank_leaps};
