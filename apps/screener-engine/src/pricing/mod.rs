//! Black-Scholes pricing math.
//!
//! Pure numeric functions with no state: delta estimation (used as a
//! fallback when the chain supplies no market delta) and full Greeks.

mod black_scholes;

pub use black_scholes::{Greeks, calculate_greeks, estimate_delta};
