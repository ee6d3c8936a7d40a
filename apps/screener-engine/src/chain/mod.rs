//! Option-chain snapshot types.
//!
//! A chain is an immutable sequence of per-contract [`OptionQuote`] rows
//! supplied by the market-data port per request; the core only iterates,
//! filters, and maps over it.

mod quote;

pub use quote::{OptionQuote, OptionType, otm_calls, otm_puts};
