//! Market data feed adapters.

mod sample;

pub use sample::SampleFeed;
