//! Application layer - use cases and port definitions.

/// Port definitions for external collaborators.
pub mod ports;

/// Use cases orchestrating ports and the pure core.
pub mod use_cases;
