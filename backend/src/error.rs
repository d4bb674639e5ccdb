//! Configuration errors
//!
//! Every constructor in this crate validates its inputs before allocating
//! or touching generator state. A `ConfigError` therefore always means that
//! nothing was seeded.

use thiserror::Error;

/// Errors raised while configuring generators, seeds or dispatches
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Wrong size of seeds for lanes! Expected {expected}, got {actual}, for {lanes} lanes")]
    SeedLength {
        expected: usize,
        actual: usize,
        lanes: usize,
    },

    #[error("Only 1-dimensional lane ranges are supported, got {dims:?}")]
    UnsupportedTopology { dims: Vec<usize> },

    #[error("Lane count must be positive")]
    ZeroLanes,

    #[error("Lane count {lanes} is too large to address")]
    TooManyLanes { lanes: usize },

    #[error("Seed must contain at least one word")]
    EmptySeed,

    #[error("Seed byte count {len} is not a multiple of 4")]
    UnalignedSeedBytes { len: usize },

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Samples per lane must be positive")]
    InvalidSamples,

    #[error("Pass count must be positive")]
    InvalidPasses,

    #[error("Expected {expected} per-lane slots, got {actual}")]
    LaneSlots { expected: usize, actual: usize },

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("Execution engine error: {0}")]
    Engine(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
