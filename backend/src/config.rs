//! Generator and verification configuration
//!
//! - [`GeneratorKind`]: which bit generator a run uses
//! - [`LaneRange`]: the lane topology requested by a caller (flat only)
//! - [`EquivalenceConfig`]: parameters of one equivalence-check run

use crate::error::ConfigError;
use crate::rng::Algorithm;
use crate::seed::seed_word_count;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bit generator selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// MT19937, 624 words of state per lane
    #[default]
    MersenneTwister,

    /// Marsaglia xorshift128, 4 words of state per lane
    XorShift,
}

impl GeneratorKind {
    /// Seed words consumed per lane
    pub fn seed_words_per_lane(self) -> usize {
        match self {
            GeneratorKind::MersenneTwister => crate::rng::MersenneTwister::SEED_WORDS,
            GeneratorKind::XorShift => crate::rng::XorShift::SEED_WORDS,
        }
    }

    /// State words owned by each lane
    pub fn state_words_per_lane(self) -> usize {
        match self {
            GeneratorKind::MersenneTwister => crate::rng::MersenneTwister::STATE_WORDS,
            GeneratorKind::XorShift => crate::rng::XorShift::STATE_WORDS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::MersenneTwister => "mt19937",
            GeneratorKind::XorShift => "xorshift",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mt19937" | "mt" | "mersenne_twister" | "mersenne-twister" => {
                Ok(GeneratorKind::MersenneTwister)
            }
            "xorshift" | "xor_shift" | "xorshift128" => Ok(GeneratorKind::XorShift),
            _ => Err(ConfigError::UnknownGenerator(s.to_string())),
        }
    }
}

/// Lane topology as requested by a caller
///
/// Dispatches are flat: a range with anything other than exactly one
/// dimension is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneRange {
    dims: Vec<usize>,
}

impl LaneRange {
    /// Range with arbitrary dimensions (validated by [`LaneRange::flat_lanes`])
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: dims.to_vec(),
        }
    }

    /// One-dimensional range of `lanes` lanes
    pub fn flat(lanes: usize) -> Self {
        Self { dims: vec![lanes] }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of lanes of a one-dimensional range
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedTopology`] unless the range has exactly one dimension
    /// - [`ConfigError::ZeroLanes`] if that dimension is zero
    pub fn flat_lanes(&self) -> Result<usize, ConfigError> {
        match self.dims.as_slice() {
            [0] => Err(ConfigError::ZeroLanes),
            [lanes] => Ok(*lanes),
            _ => Err(ConfigError::UnsupportedTopology {
                dims: self.dims.clone(),
            }),
        }
    }
}

/// Parameters of one equivalence-check run
///
/// # Example
/// ```
/// use parallel_rng_core::{EquivalenceConfig, GeneratorKind};
///
/// let json = r#"{"kind": "xor_shift", "lane_count": 16}"#;
/// let config = EquivalenceConfig::from_json(json).unwrap();
/// assert_eq!(config.kind, GeneratorKind::XorShift);
/// assert_eq!(config.samples_per_lane, 0xfffff);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceConfig {
    /// Generator under test
    pub kind: GeneratorKind,

    /// Number of parallel lanes; the last one is compared with the oracle
    pub lane_count: usize,

    /// Samples drawn by every lane
    pub samples_per_lane: usize,

    /// Worker threads for the parallel engine (None = engine default)
    pub threads: Option<usize>,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::default(),
            lane_count: 2,
            samples_per_lane: 0xfffff,
            threads: None,
        }
    }
}

impl EquivalenceConfig {
    /// Parse a config from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }

    /// Check the run parameters without touching any state
    pub fn validate(&self) -> Result<(), ConfigError> {
        LaneRange::flat(self.lane_count).flat_lanes()?;

        if self.samples_per_lane == 0 {
            return Err(ConfigError::InvalidSamples);
        }

        seed_word_count(self.kind.seed_words_per_lane(), self.lane_count)?;
        if self.lane_count.checked_mul(self.samples_per_lane).is_none() {
            return Err(ConfigError::TooManyLanes {
                lanes: self.lane_count,
            });
        }

        Ok(())
    }
}
