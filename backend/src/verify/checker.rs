//! Equivalence checking between parallel lanes and sequential oracles
//!
//! # Protocol
//!
//! 1. Draw one lane's worth of raw seed bytes from the seed source.
//! 2. Tile those bytes across every lane and seed the parallel generator.
//! 3. Draw `samples_per_lane` samples per lane into a lane-major buffer.
//! 4. Seed the oracle with the un-tiled bytes and draw the same count.
//! 5. Compare oracle sample `n` with parallel sample
//!    `(lane_count - 1) * samples_per_lane + n`, stopping at the first
//!    difference.
//!
//! The last lane is the one checked because its tiled seed words coincide
//! with the raw draw.

use crate::config::{EquivalenceConfig, GeneratorKind, LaneRange};
use crate::dispatch::ExecutionEngine;
use crate::error::ConfigError;
use crate::rng::{Algorithm, BitSource, ParallelGenerator};
use crate::seed::{tile_bytes, SeedSource, SeedVector, SEED_WORD_BYTES};
use crate::verify::oracle::{ReferenceMersenneTwister, ReferenceOracle, ReferenceXorShift};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing one parallel stream with its oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EquivalenceOutcome {
    /// Every sample matched
    Match { samples: usize },

    /// First differing sample
    Mismatch {
        sample: usize,
        reference: u32,
        parallel: u32,
    },
}

impl EquivalenceOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, EquivalenceOutcome::Match { .. })
    }
}

impl fmt::Display for EquivalenceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalenceOutcome::Match { samples } => write!(f, "{} samples, results OK", samples),
            // Values print as signed integers, like the oracle's native output
            EquivalenceOutcome::Mismatch {
                sample,
                reference,
                parallel,
            } => write!(
                f,
                "Difference detected! Sample {}, {} (reference) != {} (parallel)",
                sample, *reference as i32, *parallel as i32
            ),
        }
    }
}

/// Summary of one equivalence run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceReport {
    pub kind: GeneratorKind,
    pub lane_count: usize,
    pub samples_per_lane: usize,

    /// Lane whose stream was compared with the oracle
    pub checked_lane: usize,

    /// SHA-256 of the tiled seed vector
    pub seed_fingerprint: String,

    pub outcome: EquivalenceOutcome,
}

impl EquivalenceReport {
    pub fn is_match(&self) -> bool {
        self.outcome.is_match()
    }
}

impl fmt::Display for EquivalenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} test for {} samples in lane {} of {}: {}",
            self.kind, self.samples_per_lane, self.checked_lane, self.lane_count, self.outcome
        )
    }
}

/// Compare an oracle's stream with a parallel lane's samples
///
/// Stops at the first difference.
pub fn compare_stream<O: BitSource + ?Sized>(
    oracle: &mut O,
    parallel: &[u32],
) -> EquivalenceOutcome {
    for (sample, &value) in parallel.iter().enumerate() {
        let reference = oracle.next_u32();
        if reference != value {
            return EquivalenceOutcome::Mismatch {
                sample,
                reference,
                parallel: value,
            };
        }
    }

    EquivalenceOutcome::Match {
        samples: parallel.len(),
    }
}

/// Run the equivalence protocol for the configured generator
///
/// # Errors
/// Configuration errors only; a mismatch is reported in the returned
/// [`EquivalenceReport`].
pub fn check_equivalence<E: ExecutionEngine>(
    config: &EquivalenceConfig,
    engine: &E,
    source: &mut dyn SeedSource,
) -> Result<EquivalenceReport, ConfigError> {
    match config.kind {
        GeneratorKind::MersenneTwister => {
            run_protocol::<ReferenceMersenneTwister, E>(config, engine, source)
        }
        GeneratorKind::XorShift => run_protocol::<ReferenceXorShift, E>(config, engine, source),
    }
}

/// Protocol body, generic over the oracle (and through it, the algorithm)
pub fn run_protocol<O, E>(
    config: &EquivalenceConfig,
    engine: &E,
    source: &mut dyn SeedSource,
) -> Result<EquivalenceReport, ConfigError>
where
    O: ReferenceOracle,
    E: ExecutionEngine,
{
    config.validate()?;

    let lanes = config.lane_count;
    let samples = config.samples_per_lane;
    let kind = <O::Lanes as Algorithm>::KIND;

    let raw = source.generate_seed_bytes(<O::Lanes as Algorithm>::SEED_WORDS * SEED_WORD_BYTES)?;
    let seed = SeedVector::from_bytes(&tile_bytes(&raw, lanes))?;
    let seed_fingerprint = seed.fingerprint();

    let mut generator = ParallelGenerator::<O::Lanes>::new(lanes, seed)?;
    let out = generator.fill(engine, samples);

    let mut oracle = O::from_seed_bytes(&raw)?;
    let checked_lane = lanes - 1;
    let outcome = compare_stream(&mut oracle, &out[checked_lane * samples..]);

    match outcome {
        EquivalenceOutcome::Match { samples } => {
            log::info!("{}: {} samples match on {} lanes", kind, samples, lanes);
        }
        EquivalenceOutcome::Mismatch { sample, .. } => {
            log::warn!("{} lane {} differs at {}", kind, checked_lane, sample);
        }
    }

    Ok(EquivalenceReport {
        kind,
        lane_count: lanes,
        samples_per_lane: samples,
        checked_lane,
        seed_fingerprint,
        outcome,
    })
}

/// Check every lane against an oracle seeded with that lane's own seed words
///
/// Returns one outcome per lane, in lane order.
pub fn verify_all_lanes<O, E>(
    range: &LaneRange,
    seed: SeedVector,
    engine: &E,
    samples_per_lane: usize,
) -> Result<Vec<EquivalenceOutcome>, ConfigError>
where
    O: ReferenceOracle,
    E: ExecutionEngine,
{
    if samples_per_lane == 0 {
        return Err(ConfigError::InvalidSamples);
    }

    let lanes = range.flat_lanes()?;
    let seed_words = <O::Lanes as Algorithm>::SEED_WORDS;

    let mut generator = ParallelGenerator::<O::Lanes>::new(lanes, seed)?;
    let out = generator.fill(engine, samples_per_lane);

    (0..lanes)
        .map(|lane| {
            let mut oracle = O::from_seed_words(generator.seed().lane(lane, seed_words))?;
            let stream = &out[lane * samples_per_lane..(lane + 1) * samples_per_lane];
            Ok(compare_stream(&mut oracle, stream))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::SequentialEngine;
    use crate::seed::FixedSeedSource;

    struct Counter(u32);

    impl BitSource for Counter {
        fn next_u32(&mut self) -> u32 {
            self.0 += 1;
            self.0
        }
    }

    #[test]
    fn test_compare_stream_match() {
        let outcome = compare_stream(&mut Counter(0), &[1, 2, 3]);
        assert_eq!(outcome, EquivalenceOutcome::Match { samples: 3 });
        assert_eq!(outcome.to_string(), "3 samples, results OK");
    }

    #[test]
    fn test_compare_stream_stops_at_first_difference() {
        let mut oracle = Counter(0);
        let outcome = compare_stream(&mut oracle, &[1, 9, 3, 8]);

        assert_eq!(
            outcome,
            EquivalenceOutcome::Mismatch {
                sample: 1,
                reference: 2,
                parallel: 9
            }
        );
        // Scanning halted after the mismatch
        assert_eq!(oracle.0, 2);
    }

    #[test]
    fn test_protocol_small_run() {
        let config = EquivalenceConfig {
            kind: GeneratorKind::MersenneTwister,
            lane_count: 3,
            samples_per_lane: 1000,
            threads: None,
        };
        let mut source = FixedSeedSource::from_words(&[0x123, 0x234, 0x345, 0x456]);

        let report = check_equivalence(&config, &SequentialEngine::new(), &mut source).unwrap();

        assert!(report.is_match(), "{}", report);
        assert_eq!(report.checked_lane, 2);
        assert_eq!(report.outcome, EquivalenceOutcome::Match { samples: 1000 });
    }

    #[test]
    fn test_protocol_rejects_bad_config() {
        let config = EquivalenceConfig {
            lane_count: 0,
            ..EquivalenceConfig::default()
        };
        let mut source = FixedSeedSource::from_words(&[1, 2, 3, 4]);

        assert_eq!(
            check_equivalence(&config, &SequentialEngine::new(), &mut source).unwrap_err(),
            ConfigError::ZeroLanes
        );
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let report = EquivalenceReport {
            kind: GeneratorKind::XorShift,
            lane_count: 2,
            samples_per_lane: 5,
            checked_lane: 1,
            seed_fingerprint: "abc".to_string(),
            outcome: EquivalenceOutcome::Mismatch {
                sample: 3,
                reference: 1,
                parallel: 2,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "xor_shift");
        assert_eq!(json["outcome"]["status"], "mismatch");
        assert_eq!(json["outcome"]["sample"], 3);
    }
}
