//! Parallel RNG Core - Lane-Parallel Random Number Generation
//!
//! Generators whose state is laid out so that many independent streams can
//! be advanced at once by separate execution lanes, each lane reproducing
//! bit for bit the stream a sequential reference produces from the same
//! seed.
//!
//! # Architecture
//!
//! - **seed**: Entropy sources, byte packing, seed vectors
//! - **rng**: Flat per-lane state and the two bit generators (MT19937, xorshift128)
//! - **distributions**: Uniform and Gaussian transforms over any bit source
//! - **dispatch**: Execution engines that run one body per lane
//! - **verify**: Sequential oracles and the equivalence checker
//! - **config**: Generator selection, lane topology, run parameters
//!
//! # Critical Invariants
//!
//! 1. Lane `i` reads and writes only its own slice of state
//! 2. Lane `i` is seeded from seed words of lane `i` only
//! 3. Configuration errors are raised before any state is allocated
//!
//! # Example
//! ```
//! use parallel_rng_core::dispatch::RayonEngine;
//! use parallel_rng_core::rng::{MersenneTwister, ParallelGenerator};
//! use parallel_rng_core::seed::SeedVector;
//! use parallel_rng_core::distributions::uniform01;
//!
//! let seed = SeedVector::new((0..16).collect());
//! let mut generator = ParallelGenerator::<MersenneTwister>::new(4, seed).unwrap();
//!
//! let samples = generator.fill_with(&RayonEngine::new(), 100, |lane| uniform01(lane));
//! assert_eq!(samples.len(), 400);
//! assert!(samples.iter().all(|&x| (0.0..1.0).contains(&x)));
//! ```

// Module declarations
pub mod config;
pub mod dispatch;
pub mod distributions;
pub mod error;
pub mod rng;
pub mod seed;
pub mod verify;

// Re-exports for convenience
pub use config::{EquivalenceConfig, GeneratorKind, LaneRange};
pub use dispatch::{ExecutionEngine, RayonEngine, SequentialEngine};
pub use distributions::{gaussian_polar, gaussian_polar_bounded, uniform01, uniform_signed};
pub use error::ConfigError;
pub use rng::{
    Algorithm, BitSource, GeneratorState, Lane, LaneState, MersenneTwister, ParallelGenerator,
    XorShift,
};
pub use seed::{FixedSeedSource, OsSeedSource, SeedSource, SeedVector};
pub use verify::{
    check_equivalence, verify_all_lanes, EquivalenceOutcome, EquivalenceReport,
    ReferenceMersenneTwister, ReferenceOracle, ReferenceXorShift,
};
