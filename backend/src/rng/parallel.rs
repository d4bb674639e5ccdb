//! Parallel generator: seeding, lane handles and dispatch helpers

use super::state::{GeneratorState, LaneState};
use super::{Algorithm, BitSource};
use crate::config::LaneRange;
use crate::dispatch::ExecutionEngine;
use crate::error::ConfigError;
use crate::seed::{SeedSource, SeedVector};
use std::marker::PhantomData;

/// Lane-parallel generator for one algorithm
///
/// Lane `i` is seeded from seed words `[i * A::SEED_WORDS, (i + 1) * A::SEED_WORDS)`
/// only, so its stream does not depend on the other lanes or on the lane
/// count.
///
/// # Example
/// ```
/// use parallel_rng_core::dispatch::SequentialEngine;
/// use parallel_rng_core::rng::{MersenneTwister, ParallelGenerator};
/// use parallel_rng_core::seed::SeedVector;
///
/// let seed = SeedVector::new(vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// let mut generator = ParallelGenerator::<MersenneTwister>::new(2, seed).unwrap();
///
/// let out = generator.fill(&SequentialEngine::new(), 3);
/// assert_eq!(out.len(), 6);
/// assert_eq!(out[0], 2915706234); // lane 0, sample 0
/// assert_eq!(out[3], 2634778227); // lane 1, sample 0
/// ```
#[derive(Debug, Clone)]
pub struct ParallelGenerator<A: Algorithm> {
    state: GeneratorState,
    seed: SeedVector,
    _algorithm: PhantomData<fn() -> A>,
}

impl<A: Algorithm> ParallelGenerator<A> {
    /// Seed `lanes` lanes from an explicit seed vector
    ///
    /// # Errors
    /// - [`ConfigError::ZeroLanes`] for zero lanes
    /// - [`ConfigError::SeedLength`] unless the seed holds exactly
    ///   `A::SEED_WORDS × lanes` words
    /// - [`ConfigError::TooManyLanes`] if the state size overflows
    ///
    /// Validation happens before any state is allocated.
    pub fn new(lanes: usize, seed: SeedVector) -> Result<Self, ConfigError> {
        seed.validate(A::SEED_WORDS, lanes)?;

        let mut state = GeneratorState::zeroed(lanes, A::STATE_WORDS, A::CURSOR_WORDS)?;
        for mut lane in state.lanes_mut() {
            let sub = seed.lane(lane.id(), A::SEED_WORDS);
            let (words, cursor) = lane.split_mut();
            A::seed_lane(sub, words, cursor);
        }

        log::debug!(
            "seeded {} {} lanes ({} state words each, seed {})",
            lanes,
            A::KIND,
            A::STATE_WORDS,
            seed.fingerprint()
        );

        Ok(Self {
            state,
            seed,
            _algorithm: PhantomData,
        })
    }

    /// Seed from a lane range, synthesizing the seed when none is given
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedTopology`] for non-flat ranges
    /// - any error of [`SeedVector::synthesize`] or [`ParallelGenerator::new`]
    pub fn from_range(
        range: &LaneRange,
        seed: Option<SeedVector>,
        source: &mut dyn SeedSource,
    ) -> Result<Self, ConfigError> {
        let lanes = range.flat_lanes()?;

        let seed = match seed {
            Some(seed) => seed,
            None => SeedVector::synthesize(source, A::SEED_WORDS, lanes)?,
        };

        Self::new(lanes, seed)
    }

    pub fn lane_count(&self) -> usize {
        self.state.lane_count()
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn seed(&self) -> &SeedVector {
        &self.seed
    }

    /// Handle on a single lane
    pub fn lane(&mut self, id: usize) -> Option<Lane<'_, A>> {
        self.state.lane_mut(id).map(Lane::new)
    }

    /// One exclusive handle per lane, in lane order
    pub fn lanes(&mut self) -> Vec<Lane<'_, A>> {
        self.state.lanes_mut().into_iter().map(Lane::new).collect()
    }

    /// Draw `samples_per_lane` raw samples from every lane
    ///
    /// Output is lane-major: sample `n` of lane `i` lands at
    /// `i * samples_per_lane + n`.
    pub fn fill<E: ExecutionEngine>(&mut self, engine: &E, samples_per_lane: usize) -> Vec<u32> {
        self.fill_with(engine, samples_per_lane, |lane| lane.next_u32())
    }

    /// Like [`ParallelGenerator::fill`], mapping each draw through `draw`
    ///
    /// # Panics
    /// Panics if `lane_count × samples_per_lane` exceeds the addressable size.
    pub fn fill_with<E, T, F>(&mut self, engine: &E, samples_per_lane: usize, draw: F) -> Vec<T>
    where
        E: ExecutionEngine,
        T: Send + Copy + Default,
        F: Fn(&mut Lane<'_, A>) -> T + Sync,
    {
        let len = self.lane_count().saturating_mul(samples_per_lane);
        let mut out = vec![T::default(); len];
        if samples_per_lane == 0 {
            return out;
        }

        let work: Vec<_> = self
            .lanes()
            .into_iter()
            .zip(out.chunks_mut(samples_per_lane))
            .collect();

        engine.dispatch(work, |_, (mut lane, slots)| {
            for slot in slots.iter_mut() {
                *slot = draw(&mut lane);
            }
        });

        out
    }

    /// Run `body` once per lane per pass, carrying state across passes
    ///
    /// `slots[i]` is lane `i`'s private accumulator. Every pass is a full
    /// dispatch, so pass `p + 1` starts only after all lanes finished pass `p`.
    ///
    /// # Errors
    /// - [`ConfigError::LaneSlots`] unless there is exactly one slot per lane
    /// - [`ConfigError::InvalidPasses`] for zero passes
    pub fn run_passes<E, T, F>(
        &mut self,
        engine: &E,
        slots: &mut [T],
        passes: usize,
        body: F,
    ) -> Result<(), ConfigError>
    where
        E: ExecutionEngine,
        T: Send,
        F: Fn(&mut Lane<'_, A>, &mut T) + Sync,
    {
        if slots.len() != self.lane_count() {
            return Err(ConfigError::LaneSlots {
                expected: self.lane_count(),
                actual: slots.len(),
            });
        }
        if passes == 0 {
            return Err(ConfigError::InvalidPasses);
        }

        for _ in 0..passes {
            let work: Vec<_> = self.lanes().into_iter().zip(slots.iter_mut()).collect();
            engine.dispatch(work, |_, (mut lane, slot)| body(&mut lane, slot));
        }

        Ok(())
    }
}

/// Exclusive handle on one lane of a [`ParallelGenerator`]
#[derive(Debug)]
pub struct Lane<'a, A: Algorithm> {
    state: LaneState<'a>,
    _algorithm: PhantomData<fn() -> A>,
}

impl<'a, A: Algorithm> Lane<'a, A> {
    fn new(state: LaneState<'a>) -> Self {
        Self {
            state,
            _algorithm: PhantomData,
        }
    }

    pub fn id(&self) -> usize {
        self.state.id()
    }

    pub fn state(&self) -> &LaneState<'a> {
        &self.state
    }
}

impl<A: Algorithm> BitSource for Lane<'_, A> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let (words, cursor) = self.state.split_mut();
        A::next(words, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::SequentialEngine;
    use crate::rng::{MersenneTwister, XorShift};
    use crate::seed::FixedSeedSource;

    #[test]
    fn test_seed_length_rejected_before_allocation() {
        let seed = SeedVector::new(vec![0; 11]);
        let err = ParallelGenerator::<MersenneTwister>::new(3, seed).unwrap_err();

        assert_eq!(
            err,
            ConfigError::SeedLength {
                expected: 12,
                actual: 11,
                lanes: 3
            }
        );
    }

    #[test]
    fn test_from_range_synthesizes_seed() {
        let mut source = FixedSeedSource::from_words(&[9, 8, 7, 6]);
        let range = LaneRange::flat(3);
        let result = ParallelGenerator::<XorShift>::from_range(&range, None, &mut source);
        let generator = result.unwrap();

        assert_eq!(generator.seed().len(), 12);
        assert_eq!(generator.state().lane_words(2), &[9, 8, 7, 6]);
    }

    #[test]
    fn test_from_range_rejects_two_dimensions() {
        let mut source = FixedSeedSource::from_words(&[1, 2, 3, 4]);
        let range = LaneRange::new(&[2, 2]);
        let result = ParallelGenerator::<XorShift>::from_range(&range, None, &mut source);
        let err = result.unwrap_err();

        assert!(matches!(err, ConfigError::UnsupportedTopology { .. }));
    }

    #[test]
    fn test_fill_layout_is_lane_major() {
        let seed = SeedVector::new(vec![1, 2, 3, 4, 1, 2, 3, 4]);
        let mut generator = ParallelGenerator::<XorShift>::new(2, seed).unwrap();

        let out = generator.fill(&SequentialEngine::new(), 3);
        assert_eq!(out, vec![2061, 6175, 4, 2061, 6175, 4]);
    }

    #[test]
    fn test_fill_zero_samples() {
        let seed = SeedVector::new(vec![1, 2, 3, 4]);
        let mut generator = ParallelGenerator::<XorShift>::new(1, seed).unwrap();

        assert!(generator.fill(&SequentialEngine::new(), 0).is_empty());
    }

    #[test]
    fn test_run_passes_carries_state() {
        let seed = SeedVector::new(vec![1, 2, 3, 4]);
        let mut generator = ParallelGenerator::<XorShift>::new(1, seed).unwrap();
        let engine = SequentialEngine::new();
        let mut seen: Vec<Vec<u32>> = vec![Vec::new()];

        generator
            .run_passes(&engine, &mut seen, 3, |lane, acc| acc.push(lane.next_u32()))
            .unwrap();

        assert_eq!(seen[0], vec![2061, 6175, 4]);
    }

    #[test]
    fn test_run_passes_validates() {
        let seed = SeedVector::new(vec![1, 2, 3, 4]);
        let mut generator = ParallelGenerator::<XorShift>::new(1, seed).unwrap();
        let engine = SequentialEngine::new();

        let mut too_many = vec![0u32; 2];
        assert_eq!(
            generator.run_passes(&engine, &mut too_many, 1, |_, _| {}),
            Err(ConfigError::LaneSlots {
                expected: 1,
                actual: 2
            })
        );

        let mut slots = vec![0u32; 1];
        assert_eq!(
            generator.run_passes(&engine, &mut slots, 0, |_, _| {}),
            Err(ConfigError::InvalidPasses)
        );
    }
}
