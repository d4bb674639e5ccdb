//! Lane-parallel bit generators
//!
//! An [`Algorithm`] is a stateless recipe: how many words of state and
//! cursor each lane owns, how a lane is seeded from its seed sub-vector, and
//! how the next 32-bit sample is produced. [`ParallelGenerator`] owns the
//! flat per-lane state ([`GeneratorState`]) and hands out one exclusive
//! [`Lane`] per lane id.
//!
//! CRITICAL: a lane reads and writes only its own slice of state. That is
//! what makes per-lane output independent of how lanes are scheduled.

mod mersenne;
mod parallel;
mod state;
mod xorshift;

pub use mersenne::MersenneTwister;
pub use parallel::{Lane, ParallelGenerator};
pub use state::{GeneratorState, LaneState};
pub use xorshift::XorShift;

use crate::config::GeneratorKind;

/// Anything that produces a stream of 32-bit samples
pub trait BitSource {
    fn next_u32(&mut self) -> u32;

    /// The same sample reinterpreted as a signed integer
    fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Per-lane generator recipe
pub trait Algorithm: 'static {
    const KIND: GeneratorKind;

    /// State words owned by each lane
    const STATE_WORDS: usize;

    /// Cursor words owned by each lane (0 when the state is self-indexing)
    const CURSOR_WORDS: usize;

    /// Seed words consumed by each lane
    const SEED_WORDS: usize;

    /// Derive a lane's state from its seed sub-vector
    ///
    /// `words` has length `STATE_WORDS`, `cursor` has length `CURSOR_WORDS`,
    /// `seed` has length `SEED_WORDS`.
    fn seed_lane(seed: &[u32], words: &mut [u32], cursor: &mut [u32]);

    /// Advance a lane and return its next sample
    fn next(words: &mut [u32], cursor: &mut [u32]) -> u32;
}
