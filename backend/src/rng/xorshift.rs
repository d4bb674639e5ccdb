//! xorshift128 random number generator, four words per lane
//!
//! # Algorithm
//!
//! Marsaglia's 4-word xorshift (Journal of Statistical Software, 2003):
//!
//! ```text
//! t = x ^ (x << 11)
//! x, y, z = y, z, w
//! w = w ^ (w >> 19) ^ t ^ (t >> 8)
//! return w
//! ```
//!
//! The four lane words are the whole state; there is no cursor and no
//! seeding transform. The lane's seed words are copied in as `x, y, z, w`.
//!
//! An all-zero seed is a fixed point: such a lane returns zero forever.

use super::Algorithm;
use crate::config::GeneratorKind;

const SHIFT_A: u32 = 11;
const SHIFT_B: u32 = 19;
const SHIFT_C: u32 = 8;

/// XOR-shift lane recipe
///
/// # Example
/// ```
/// use parallel_rng_core::rng::{BitSource, ParallelGenerator, XorShift};
/// use parallel_rng_core::seed::SeedVector;
///
/// let seed = SeedVector::new(vec![123456789, 362436069, 521288629, 88675123]);
/// let mut generator = ParallelGenerator::<XorShift>::new(1, seed).unwrap();
/// let mut lane = generator.lane(0).unwrap();
/// assert_eq!(lane.next_u32(), 3701687786);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XorShift;

impl Algorithm for XorShift {
    const KIND: GeneratorKind = GeneratorKind::XorShift;
    const STATE_WORDS: usize = 4;
    const CURSOR_WORDS: usize = 0;
    const SEED_WORDS: usize = 4;

    fn seed_lane(seed: &[u32], words: &mut [u32], _cursor: &mut [u32]) {
        words.copy_from_slice(seed);

        if words.iter().all(|&w| w == 0) {
            log::warn!("xorshift lane seeded with all zeros; stream is constant");
        }
    }

    #[inline]
    fn next(words: &mut [u32], _cursor: &mut [u32]) -> u32 {
        let t = words[0] ^ (words[0] << SHIFT_A);

        words[0] = words[1];
        words[1] = words[2];
        words[2] = words[3];
        words[3] = words[3] ^ (words[3] >> SHIFT_B) ^ (t ^ (t >> SHIFT_C));

        words[3]
    }
}
