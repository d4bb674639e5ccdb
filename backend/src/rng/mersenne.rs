//! MT19937 Mersenne Twister, one 624-word block per lane
//!
//! # Algorithm
//!
//! Each lane carries the canonical 624-word MT19937 state plus one cursor.
//! Seeding follows `init_by_array` from the reference implementation by
//! Matsumoto and Nishimura: a linear-recurrence bootstrap, then two mixing
//! passes that fold in the lane's seed words. The block is regenerated in
//! place (the twist) whenever the cursor reaches 624, and every returned
//! word is tempered.
//!
//! All arithmetic is 32-bit and wraps.

use super::Algorithm;
use crate::config::GeneratorKind;

/// Words of state per lane
pub const N: usize = 624;
const M: usize = 397;

const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const MAG01: [u32; 2] = [0, 0x9908_b0df];

const BOOTSTRAP_SEED: u32 = 19_650_218;
const BOOTSTRAP_FACTOR: u32 = 1_812_433_253;
const SEED_FACTOR1: u32 = 1_664_525;
const SEED_FACTOR2: u32 = 1_566_083_941;

const TEMPER_MASK1: u32 = 0x9d2c_5680;
const TEMPER_MASK2: u32 = 0xefc6_0000;

/// Mersenne Twister lane recipe
///
/// # Example
/// ```
/// use parallel_rng_core::rng::{BitSource, MersenneTwister, ParallelGenerator};
/// use parallel_rng_core::seed::SeedVector;
///
/// let seed = SeedVector::new(vec![0x123, 0x234, 0x345, 0x456]);
/// let mut generator = ParallelGenerator::<MersenneTwister>::new(1, seed).unwrap();
/// let mut lane = generator.lane(0).unwrap();
/// assert_eq!(lane.next_u32(), 1067595299);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MersenneTwister;

impl Algorithm for MersenneTwister {
    const KIND: GeneratorKind = GeneratorKind::MersenneTwister;
    const STATE_WORDS: usize = N;
    const CURSOR_WORDS: usize = 1;
    const SEED_WORDS: usize = 4;

    fn seed_lane(seed: &[u32], words: &mut [u32], cursor: &mut [u32]) {
        seed_block(words, seed);
        // Forces a twist on the first draw
        cursor[0] = N as u32;
    }

    #[inline]
    fn next(words: &mut [u32], cursor: &mut [u32]) -> u32 {
        if cursor[0] as usize >= N {
            twist(words);
            cursor[0] = 0;
        }

        let y = words[cursor[0] as usize];
        cursor[0] += 1;

        temper(y)
    }
}

/// Bootstrap a 624-word block and mix `key` into it
pub(crate) fn seed_block(mt: &mut [u32], key: &[u32]) {
    debug_assert_eq!(mt.len(), N);
    debug_assert!(!key.is_empty());

    mt[0] = BOOTSTRAP_SEED;
    for k in 1..N {
        let prev = mt[k - 1];
        mt[k] = BOOTSTRAP_FACTOR
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(k as u32);
    }

    let mut i = 1;
    let mut j = 0;

    for _ in 0..N.max(key.len()) {
        let prev = mt[i - 1];
        mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(SEED_FACTOR1))
            .wrapping_add(key[j])
            .wrapping_add(j as u32);

        i += 1;
        j += 1;

        if i >= N {
            mt[0] = mt[N - 1];
            i = 1;
        }
        if j >= key.len() {
            j = 0;
        }
    }

    for _ in 0..N - 1 {
        let prev = mt[i - 1];
        mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(SEED_FACTOR2)).wrapping_sub(i as u32);

        i += 1;

        if i >= N {
            mt[0] = mt[N - 1];
            i = 1;
        }
    }

    // Top bit set: the block can never be all zero
    mt[0] = UPPER_MASK;
}

/// Regenerate all 624 words in place
pub(crate) fn twist(mt: &mut [u32]) {
    debug_assert_eq!(mt.len(), N);

    for kk in 0..N - M {
        let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
        mt[kk] = mt[kk + M] ^ (y >> 1) ^ MAG01[(y & 1) as usize];
    }

    for kk in N - M..N - 1 {
        let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
        mt[kk] = mt[kk + M - N] ^ (y >> 1) ^ MAG01[(y & 1) as usize];
    }

    let y = (mt[N - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
    mt[N - 1] = mt[M - 1] ^ (y >> 1) ^ MAG01[(y & 1) as usize];

    log::trace!("mt19937 block regenerated");
}

#[inline]
pub(crate) fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & TEMPER_MASK1;
    y ^= (y << 15) & TEMPER_MASK2;
    y ^= y >> 18;
    y
}
