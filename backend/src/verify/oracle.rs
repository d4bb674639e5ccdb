//! Sequential reference generators
//!
//! Single-stream implementations written independently of the lane code in
//! [`crate::rng`]: the Mersenne Twister here follows the textbook
//! `init_genrand` / `init_by_array` / `genrand_int32` structure with modular
//! indexing, and the xorshift keeps its four words as named fields. They are
//! the ground truth parallel lanes are compared with.

use crate::error::ConfigError;
use crate::rng::{Algorithm, BitSource, MersenneTwister, XorShift};
use crate::seed::pack_words;
use rand::RngCore;

/// A sequential generator the parallel lanes of `Self::Lanes` must match
pub trait ReferenceOracle: BitSource + Sized {
    type Lanes: Algorithm;

    /// Seed from packed seed words
    fn from_seed_words(seed: &[u32]) -> Result<Self, ConfigError>;

    /// Seed from raw bytes, packed most-significant-byte first
    fn from_seed_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Self::from_seed_words(&pack_words(bytes)?)
    }
}

const MT_N: usize = 624;
const MT_M: usize = 397;

/// Textbook MT19937
#[derive(Clone)]
pub struct ReferenceMersenneTwister {
    mt: [u32; MT_N],
    mti: usize,
}

impl ReferenceMersenneTwister {
    fn init_genrand(seed: u32) -> Self {
        let mut mt = [0u32; MT_N];
        mt[0] = seed;
        for i in 1..MT_N {
            mt[i] = 1_812_433_253u32
                .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 30))
                .wrapping_add(i as u32);
        }
        Self { mt, mti: MT_N }
    }

    fn init_by_array(key: &[u32]) -> Self {
        let mut rng = Self::init_genrand(19_650_218);
        let mt = &mut rng.mt;

        let mut i = 1usize;
        let mut j = 0usize;
        let mut k = MT_N.max(key.len());
        while k > 0 {
            let mixed = (mt[i - 1] ^ (mt[i - 1] >> 30)).wrapping_mul(1_664_525);
            mt[i] = (mt[i] ^ mixed).wrapping_add(key[j]).wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= MT_N {
                mt[0] = mt[MT_N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
            k -= 1;
        }

        k = MT_N - 1;
        while k > 0 {
            let mixed = (mt[i - 1] ^ (mt[i - 1] >> 30)).wrapping_mul(1_566_083_941);
            mt[i] = (mt[i] ^ mixed).wrapping_sub(i as u32);
            i += 1;
            if i >= MT_N {
                mt[0] = mt[MT_N - 1];
                i = 1;
            }
            k -= 1;
        }

        mt[0] = 0x8000_0000;
        rng
    }

    fn generate(&mut self) {
        for kk in 0..MT_N {
            let y = (self.mt[kk] & 0x8000_0000) | (self.mt[(kk + 1) % MT_N] & 0x7fff_ffff);
            let mag = if y & 1 == 0 { 0 } else { 0x9908_b0df };
            self.mt[kk] = self.mt[(kk + MT_M) % MT_N] ^ (y >> 1) ^ mag;
        }
        self.mti = 0;
    }

    pub fn genrand_int32(&mut self) -> u32 {
        if self.mti >= MT_N {
            self.generate();
        }

        let mut y = self.mt[self.mti];
        self.mti += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }
}

impl std::fmt::Debug for ReferenceMersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceMersenneTwister")
            .field("mti", &self.mti)
            .finish_non_exhaustive()
    }
}

impl BitSource for ReferenceMersenneTwister {
    fn next_u32(&mut self) -> u32 {
        self.genrand_int32()
    }
}

impl ReferenceOracle for ReferenceMersenneTwister {
    type Lanes = MersenneTwister;

    fn from_seed_words(seed: &[u32]) -> Result<Self, ConfigError> {
        if seed.is_empty() {
            return Err(ConfigError::EmptySeed);
        }
        Ok(Self::init_by_array(seed))
    }
}

/// Marsaglia xorshift128
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceXorShift {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl ReferenceXorShift {
    pub fn new(x: u32, y: u32, z: u32, w: u32) -> Self {
        Self { x, y, z, w }
    }
}

impl BitSource for ReferenceXorShift {
    fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w ^= (self.w >> 19) ^ t ^ (t >> 8);
        self.w
    }
}

impl ReferenceOracle for ReferenceXorShift {
    type Lanes = XorShift;

    fn from_seed_words(seed: &[u32]) -> Result<Self, ConfigError> {
        match seed {
            [x, y, z, w] => Ok(Self::new(*x, *y, *z, *w)),
            _ => Err(ConfigError::SeedLength {
                expected: 4,
                actual: seed.len(),
                lanes: 1,
            }),
        }
    }
}

macro_rules! impl_rng_core {
    ($oracle:ty) => {
        impl RngCore for $oracle {
            fn next_u32(&mut self) -> u32 {
                BitSource::next_u32(self)
            }

            fn next_u64(&mut self) -> u64 {
                let low = u64::from(BitSource::next_u32(self));
                let high = u64::from(BitSource::next_u32(self));
                (high << 32) | low
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for chunk in dest.chunks_mut(4) {
                    let bytes = BitSource::next_u32(self).to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }
    };
}

impl_rng_core!(ReferenceMersenneTwister);
impl_rng_core!(ReferenceXorShift);
