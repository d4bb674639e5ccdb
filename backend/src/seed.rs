//! Seed acquisition and packing
//!
//! Raw entropy arrives as bytes from a [`SeedSource`]. Bytes are packed into
//! 32-bit words most-significant-byte first, and a short word sequence is
//! tiled (repeated, never re-drawn) to the length a dispatch needs.
//!
//! A [`SeedVector`] holds `seed_words_per_lane × lane_count` words; lane `i`
//! owns words `[i * seed_words_per_lane, (i + 1) * seed_words_per_lane)`.

use crate::error::ConfigError;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bytes per packed seed word
pub const SEED_WORD_BYTES: usize = 4;

/// Source of raw seed bytes
pub trait SeedSource {
    /// Return exactly `count` bytes of entropy
    fn generate_seed_bytes(&mut self, count: usize) -> Result<Vec<u8>, ConfigError>;
}

/// Operating-system entropy
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn generate_seed_bytes(&mut self, count: usize) -> Result<Vec<u8>, ConfigError> {
        let mut bytes = vec![0u8; count];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| ConfigError::Entropy(e.to_string()))?;
        Ok(bytes)
    }
}

/// Replays a fixed byte sequence, cycling when more bytes are requested
///
/// # Example
/// ```
/// use parallel_rng_core::seed::{FixedSeedSource, SeedSource};
///
/// let mut source = FixedSeedSource::new(vec![1, 2, 3]);
/// assert_eq!(source.generate_seed_bytes(4).unwrap(), vec![1, 2, 3, 1]);
/// assert_eq!(source.generate_seed_bytes(2).unwrap(), vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSeedSource {
    bytes: Vec<u8>,
    position: usize,
}

impl FixedSeedSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, position: 0 }
    }

    /// Source replaying the big-endian encoding of `words`
    pub fn from_words(words: &[u32]) -> Self {
        Self::new(words.iter().flat_map(|w| w.to_be_bytes()).collect())
    }
}

impl SeedSource for FixedSeedSource {
    fn generate_seed_bytes(&mut self, count: usize) -> Result<Vec<u8>, ConfigError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.bytes.is_empty() {
            return Err(ConfigError::EmptySeed);
        }

        let len = self.bytes.len();
        let out = (0..count)
            .map(|n| self.bytes[(self.position + n) % len])
            .collect();
        self.position = (self.position + count) % len;

        Ok(out)
    }
}

/// Pack bytes into words, 4 bytes per word, most significant byte first
pub fn pack_words(bytes: &[u8]) -> Result<Vec<u32>, ConfigError> {
    if bytes.len() % SEED_WORD_BYTES != 0 {
        return Err(ConfigError::UnalignedSeedBytes { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(SEED_WORD_BYTES)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Number of seed words `lanes` lanes consume
///
/// # Errors
/// - [`ConfigError::TooManyLanes`] if the word or byte count overflows
pub fn seed_word_count(words_per_lane: usize, lanes: usize) -> Result<usize, ConfigError> {
    words_per_lane
        .checked_mul(lanes)
        .filter(|words| words.checked_mul(SEED_WORD_BYTES).is_some())
        .ok_or(ConfigError::TooManyLanes { lanes })
}

/// Repeat `bytes` back to back `copies` times
pub fn tile_bytes(bytes: &[u8], copies: usize) -> Vec<u8> {
    bytes.repeat(copies)
}

/// Repeat `words` cyclically until `len` words are produced
pub fn tile_words(words: &[u32], len: usize) -> Vec<u32> {
    if words.is_empty() {
        return Vec::new();
    }
    words.iter().copied().cycle().take(len).collect()
}

/// Ordered seed words for every lane of a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVector {
    words: Vec<u32>,
}

impl SeedVector {
    pub fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Build from raw bytes (see [`pack_words`])
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self::new(pack_words(bytes)?))
    }

    /// Draw `words_per_lane × lanes` words of entropy from `source`
    ///
    /// The drawn words are tiled to the required length if the source
    /// returned fewer; lanes are never re-drawn individually.
    pub fn synthesize(
        source: &mut dyn SeedSource,
        words_per_lane: usize,
        lanes: usize,
    ) -> Result<Self, ConfigError> {
        if lanes == 0 {
            return Err(ConfigError::ZeroLanes);
        }

        let needed = seed_word_count(words_per_lane, lanes)?;
        let bytes = source.generate_seed_bytes(needed * SEED_WORD_BYTES)?;
        let words = pack_words(&bytes)?;
        if words.is_empty() {
            return Err(ConfigError::EmptySeed);
        }

        Ok(Self::new(tile_words(&words, needed)))
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check that the vector holds exactly `words_per_lane × lanes` words
    pub fn validate(&self, words_per_lane: usize, lanes: usize) -> Result<(), ConfigError> {
        if lanes == 0 {
            return Err(ConfigError::ZeroLanes);
        }

        let expected = seed_word_count(words_per_lane, lanes)?;
        if self.words.len() != expected {
            return Err(ConfigError::SeedLength {
                expected,
                actual: self.words.len(),
                lanes,
            });
        }

        Ok(())
    }

    /// Seed sub-vector of `lane`
    ///
    /// # Panics
    /// Panics if the lane lies outside the vector.
    pub fn lane(&self, lane: usize, words_per_lane: usize) -> &[u32] {
        &self.words[lane * words_per_lane..(lane + 1) * words_per_lane]
    }

    /// SHA-256 of the big-endian seed bytes, as lowercase hex
    ///
    /// Identifies a run in logs and reports without exposing the seed.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for word in &self.words {
            hasher.update(word.to_be_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_words_big_endian() {
        let words = pack_words(&[0x01, 0x02, 0x03, 0x04, 0xff, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(words, vec![0x0102_0304, 0xff00_0000]);
    }

    #[test]
    fn test_pack_words_rejects_partial_word() {
        assert_eq!(
            pack_words(&[1, 2, 3, 4, 5]),
            Err(ConfigError::UnalignedSeedBytes { len: 5 })
        );
    }

    #[test]
    fn test_tile_bytes_repeats_pattern() {
        assert_eq!(tile_bytes(&[1, 2], 3), vec![1, 2, 1, 2, 1, 2]);
        assert!(tile_bytes(&[], 3).is_empty());
    }

    #[test]
    fn test_tile_words() {
        assert_eq!(tile_words(&[7, 8, 9], 7), vec![7, 8, 9, 7, 8, 9, 7]);
        assert_eq!(tile_words(&[7, 8, 9], 2), vec![7, 8]);
        assert!(tile_words(&[], 5).is_empty());
    }

    #[test]
    fn test_synthesize_length() {
        let mut source = FixedSeedSource::new((0u8..=255).collect());
        let seed = SeedVector::synthesize(&mut source, 4, 3).unwrap();

        assert_eq!(seed.len(), 12);
        assert_eq!(seed.words()[0], 0x0001_0203);
        assert!(seed.validate(4, 3).is_ok());
    }

    #[test]
    fn test_synthesize_from_short_source_tiles_words() {
        let mut source = FixedSeedSource::from_words(&[10, 20, 30, 40]);
        let seed = SeedVector::synthesize(&mut source, 4, 2).unwrap();

        assert_eq!(seed.words(), &[10, 20, 30, 40, 10, 20, 30, 40]);
    }

    #[test]
    fn test_validate_mismatch() {
        let seed = SeedVector::new(vec![0; 11]);
        assert_eq!(
            seed.validate(4, 3),
            Err(ConfigError::SeedLength {
                expected: 12,
                actual: 11,
                lanes: 3
            })
        );
    }

    #[test]
    fn test_word_count_overflow() {
        assert_eq!(seed_word_count(4, 3), Ok(12));
        assert_eq!(
            seed_word_count(4, 1 << 62),
            Err(ConfigError::TooManyLanes { lanes: 1 << 62 })
        );
        // Words fit, bytes do not
        assert_eq!(
            seed_word_count(4, 1 << 61),
            Err(ConfigError::TooManyLanes { lanes: 1 << 61 })
        );
        assert_eq!(
            SeedVector::new(vec![]).validate(4, 1 << 62),
            Err(ConfigError::TooManyLanes { lanes: 1 << 62 })
        );
    }

    #[test]
    fn test_lane_sub_vector() {
        let seed = SeedVector::new(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(seed.lane(0, 4), &[1, 2, 3, 4]);
        assert_eq!(seed.lane(1, 4), &[5, 6, 7, 8]);
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = SeedVector::new(vec![1, 2, 3, 4]);
        let b = SeedVector::new(vec![1, 2, 3, 4]);
        let c = SeedVector::new(vec![1, 2, 3, 5]);

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_os_source_returns_requested_count() {
        let bytes = OsSeedSource.generate_seed_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
    }
}
