//! CLI command implementations.

pub mod pi;
pub mod sample;
pub mod verify;

use crate::error::{CliError, CliResult};

/// Parse a comma-separated list of seed words (decimal or 0x-prefixed hex).
pub fn parse_seed_words(seed: &str) -> CliResult<Vec<u32>> {
    seed.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => s.parse::<u32>(),
            };
            parsed.map_err(|e| {
                let reason = format!("seed word '{}': {}", s, e);
                CliError::InvalidArgument(reason)
            })
        })
        .collect()
}
