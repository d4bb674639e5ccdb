//! Error types for the `prng` CLI.

use parallel_rng_core::ConfigError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Generator or dispatch configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error while reading a config file or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed command-line value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parallel output diverged from the sequential reference.
    #[error("Equivalence check failed: {0}")]
    Mismatch(String),
}
