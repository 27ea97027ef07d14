//! Configuration errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single rule broken by a configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("delay_ms ({delay_ms}) exceeds the maximum of {max}")]
    DelayTooLong { delay_ms: u64, max: u64 },

    #[error("poll_interval_ms ({poll_interval_ms}) must be between {min} and {max}")]
    PollIntervalOutOfRange {
        poll_interval_ms: u64,
        min: u64,
        max: u64,
    },

    #[error("max_steps must be greater than zero when set")]
    ZeroStepLimit,
}

/// Errors that can occur when loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
