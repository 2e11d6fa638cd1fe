use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is not a valid JSON string map: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while loading or validating an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid size must be at least 6 cells, got {0}")]
    GridTooSmall(u16),
    #[error("grid size must be at most 255 cells, got {0}")]
    GridTooLarge(u16),
    #[error("tick intervals must be non-zero")]
    ZeroInterval,
    #[error("minimum interval {min_ms} ms exceeds initial interval {initial_ms} ms")]
    FloorAboveInitial { min_ms: u64, initial_ms: u64 },
}
