//! # Stagehand Configuration Errors
//!
//! Errors raised while reading or decoding a kernel configuration file.
use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: String,
    },

    #[error("Failed to deserialize from {format}: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Unknown or unsupported config format for path: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}
