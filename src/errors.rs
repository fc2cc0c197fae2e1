//! Shared error types for the crate.
//!
//! Only the edges fail: reading snapshots and configuration. The refine,
//! finance and ordering modules absorb bad input into defaults instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dealerlot operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Snapshot decoding errors
    #[error("Invalid inventory snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration parsed but holds unusable values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Lookup of a vehicle that is not in the current snapshot
    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(String),

    /// The vehicle exists but is no longer for sale
    #[error("Vehicle {id} is {status}")]
    NotAvailable { id: String, status: String },
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a configuration validation error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
