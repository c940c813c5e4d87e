//! Error types for the storage layer
//!
//! Only store construction, configuration loading and writes can fail.
//! Reads never return an error: an unreadable document is an empty store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening, configuring or writing a case store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Case sequence could not be encoded as JSON
    #[error("failed to serialize case document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Write attempted on a store opened read-only
    #[error("store at {path:?} is read-only")]
    ReadOnly {
        /// Canonical document path
        path: PathBuf,
    },

    /// Cross-process lock could not be taken
    #[error("failed to lock {path:?}: {source}")]
    Lock {
        /// Lock file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Configuration is structurally valid but unusable
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML, or has unknown keys
    #[error("failed to parse store configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl StoreError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;
