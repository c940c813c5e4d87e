//! Store configuration
//!
//! Builder-style options for opening a [`CaseStore`](crate::CaseStore),
//! also loadable from TOML:
//!
//! ```toml
//! path = "data/fraud_cases.json"
//! access_mode = "read_only"
//! format = "compact"
//! sync = true
//! cross_process_lock = false
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::fs;
use std::path::{Path, PathBuf};

use casedesk_core::{Result, StoreError};
use serde::Deserialize;

/// Default document location, relative to the process working directory
pub const DEFAULT_STORE_FILE: &str = "fraud_cases.json";

/// Controls whether the store accepts writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Reads and writes (default)
    #[default]
    ReadWrite,
    /// Reads only; every write fails with [`StoreError::ReadOnly`]
    ReadOnly,
}

/// Layout of the written document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Two-space indented JSON (default)
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

/// Options for opening a case store
///
/// ```ignore
/// use casedesk_storage::{AccessMode, StoreConfig};
///
/// let config = StoreConfig::new("cases.json").access_mode(AccessMode::ReadOnly);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Canonical document path; relative paths resolve against the working directory
    pub path: PathBuf,
    /// Read-write or read-only
    pub access_mode: AccessMode,
    /// Pretty or compact output
    pub format: DocumentFormat,
    /// fsync the temporary file and its directory around the rename
    pub sync: bool,
    /// Also take an advisory lock on `<path>.lock` around each write
    pub cross_process_lock: bool,
}

impl StoreConfig {
    /// Default options for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the output format
    pub fn format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable fsync on write
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Enable or disable the cross-process lock file
    pub fn cross_process_lock(mut self, enabled: bool) -> Self {
        self.cross_process_lock = enabled;
        self
    }

    /// Parse and validate a TOML configuration
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Reject paths that cannot name a document file
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("store path is empty".into()));
        }
        if self.path.file_name().is_none() {
            return Err(StoreError::InvalidConfig(format!(
                "store path {:?} does not name a file",
                self.path
            )));
        }
        if self.path.is_dir() {
            return Err(StoreError::InvalidConfig(format!(
                "store path {:?} is a directory",
                self.path
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: PathBuf::from(DEFAULT_STORE_FILE),
            access_mode: AccessMode::ReadWrite,
            format: DocumentFormat::Pretty,
            sync: true,
            cross_process_lock: false,
        }
    }
}
