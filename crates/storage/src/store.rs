//! JSON case store
//!
//! The whole case sequence lives in one JSON array document.
//!
//! # Read policy
//!
//! [`CaseStore::read_all`] never fails. A missing document, an unreadable
//! one, or one that is not a JSON array of objects all read as an empty
//! sequence. Inside a well-formed array, a record with oddly typed fields
//! is still read; its typed accessors just report those fields as absent. Callers above this layer treat "no cases" and "store broken"
//! the same way, so a live call can always continue.
//!
//! # Write policy
//!
//! [`CaseStore::write_all`] serializes to `<path>.tmp` in the same
//! directory, flushes (and by default fsyncs) it, then renames it over the
//! canonical path. A reader sees either the old document or the new one.
//! A failure at any step leaves the canonical document untouched.
//!
//! # Concurrency
//!
//! Writes and [`CaseStore::update_with`] critical sections hold the
//! process-wide mutex for the canonical path, so concurrent updates never
//! lose each other's changes. Reads take no lock.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use casedesk_core::{Case, Result, StoreError};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::config::{AccessMode, DocumentFormat, StoreConfig};
use crate::lock::{self, FileLock};

/// Durable store for the case sequence
///
/// # Thread Safety
///
/// CaseStore is Send + Sync. Share it behind an `Arc`; independent stores
/// opened on the same path also serialize their writes against each other.
#[derive(Debug)]
pub struct CaseStore {
    config: StoreConfig,
    /// Absolute document path with symlinks resolved
    path: PathBuf,
    temp_path: PathBuf,
    lock_path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CaseStore {
    /// Open the store described by `config`
    ///
    /// Does not touch the document; a store whose file does not exist yet
    /// simply reads as empty.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let path = resolve_path(&config.path)?;
        let temp_path = sibling(&path, "tmp");
        let lock_path = sibling(&path, "lock");
        let write_lock = lock::write_lock_for(&path);

        debug!(
            target: "casedesk::store",
            path = %path.display(),
            access_mode = ?config.access_mode,
            "opened case store"
        );

        Ok(CaseStore {
            config,
            path,
            temp_path,
            lock_path,
            write_lock,
        })
    }

    /// Open a read-write store at `path` with default options
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StoreConfig::new(path))
    }

    /// Canonical document location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Options the store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Read the full case sequence
    ///
    /// Returns an empty sequence when the document is missing, unreadable
    /// or malformed. The condition is logged, never returned.
    pub fn read_all(&self) -> Vec<Case> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    target: "casedesk::store",
                    path = %self.path.display(),
                    "case document does not exist, reading as empty"
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    target: "casedesk::store",
                    path = %self.path.display(),
                    error = %e,
                    "case document is unreadable, reading as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Case>>(&bytes) {
            Ok(cases) => cases,
            Err(e) => {
                warn!(
                    target: "casedesk::store",
                    path = %self.path.display(),
                    error = %e,
                    "case document is malformed, reading as empty"
                );
                Vec::new()
            }
        }
    }

    /// Atomically replace the document with `cases`
    ///
    /// On error the previous document is intact and the failure has
    /// already been logged.
    pub fn write_all(&self, cases: &[Case]) -> Result<()> {
        let _guard = self.write_lock.lock();
        let _file_lock = self.file_lock()?;
        self.write_locked(cases)
    }

    /// Run a read-modify-write critical section
    ///
    /// `mutate` receives the current sequence. If it returns `Some`, the
    /// sequence is written back before the lock is released; if it returns
    /// `None`, nothing is written.
    pub fn update_with<T, F>(&self, mutate: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Vec<Case>) -> Option<T>,
    {
        let _guard = self.write_lock.lock();
        let _file_lock = self.file_lock()?;

        let mut cases = self.read_all();
        match mutate(&mut cases) {
            Some(value) => {
                self.write_locked(&cases)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn file_lock(&self) -> Result<Option<FileLock>> {
        if !self.config.cross_process_lock || self.config.access_mode == AccessMode::ReadOnly {
            return Ok(None);
        }
        FileLock::acquire(&self.lock_path).map(Some).map_err(|e| {
            error!(
                target: "casedesk::store",
                path = %self.lock_path.display(),
                error = %e,
                "failed to lock case document"
            );
            e
        })
    }

    /// Caller holds `write_lock`
    fn write_locked(&self, cases: &[Case]) -> Result<()> {
        if self.config.access_mode == AccessMode::ReadOnly {
            let e = StoreError::ReadOnly {
                path: self.path.clone(),
            };
            error!(target: "casedesk::store", error = %e, "rejected write");
            return Err(e);
        }

        self.replace_document(cases).map_err(|e| {
            error!(
                target: "casedesk::store",
                path = %self.path.display(),
                error = %e,
                "failed to write case document"
            );
            self.discard_temp();
            e
        })
    }

    fn replace_document(&self, cases: &[Case]) -> Result<()> {
        let bytes = match self.config.format {
            DocumentFormat::Pretty => serde_json::to_vec_pretty(cases)?,
            DocumentFormat::Compact => serde_json::to_vec(cases)?,
        };

        let mut file =
            File::create(&self.temp_path).map_err(|e| StoreError::io(&self.temp_path, e))?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|e| StoreError::io(&self.temp_path, e))?;
        if self.config.sync {
            file.sync_all()
                .map_err(|e| StoreError::io(&self.temp_path, e))?;
        }
        drop(file);

        fs::rename(&self.temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        if self.config.sync {
            sync_parent_dir(&self.path);
        }
        debug!(
            target: "casedesk::store",
            path = %self.path.display(),
            cases = cases.len(),
            "case document replaced"
        );
        Ok(())
    }

    fn discard_temp(&self) {
        if self.temp_path.is_file() {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                warn!(
                    target: "casedesk::store",
                    path = %self.temp_path.display(),
                    error = %e,
                    "failed to remove temporary case document"
                );
            }
        }
    }
}

/// Canonical absolute form of `path`
///
/// Relative paths are taken against the working directory. Symlinks and
/// `..` components are resolved so every spelling of one document shares
/// a write lock. When the document does not exist yet only its directory
/// is resolved; when the directory is missing too, the joined path is used
/// as-is and the first write reports the error.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| StoreError::io(path, e))?;
        cwd.join(path)
    };

    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return Ok(canonical);
    }
    let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) else {
        return Ok(absolute);
    };
    match fs::canonicalize(parent) {
        Ok(dir) => Ok(dir.join(name)),
        Err(e) => {
            debug!(
                target: "casedesk::store",
                path = %absolute.display(),
                error = %e,
                "store directory cannot be resolved"
            );
            Ok(absolute)
        }
    }
}

/// `<path>.<suffix>` in the same directory
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Persist the rename itself. Best effort: the new document is already in place.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let Some(parent) = path.parent() else {
        return;
    };
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        warn!(
            target: "casedesk::store",
            path = %parent.display(),
            error = %e,
            "failed to sync store directory"
        );
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}
