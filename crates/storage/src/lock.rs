//! Write serialization
//!
//! Every read-modify-write of a case document runs under one mutex per
//! canonical path. The mutexes live in a process-wide registry, so two
//! `CaseStore` values opened on the same file still exclude each other.
//! With `cross_process_lock` enabled, an advisory `fs2` lock on a sidecar
//! file is held as well.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use casedesk_core::{Result, StoreError};
use fs2::FileExt;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Canonical document path -> write mutex
static WRITE_LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get (or create) the write mutex for `path`
pub(crate) fn write_lock_for(path: &Path) -> Arc<Mutex<()>> {
    let mut locks = WRITE_LOCKS.lock();
    locks
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Exclusive advisory lock on a sidecar file, released on drop
#[derive(Debug)]
pub(crate) struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock on `path` is held
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StoreError::Lock {
                path: path.to_path_buf(),
                source,
            })?;
        file.lock_exclusive().map_err(|source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FileLock {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(
                target: "casedesk::store",
                path = %self.path.display(),
                error = %e,
                "failed to release store lock file"
            );
        }
    }
}
