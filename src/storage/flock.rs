//! Advisory file locks
//!
//! Per LOCKING.md §2, cross-process mutual exclusion is `flock(2)` through
//! the fs2 crate. Two properties make it the right primitive here:
//!
//! - `flock(LOCK_EX | LOCK_NB)` is an atomic, non-blocking test-and-acquire
//! - the kernel releases the lock when the holding file description closes,
//!   including when the holder crashes
//!
//! Locks taken on separate opens of the same path conflict even within one
//! process, so a test can stand in for a second orchestrator process by
//! simply acquiring again.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::errors::{StorageError, StorageResult};

/// An exclusive advisory lock on a file, held until released or dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Non-blocking exclusive acquire. `Ok(None)` when another holder has the
    /// lock; errors are real I/O failures only.
    pub fn try_exclusive(path: &Path) -> StorageResult<Option<Self>> {
        let file = Self::open_lock_file(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self {
                file,
                path: path.to_path_buf(),
            })),
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Blocking exclusive acquire, for short write-serialization sections.
    pub fn exclusive(path: &Path) -> StorageResult<Self> {
        let file = Self::open_lock_file(path)?;
        file.lock_exclusive().map_err(|e| StorageError::io(path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Explicit release. Dropping the lock releases it too; this exists so
    /// callers on a failure path can surface the unlock error.
    pub fn unlock(self) -> StorageResult<()> {
        FileExt::unlock(&self.file).map_err(|e| StorageError::io(&self.path, e))
    }

    /// The locked path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock_file(path: &Path) -> StorageResult<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|e| StorageError::io(path, e))
    }
}

// No Drop impl: closing the file description releases the flock. That is the
// crash-reclamation path, so it must not depend on destructor logic.
