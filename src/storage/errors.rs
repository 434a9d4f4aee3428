//! Storage error types
//!
//! Infrastructure failures only. Domain-level misses (no prior check, empty
//! catalog, unknown version) are `Ok(None)` at the call sites, never errors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from the shared persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk or lock I/O failure. The caller must treat in-flight state as
    /// indeterminate and retry from scratch.
    #[error("storage io failure at {path}: {source}")]
    Io {
        /// Path the operation was touching
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A persisted document failed checksum verification or decoding.
    #[error("corrupt document at {path}: {reason}")]
    Corrupt {
        /// Path of the corrupt document
        path: PathBuf,
        /// What failed to verify or decode
        reason: String,
    },
}

impl StorageError {
    /// I/O failure at `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Corrupt document at `path`.
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
