//! Check-lock errors
//!
//! Losing the lock is not an error; it is the `Ok(None)` outcome of acquire.
//! Errors here are contract violations or infrastructure failure only.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for check-lock operations
pub type CheckLockResult<T> = Result<T, CheckLockError>;

/// Errors from check-lock operations.
#[derive(Debug, Error)]
pub enum CheckLockError {
    /// `release` was called on a handle that was already released.
    #[error("check lock handle was already released")]
    AlreadyReleased,

    /// The shared store failed; lock state is indeterminate and the caller
    /// must retry from scratch.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
