//! Version-store errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for catalog operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from space and version operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named space was never registered for this configuration.
    #[error("space not found: {0}")]
    SpaceNotFound(String),

    /// The shared store failed; the batch was rolled back in full.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
