//! Identity resolution errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Errors from identity resolution.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The base type was never registered in the type catalog.
    #[error("unknown base type: {0}")]
    UnknownBaseType(String),

    /// The shared store failed; identity state is indeterminate.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
