//! Shared-store persistence primitives
//!
//! Per CATALOG.md §2, all durable state lives in small JSON documents under
//! one data directory, written with the checked atomic pattern:
//!
//! 1. Serialize body, wrap with a CRC32 checksum
//! 2. Write to a temp file in the same directory
//! 3. fsync the temp file
//! 4. Rename temp over the final path (atomic on POSIX)
//!
//! Readers always observe a complete document or the previous one, never a
//! torn write. Cross-process mutual exclusion uses OS advisory locks
//! ([`flock::FileLock`]); the kernel releases them when the holding process
//! dies, which is what makes the check lock session-scoped.

pub mod atomic;
pub mod checksum;
pub mod errors;
pub mod flock;
pub mod paths;

pub use atomic::{read_document, write_document};
pub use checksum::{compute_checksum, format_checksum, parse_checksum};
pub use errors::{StorageError, StorageResult};
pub use flock::FileLock;
pub use paths::DataLayout;
