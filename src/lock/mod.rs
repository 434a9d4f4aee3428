//! The identity-scoped check lock
//!
//! Per LOCKING.md §1, the lock answers two independent questions:
//!
//! 1. Is anyone checking this configuration right now? (pure mutual
//!    exclusion, always enforced)
//! 2. Was it checked recently? (the interval throttle, bypassed by an
//!    immediate acquire)
//!
//! Acquire never blocks: losers get `Ok(None)` immediately and schedule their
//! own retry. The lock is session-scoped, held through an open file
//! description that the kernel releases if the holder dies, so a crashed
//! checker can never starve a resource.

pub mod check_lock;
pub mod errors;
pub mod state;

pub use check_lock::{CheckLock, CheckLockHandle};
pub use errors::{CheckLockError, CheckLockResult};
pub use state::CheckLockState;
