//! Two-phase acquire with interval throttling
//!
//! Per LOCKING.md §3, acquisition is an explicit two-step transition:
//!
//! 1. Grab exclusivity (non-blocking advisory lock). Losing here is final:
//!    another checker is live, `immediate` notwithstanding.
//! 2. With exclusivity held, apply the throttle unless `immediate`: if the
//!    last check completed within the interval, release the grab and lose
//!    cleanly. The losing path leaves no state behind.
//!
//! Only a fully committed acquire writes the lock record (holder token plus
//! `last_check_completed_at = now`), so losers never mutate anything.

use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::config::{Durability, StoreConfig};
use crate::identity::{ConfigId, ConfigIdentity};
use crate::observability::{log_event, Event, Logger};
use crate::storage::{read_document, write_document, DataLayout, FileLock};

use super::errors::{CheckLockError, CheckLockResult};
use super::state::CheckLockState;

/// Acquires check locks scoped to a configuration identity.
#[derive(Debug)]
pub struct CheckLock {
    layout: DataLayout,
    durability: Durability,
}

impl CheckLock {
    /// Open against `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            layout: DataLayout::new(config.data_dir()),
            durability: config.durability(),
        }
    }

    /// Attempt to acquire the check lock for `identity`.
    ///
    /// Returns `Ok(None)` when the lock is held elsewhere, or when
    /// `immediate` is false and a check completed within `interval`. Both are
    /// normal outcomes, not errors, and leave no state behind.
    ///
    /// On success the returned handle owns the lock until `release` or drop;
    /// if the holding process dies first, the kernel reclaims the lock.
    pub fn acquire_with_interval_check(
        &self,
        identity: &ConfigIdentity,
        interval: Duration,
        immediate: bool,
    ) -> CheckLockResult<Option<CheckLockHandle>> {
        let config_id = &identity.id;
        let lock_path = self.layout.check_lock_file(config_id.as_str());
        let state_path = self.layout.check_state_file(config_id.as_str());

        // Phase 1: exclusivity. Unconditional regardless of `immediate`.
        let Some(flock) = FileLock::try_exclusive(&lock_path)? else {
            Logger::trace(Event::LockBusy.as_str(), &[("config_id", config_id.as_str())]);
            return Ok(None);
        };

        // Phase 2: the throttle, checked while holding exclusivity so the
        // read cannot race a concurrent acquire's write.
        if !immediate {
            let state: CheckLockState = read_document(&state_path)?.unwrap_or_default();
            if let Some(last) = state.last_check_completed_at {
                let elapsed = Utc::now().signed_duration_since(last);
                // An interval too large for chrono is one that never elapses.
                let within_interval = match chrono::Duration::from_std(interval) {
                    Ok(interval) => elapsed < interval,
                    Err(_) => true,
                };
                if within_interval {
                    // Checked too recently: roll back the exclusivity grab.
                    flock.unlock()?;
                    Logger::trace(
                        Event::LockThrottled.as_str(),
                        &[("config_id", config_id.as_str())],
                    );
                    return Ok(None);
                }
            }
        }

        // Commit: the timestamp is recorded as part of the acquisition.
        let token = Uuid::new_v4();
        let state = CheckLockState::held(token, Utc::now());
        if let Err(e) = write_document(&state_path, &state, self.durability) {
            // Failed acquisitions must not keep the grab.
            let _ = flock.unlock();
            return Err(e.into());
        }

        log_event(
            Event::LockAcquired,
            &[
                ("config_id", config_id.as_str()),
                ("holder_token", &token.to_string()),
            ],
        );

        Ok(Some(CheckLockHandle {
            flock: Some(flock),
            token,
            config_id: config_id.clone(),
            state_path,
            durability: self.durability,
        }))
    }
}

/// A live, exclusively held check lock.
///
/// Release explicitly on every exit path; dropping an unreleased handle also
/// frees the lock (the guaranteed-cleanup path for panics and cancellation)
/// but skips the holder-token cleanup in the lock record.
#[derive(Debug)]
pub struct CheckLockHandle {
    flock: Option<FileLock>,
    token: Uuid,
    config_id: ConfigId,
    state_path: std::path::PathBuf,
    durability: Durability,
}

impl CheckLockHandle {
    /// The holder token recorded for this acquisition.
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// The configuration this handle locks.
    pub fn config_id(&self) -> &ConfigId {
        &self.config_id
    }

    /// Release the lock.
    ///
    /// A second release on the same handle is [`CheckLockError::AlreadyReleased`];
    /// the lock state itself is not corrupted.
    pub fn release(&mut self) -> CheckLockResult<()> {
        let Some(flock) = self.flock.take() else {
            return Err(CheckLockError::AlreadyReleased);
        };

        // Clear the holder while still exclusive, then free the lock. If the
        // record update fails the unlock still happens, since a stale token
        // is recoverable but a stuck lock is not.
        let outcome = Self::clear_holder(&self.state_path, self.durability);
        flock.unlock()?;
        outcome?;

        log_event(
            Event::LockReleased,
            &[
                ("config_id", self.config_id.as_str()),
                ("holder_token", &self.token.to_string()),
            ],
        );
        Ok(())
    }

    fn clear_holder(
        state_path: &std::path::Path,
        durability: Durability,
    ) -> CheckLockResult<()> {
        let state: CheckLockState = read_document(state_path)?.unwrap_or_default();
        write_document(state_path, &state.released(), durability)?;
        Ok(())
    }
}

impl Drop for CheckLockHandle {
    fn drop(&mut self) {
        if self.flock.is_some() {
            // The flock frees itself when the file closes; just make the
            // abandonment visible.
            Logger::warn(
                Event::LockAbandoned.as_str(),
                &[("config_id", self.config_id.as_str())],
            );
        }
    }
}
