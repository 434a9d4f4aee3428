//! Persisted check-lock state
//!
//! One record per configuration: who holds the lock (advisory, for
//! observability) and when a check last completed (load-bearing, for the
//! interval throttle). Exclusion itself is the advisory file lock, never this
//! record: a crashed holder leaves a stale token behind, and that is
//! harmless.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The per-configuration lock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckLockState {
    /// Token of the current holder; `None` when free (or when a crashed
    /// holder's entry has not yet been overwritten)
    pub holder_token: Option<Uuid>,
    /// When a check last completed for this configuration; `None` before the
    /// first check, which the throttle treats as infinitely in the past
    pub last_check_completed_at: Option<DateTime<Utc>>,
}

impl CheckLockState {
    /// State as of a fresh acquisition by `token` at `now`.
    pub fn held(token: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            holder_token: Some(token),
            last_check_completed_at: Some(now),
        }
    }

    /// The same state with the holder cleared, as written on release.
    pub fn released(&self) -> Self {
        Self {
            holder_token: None,
            last_check_completed_at: self.last_check_completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_no_history() {
        let state = CheckLockState::default();
        assert!(state.holder_token.is_none());
        assert!(state.last_check_completed_at.is_none());
    }

    #[test]
    fn test_release_keeps_the_timestamp() {
        let now = Utc::now();
        let held = CheckLockState::held(Uuid::new_v4(), now);
        let released = held.released();

        assert!(released.holder_token.is_none());
        assert_eq!(released.last_check_completed_at, Some(now));
    }

    #[test]
    fn test_state_roundtrips_through_json() {
        let state = CheckLockState::held(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_string(&state).unwrap();
        let back: CheckLockState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
