//! Observable events
//!
//! Events are explicit and typed; free-form event names do not appear in the
//! log stream.

use std::fmt;

/// Observable events in the check coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Identity
    /// A new configuration identity was created
    IdentityCreated,

    // Check lock
    /// Check lock acquired
    LockAcquired,
    /// Check lock released
    LockReleased,
    /// Acquire lost: another holder has the lock
    LockBusy,
    /// Acquire lost: the resource was checked within the interval
    LockThrottled,
    /// A handle was dropped without an explicit release
    LockAbandoned,

    // Catalog
    /// Spaces registered for a configuration
    SpacesSaved,
    /// Default-space pointer updated
    DefaultSpaceSaved,
    /// A batch of versions was committed
    VersionsSaved,
    /// A single space-scoped version was committed
    VersionSaved,
    /// A catalog document failed checksum verification
    CatalogCorruption,
}

impl Event {
    /// The stable event name emitted in the log stream.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IdentityCreated => "IDENTITY_CREATED",
            Event::LockAcquired => "LOCK_ACQUIRED",
            Event::LockReleased => "LOCK_RELEASED",
            Event::LockBusy => "LOCK_BUSY",
            Event::LockThrottled => "LOCK_THROTTLED",
            Event::LockAbandoned => "LOCK_ABANDONED",
            Event::SpacesSaved => "SPACES_SAVED",
            Event::DefaultSpaceSaved => "DEFAULT_SPACE_SAVED",
            Event::VersionsSaved => "VERSIONS_SAVED",
            Event::VersionSaved => "VERSION_SAVED",
            Event::CatalogCorruption => "CATALOG_CORRUPTION",
        }
    }

    /// Whether the event reports unrecoverable state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::CatalogCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
