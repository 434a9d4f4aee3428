//! The persisted identity record
//!
//! Immutable once created: a change in source or type chain yields a
//! different identity, not a mutation of this record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;

/// Stable identifier of one resource configuration.
///
/// Content-derived (SHA-256 of base type + source fingerprint + chain
/// fingerprint), so it doubles as the configuration's directory name in the
/// shared store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(String);

impl ConfigId {
    pub(crate) fn from_fingerprint(fingerprint: Fingerprint) -> Self {
        Self(fingerprint.as_str().to_string())
    }

    /// The identifier as a path-safe string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resolved resource configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIdentity {
    /// Stable identifier
    pub id: ConfigId,
    /// The registered base type interpreting the source
    pub base_type: String,
    /// Fingerprint of the canonicalized source parameters
    pub source_fingerprint: Fingerprint,
    /// Fingerprint of the ordered type-version chain
    pub type_chain_fingerprint: Fingerprint,
    /// When this identity was first resolved anywhere
    pub created_at: DateTime<Utc>,
}
