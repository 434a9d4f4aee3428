//! Version rows and check order
//!
//! Per CATALOG.md §3:
//! - check order is a strictly increasing integer per configuration, assigned
//!   once per processed batch entry, never reused
//! - the row holding the maximum check order is "latest"
//! - check order encodes recency of detection, not first discovery time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payload::{Metadata, VersionPayload};

/// Position of a version in the per-configuration recency order.
///
/// Total ordering; higher = reported more recently by a check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CheckOrder(u64);

impl CheckOrder {
    /// Construct from a raw counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// One stored version row.
///
/// Unique per (configuration, space, payload). Rediscovery rewrites
/// `check_order` and `metadata` on the existing row; `first_seen_at` is set
/// once at insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Row identifier
    pub id: Uuid,
    /// The space this row belongs to
    pub space: String,
    /// Canonical payload
    pub payload: VersionPayload,
    /// Recency position within the configuration
    pub check_order: CheckOrder,
    /// Annotations from the most recent check that reported this version
    pub metadata: Metadata,
    /// When this payload was first stored
    pub first_seen_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_order_is_totally_ordered() {
        assert!(CheckOrder::new(1) < CheckOrder::new(2));
        assert!(CheckOrder::new(2) < CheckOrder::new(10));
        assert_eq!(CheckOrder::new(7), CheckOrder::new(7));
    }

    #[test]
    fn test_check_order_serializes_as_plain_integer() {
        let json = serde_json::to_string(&CheckOrder::new(4)).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn test_version_roundtrips_through_json() {
        let version = Version {
            id: Uuid::new_v4(),
            space: "default".to_string(),
            payload: VersionPayload::from([("ref", "v1")]),
            check_order: CheckOrder::new(1),
            metadata: vec![],
            first_seen_at: Utc::now(),
        };
        let json = serde_json::to_string(&version).unwrap();
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(version, back);
    }
}
