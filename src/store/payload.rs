//! Canonical version payloads and metadata
//!
//! A discovered version is identified by its payload: an ordered mapping of
//! string keys to string values. Payloads are compared by canonical form, so
//! the key order callers build them in is irrelevant. This is a pure type
//! module with no behavior beyond construction and access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical payload of one discovered version.
///
/// Backed by a `BTreeMap` so serialization and equality are canonical by
/// construction: `{"a":"1","b":"2"}` and `{"b":"2","a":"1"}` are the same
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VersionPayload(BTreeMap<String, String>);

impl VersionPayload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate entries in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for VersionPayload {
    fn from(entries: [(K, V); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for VersionPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One key/value annotation attached to a version by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Annotation name
    pub name: String,
    /// Annotation value
    pub value: String,
}

impl MetadataField {
    /// Construct a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of annotations; order is the order the check reported them.
pub type Metadata = Vec<MetadataField>;

/// A version targeted at an explicit space, with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceVersion {
    /// The space to store into; must be registered
    pub space: String,
    /// The version payload
    pub version: VersionPayload,
    /// Annotations reported by the check
    pub metadata: Metadata,
}
