//! Source parameter mappings
//!
//! Opaque string-keyed configuration for a resource's source. Secrets are
//! resolved by the caller before reaching this crate; the store never sees
//! credential templates. Values are arbitrary JSON, matching what pipeline
//! definitions can express.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An opaque, canonically ordered source parameter mapping.
///
/// Backed by a `BTreeMap` so fingerprinting two structurally equal sources
/// yields identical bytes regardless of declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SourceParams(BTreeMap<String, serde_json::Value>);

impl SourceParams {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// True when no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<serde_json::Value>, const N: usize> From<[(K, V); N]>
    for SourceParams
{
    fn from(entries: [(K, V); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
