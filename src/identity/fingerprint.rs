//! Content fingerprints
//!
//! Fingerprints are SHA-256 over canonical JSON. Source parameters and
//! payloads serialize with sorted keys (BTreeMap-backed), and chains
//! serialize as ordered arrays, so the bytes hashed are identical for
//! structurally equal inputs and distinct when chain order differs.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::{SourceParams, TypeVersionChain};

/// A lowercase-hex SHA-256 fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of a source parameter mapping.
    pub fn of_source(source: &SourceParams) -> Self {
        Self::of_canonical(source)
    }

    /// Fingerprint of an ordered type-version chain.
    pub fn of_chain(chain: &TypeVersionChain) -> Self {
        Self::of_canonical(chain)
    }

    /// Fingerprint of raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    fn of_canonical<T: Serialize>(value: &T) -> Self {
        // Canonical-map types cannot fail to serialize; fall back to an
        // empty-object encoding rather than panicking in library code.
        let bytes = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
        Self::of_bytes(&bytes)
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
