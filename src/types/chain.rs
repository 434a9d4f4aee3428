//! Type-version chains
//!
//! When a source is interpreted through custom types, each link in the chain
//! carries the custom type's own source and the version of it that is pinned
//! for the run. The chain is ordered (outermost consumer first) and the order
//! is significant for identity: reordering the chain is a different
//! configuration.

use serde::{Deserialize, Serialize};

use crate::store::payload::VersionPayload;

use super::source::SourceParams;

/// One custom type with its nested source/version state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVersion {
    /// The custom type's name as declared by the pipeline
    pub name: String,
    /// The base type the custom type is itself built on
    pub base_type: String,
    /// The custom type's own source parameters
    pub source: SourceParams,
    /// The pinned version of the custom type, when one has been discovered
    pub version: Option<VersionPayload>,
}

impl TypeVersion {
    /// Construct a chain link.
    pub fn new(
        name: impl Into<String>,
        base_type: impl Into<String>,
        source: SourceParams,
        version: Option<VersionPayload>,
    ) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            source,
            version,
        }
    }
}

/// Ordered chain of custom-type versions used to interpret a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TypeVersionChain(Vec<TypeVersion>);

impl TypeVersionChain {
    /// An empty chain: the source is interpreted by its base type directly.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A chain from ordered links.
    pub fn new(links: Vec<TypeVersion>) -> Self {
        Self(links)
    }

    /// The links in order.
    pub fn links(&self) -> &[TypeVersion] {
        &self.0
    }

    /// True when no custom types are involved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
