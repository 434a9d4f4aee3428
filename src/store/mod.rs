//! Spaces and the version catalog
//!
//! Per CATALOG.md §3, each configuration owns one catalog document holding
//! its spaces, the default-space pointer, the check-order counter and all
//! version rows. Writers serialize on the per-configuration catalog lock and
//! commit the whole document atomically; readers load the last committed
//! snapshot with no lock at all.

pub mod catalog;
pub mod errors;
pub mod payload;
pub mod spaces;
pub mod version;
pub mod version_store;

pub use errors::{StoreError, StoreResult};
pub use payload::{Metadata, MetadataField, SpaceVersion, VersionPayload};
pub use spaces::SpaceRegistry;
pub use version::{CheckOrder, Version};
pub use version_store::VersionStore;
