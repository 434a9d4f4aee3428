//! The version store
//!
//! Writes apply one check's results to the catalog. Per CATALOG.md §4:
//!
//! - a batch is all-or-nothing and processed strictly in list order
//! - every processed entry takes the next check-order value, existing row or
//!   not, so "latest" tracks what the most recent check actually reported
//! - a repeated single-version save follows the same rule; recency semantics
//!   do not depend on which write operation delivered the version
//!
//! Reads are snapshot-consistent against the last committed document and
//! never touch the counter.

use crate::config::StoreConfig;
use crate::identity::ConfigIdentity;
use crate::observability::{log_event, Event};

use super::catalog::{CatalogStore, IMPLICIT_SPACE};
use super::errors::{StoreError, StoreResult};
use super::payload::{SpaceVersion, VersionPayload};
use super::version::Version;

/// Stores and queries discovered versions.
#[derive(Debug)]
pub struct VersionStore {
    catalog: CatalogStore,
}

impl VersionStore {
    /// Open against `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            catalog: CatalogStore::open(config),
        }
    }

    /// Save one check's full result set to the default space, in order.
    ///
    /// When no default space was ever registered, the implicit "default"
    /// space is created and becomes the default pointer.
    pub fn save_versions(
        &self,
        identity: &ConfigIdentity,
        batch: &[VersionPayload],
    ) -> StoreResult<()> {
        let now = chrono::Utc::now();
        self.catalog.commit(&identity.id, |document| {
            let space = match document.default_space.clone() {
                Some(space) => space,
                None => {
                    document.register_space(IMPLICIT_SPACE);
                    document.default_space = Some(IMPLICIT_SPACE.to_string());
                    IMPLICIT_SPACE.to_string()
                }
            };
            for payload in batch {
                document.record_version(&space, payload, None, now);
            }
            Ok(())
        })?;

        log_event(
            Event::VersionsSaved,
            &[
                ("config_id", identity.id.as_str()),
                ("count", &batch.len().to_string()),
            ],
        );
        Ok(())
    }

    /// Save a single version into an explicitly named space, with metadata.
    ///
    /// Fails with [`StoreError::SpaceNotFound`] when the space was never
    /// registered; the catalog is left unchanged.
    pub fn save_version(
        &self,
        identity: &ConfigIdentity,
        space_version: &SpaceVersion,
    ) -> StoreResult<()> {
        let now = chrono::Utc::now();
        self.catalog.commit(&identity.id, |document| {
            if !document.has_space(&space_version.space) {
                return Err(StoreError::SpaceNotFound(space_version.space.clone()));
            }
            document.record_version(
                &space_version.space,
                &space_version.version,
                Some(&space_version.metadata),
                now,
            );
            Ok(())
        })?;

        log_event(
            Event::VersionSaved,
            &[
                ("config_id", identity.id.as_str()),
                ("space", &space_version.space),
            ],
        );
        Ok(())
    }

    /// The most recently reported version: the row with the maximum check
    /// order in the default space (or across the configuration while no
    /// default pointer is set). `Ok(None)` on an empty catalog.
    pub fn latest_version(&self, identity: &ConfigIdentity) -> StoreResult<Option<Version>> {
        let document = self.catalog.load(&identity.id)?;
        Ok(document.latest().cloned())
    }

    /// Exact canonical-payload lookup. Does not affect check order.
    pub fn find_version(
        &self,
        identity: &ConfigIdentity,
        payload: &VersionPayload,
    ) -> StoreResult<Option<Version>> {
        let document = self.catalog.load(&identity.id)?;
        Ok(document.find(payload).cloned())
    }

    /// All stored versions in the default scope, most recently seen first.
    pub fn versions(&self, identity: &ConfigIdentity) -> StoreResult<Vec<Version>> {
        let document = self.catalog.load(&identity.id)?;
        Ok(document
            .rows_by_recency()
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Durability;
    use crate::identity::{ConfigId, Fingerprint};
    use crate::store::payload::MetadataField;
    use crate::store::spaces::SpaceRegistry;
    use chrono::Utc;
    use tempfile::TempDir;

    fn identity(name: &str) -> ConfigIdentity {
        ConfigIdentity {
            id: ConfigId::from_fingerprint(Fingerprint::of_bytes(name.as_bytes())),
            base_type: "some-type".to_string(),
            source_fingerprint: Fingerprint::of_bytes(b"source"),
            type_chain_fingerprint: Fingerprint::of_bytes(b"chain"),
            created_at: Utc::now(),
        }
    }

    fn store(dir: &TempDir) -> VersionStore {
        VersionStore::open(&StoreConfig::new(dir.path()).with_durability(Durability::NoFsync))
    }

    fn v(reference: &str) -> VersionPayload {
        VersionPayload::from([("ref", reference)])
    }

    #[test]
    fn test_empty_catalog_has_no_latest() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).latest_version(&identity("a")).unwrap().is_none());
    }

    #[test]
    fn test_batch_is_ordered() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let identity = identity("a");

        store.save_versions(&identity, &[v("v1"), v("v3")]).unwrap();

        let latest = store.latest_version(&identity).unwrap().unwrap();
        assert_eq!(latest.payload, v("v3"));
        assert_eq!(latest.check_order.value(), 2);
    }

    #[test]
    fn test_metadata_is_replaced_on_rediscovery() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let identity = identity("a");

        let registry = SpaceRegistry::open(
            &StoreConfig::new(dir.path()).with_durability(Durability::NoFsync),
        );
        registry.save_spaces(&identity, &["space"]).unwrap();

        let first = SpaceVersion {
            space: "space".to_string(),
            version: v("v1"),
            metadata: vec![MetadataField::new("commit", "aaa")],
        };
        store.save_version(&identity, &first).unwrap();

        let second = SpaceVersion {
            metadata: vec![MetadataField::new("commit", "bbb")],
            ..first
        };
        store.save_version(&identity, &second).unwrap();

        let found = store.find_version(&identity, &v("v1")).unwrap().unwrap();
        assert_eq!(found.metadata, vec![MetadataField::new("commit", "bbb")]);
    }
}
