//! Space registration
//!
//! Spaces partition one configuration's catalog into independent version
//! streams. Registration is idempotent; the default-space pointer may only
//! reference a space that was registered first.

use crate::config::StoreConfig;
use crate::identity::ConfigIdentity;
use crate::observability::{log_event, Event};

use super::catalog::CatalogStore;
use super::errors::{StoreError, StoreResult};

/// Registers spaces and the default-space pointer for configurations.
#[derive(Debug)]
pub struct SpaceRegistry {
    catalog: CatalogStore,
}

impl SpaceRegistry {
    /// Open against `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            catalog: CatalogStore::open(config),
        }
    }

    /// Register a set of spaces for `identity`. Re-registering an existing
    /// name is a no-op.
    pub fn save_spaces(&self, identity: &ConfigIdentity, names: &[&str]) -> StoreResult<()> {
        self.catalog.commit(&identity.id, |document| {
            for name in names {
                document.register_space(name);
            }
            Ok(())
        })?;

        log_event(
            Event::SpacesSaved,
            &[
                ("config_id", identity.id.as_str()),
                ("count", &names.len().to_string()),
            ],
        );
        Ok(())
    }

    /// Point the default space at `name`.
    ///
    /// Fails with [`StoreError::SpaceNotFound`] when `name` was never
    /// registered for this identity.
    pub fn save_default_space(&self, identity: &ConfigIdentity, name: &str) -> StoreResult<()> {
        self.catalog.commit(&identity.id, |document| {
            if !document.has_space(name) {
                return Err(StoreError::SpaceNotFound(name.to_string()));
            }
            document.default_space = Some(name.to_string());
            Ok(())
        })?;

        log_event(
            Event::DefaultSpaceSaved,
            &[
                ("config_id", identity.id.as_str()),
                ("space", name),
            ],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Durability;
    use crate::identity::{ConfigId, Fingerprint};
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

    fn registry(dir: &TempDir) -> SpaceRegistry {
        SpaceRegistry::open(&StoreConfig::new(dir.path()).with_durability(Durability::NoFsync))
    }

    #[test]
    fn test_save_spaces_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let identity = identity("a");

        registry.save_spaces(&identity, &["space"]).unwrap();
        registry.save_spaces(&identity, &["space", "other"]).unwrap();

        let catalog = CatalogStore::open(
            &StoreConfig::new(dir.path()).with_durability(Durability::NoFsync),
        );
        let document = catalog.load(&identity.id).unwrap();
        assert_eq!(document.spaces.len(), 2);
    }

    #[test]
    fn test_default_space_requires_registration() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);
        let identity = identity("a");

        let result = registry.save_default_space(&identity, "space");
        assert!(matches!(result, Err(StoreError::SpaceNotFound(name)) if name == "space"));

        registry.save_spaces(&identity, &["space"]).unwrap();
        registry.save_default_space(&identity, "space").unwrap();
    }

    #[test]
    fn test_spaces_are_scoped_per_identity() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.save_spaces(&identity("a"), &["space"]).unwrap();

        let result = registry.save_default_space(&identity("b"), "space");
        assert!(matches!(result, Err(StoreError::SpaceNotFound(_))));
    }
}
