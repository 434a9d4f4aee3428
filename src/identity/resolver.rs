//! Identity resolution
//!
//! `find_or_create` is the only way identities come into existence. The fast
//! path is a plain read: because identifiers are content-derived, a resolver
//! can check for the record without any lock. Creation takes the registry
//! lock, re-checks, then writes, so concurrent creators with equal inputs
//! converge on one record and the loser simply observes the winner's row.

use chrono::Utc;

use crate::config::{Durability, StoreConfig};
use crate::observability::{log_event, Event};
use crate::storage::{read_document, write_document, DataLayout, FileLock};
use crate::types::{SourceParams, TypeCatalog, TypeVersionChain};

use super::errors::{IdentityError, IdentityResult};
use super::fingerprint::Fingerprint;
use super::record::{ConfigId, ConfigIdentity};

/// Resolves stable identities for resource configurations.
#[derive(Debug)]
pub struct IdentityResolver {
    layout: DataLayout,
    durability: Durability,
    types: TypeCatalog,
}

impl IdentityResolver {
    /// Open a resolver against `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            layout: DataLayout::new(config.data_dir()),
            durability: config.durability(),
            types: TypeCatalog::open(config),
        }
    }

    /// Resolve the identity for (base type, source, type chain), creating the
    /// record on first resolution.
    ///
    /// Fails with [`IdentityError::UnknownBaseType`] when `base_type` is not
    /// registered in the type catalog.
    pub fn find_or_create(
        &self,
        base_type: &str,
        source: &SourceParams,
        type_chain: &TypeVersionChain,
    ) -> IdentityResult<ConfigIdentity> {
        if self.types.find(base_type)?.is_none() {
            return Err(IdentityError::UnknownBaseType(base_type.to_string()));
        }

        let source_fingerprint = Fingerprint::of_source(source);
        let type_chain_fingerprint = Fingerprint::of_chain(type_chain);
        let id = Self::derive_id(base_type, &source_fingerprint, &type_chain_fingerprint);

        // Fast path: the record is immutable, so an unlocked read is safe.
        if let Some(existing) = self.load(&id)? {
            return Ok(existing);
        }

        let lock = FileLock::exclusive(&self.layout.registry_lock_file())?;

        // Re-check under the lock: a concurrent creator may have won.
        if let Some(existing) = self.load(&id)? {
            lock.unlock()?;
            return Ok(existing);
        }

        let identity = ConfigIdentity {
            id: id.clone(),
            base_type: base_type.to_string(),
            source_fingerprint,
            type_chain_fingerprint,
            created_at: Utc::now(),
        };
        write_document(
            &self.layout.identity_file(id.as_str()),
            &identity,
            self.durability,
        )?;
        lock.unlock()?;

        log_event(
            Event::IdentityCreated,
            &[
                ("config_id", id.as_str()),
                ("base_type", base_type),
            ],
        );

        Ok(identity)
    }

    fn load(&self, id: &ConfigId) -> IdentityResult<Option<ConfigIdentity>> {
        Ok(read_document(&self.layout.identity_file(id.as_str()))?)
    }

    fn derive_id(
        base_type: &str,
        source_fingerprint: &Fingerprint,
        type_chain_fingerprint: &Fingerprint,
    ) -> ConfigId {
        let preimage = format!(
            "{}\n{}\n{}",
            base_type,
            source_fingerprint.as_str(),
            type_chain_fingerprint.as_str()
        );
        ConfigId::from_fingerprint(Fingerprint::of_bytes(preimage.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> IdentityResolver {
        let config = StoreConfig::new(dir.path()).with_durability(Durability::NoFsync);
        let resolver = IdentityResolver::open(&config);
        resolver.types.register("some-type").unwrap();
        resolver
    }

    fn some_source() -> SourceParams {
        SourceParams::from([("source-config", "some-value")])
    }

    #[test]
    fn test_equal_inputs_resolve_to_one_identity() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver(&dir);

        let first = resolver
            .find_or_create("some-type", &some_source(), &TypeVersionChain::empty())
            .unwrap();
        let second = resolver
            .find_or_create("some-type", &some_source(), &TypeVersionChain::empty())
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
    }

    #[test]
    fn test_different_source_is_a_different_identity() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver(&dir);

        let a = resolver
            .find_or_create("some-type", &some_source(), &TypeVersionChain::empty())
            .unwrap();
        let b = resolver
            .find_or_create(
                "some-type",
                &SourceParams::from([("source-config", "other-value")]),
                &TypeVersionChain::empty(),
            )
            .unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unknown_base_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver(&dir);

        let result = resolver.find_or_create(
            "never-registered",
            &some_source(),
            &TypeVersionChain::empty(),
        );
        assert!(matches!(result, Err(IdentityError::UnknownBaseType(name)) if name == "never-registered"));
    }

    #[test]
    fn test_identity_is_visible_to_a_second_resolver() {
        let dir = TempDir::new().unwrap();
        let first = resolver(&dir);
        let created = first
            .find_or_create("some-type", &some_source(), &TypeVersionChain::empty())
            .unwrap();

        let config = StoreConfig::new(dir.path()).with_durability(Durability::NoFsync);
        let second = IdentityResolver::open(&config);
        let resolved = second
            .find_or_create("some-type", &some_source(), &TypeVersionChain::empty())
            .unwrap();

        assert_eq!(created, resolved);
    }
}
