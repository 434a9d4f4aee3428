//! The persistent base-type catalog
//!
//! Base types are registered once (by deployment tooling or worker
//! advertisement) and consulted on every identity resolution. Registration is
//! idempotent create-or-fetch under the registry lock, so concurrent
//! registrars converge on one record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Durability, StoreConfig};
use crate::storage::{read_document, write_document, DataLayout, FileLock, StorageResult};

/// A registered base type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseType {
    /// The type name, unique in the catalog
    pub name: String,
    /// When the type was first registered
    pub registered_at: DateTime<Utc>,
}

/// Persisted catalog document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BaseTypesDocument {
    types: BTreeMap<String, BaseType>,
}

/// Handle to the shared base-type catalog.
#[derive(Debug)]
pub struct TypeCatalog {
    layout: DataLayout,
    durability: Durability,
}

impl TypeCatalog {
    /// Open the catalog under `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            layout: DataLayout::new(config.data_dir()),
            durability: config.durability(),
        }
    }

    /// Idempotent create-or-fetch of a base type.
    ///
    /// Re-registering an existing name returns the original record; the
    /// `registered_at` timestamp is never rewritten.
    pub fn register(&self, name: &str) -> StorageResult<BaseType> {
        let lock = FileLock::exclusive(&self.layout.registry_lock_file())?;

        let mut document: BaseTypesDocument =
            read_document(&self.layout.base_types_file())?.unwrap_or_default();

        if let Some(existing) = document.types.get(name) {
            let existing = existing.clone();
            lock.unlock()?;
            return Ok(existing);
        }

        let base_type = BaseType {
            name: name.to_string(),
            registered_at: Utc::now(),
        };
        document.types.insert(name.to_string(), base_type.clone());
        write_document(&self.layout.base_types_file(), &document, self.durability)?;

        lock.unlock()?;
        Ok(base_type)
    }

    /// Optional lookup by name.
    pub fn find(&self, name: &str) -> StorageResult<Option<BaseType>> {
        let document: BaseTypesDocument =
            read_document(&self.layout.base_types_file())?.unwrap_or_default();
        Ok(document.types.get(name).cloned())
    }

    /// All registered types in name order.
    pub fn list(&self) -> StorageResult<Vec<BaseType>> {
        let document: BaseTypesDocument =
            read_document(&self.layout.base_types_file())?.unwrap_or_default();
        Ok(document.types.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Durability;
    use tempfile::TempDir;

    fn catalog(dir: &TempDir) -> TypeCatalog {
        TypeCatalog::open(&StoreConfig::new(dir.path()).with_durability(Durability::NoFsync))
    }

    #[test]
    fn test_register_then_find() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);

        catalog.register("git").unwrap();
        let found = catalog.find("git").unwrap();
        assert_eq!(found.map(|t| t.name), Some("git".to_string()));
    }

    #[test]
    fn test_find_unregistered_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(catalog(&dir).find("nope").unwrap().is_none());
    }

    #[test]
    fn test_register_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);

        let first = catalog.register("git").unwrap();
        let second = catalog.register("git").unwrap();
        assert_eq!(first, second);
        assert_eq!(catalog.list().unwrap().len(), 1);
    }

    #[test]
    fn test_registration_is_visible_to_a_second_handle() {
        let dir = TempDir::new().unwrap();
        catalog(&dir).register("registry-image").unwrap();

        let other = catalog(&dir);
        assert!(other.find("registry-image").unwrap().is_some());
    }

    #[test]
    fn test_list_is_name_ordered() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);
        catalog.register("time").unwrap();
        catalog.register("git").unwrap();

        let names: Vec<String> = catalog.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["git".to_string(), "time".to_string()]);
    }
}
