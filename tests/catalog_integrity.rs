//! Catalog durability and corruption tests

use std::fs;

use checkstore::config::{Durability, StoreConfig};
use checkstore::identity::{ConfigIdentity, IdentityResolver};
use checkstore::storage::DataLayout;
use checkstore::store::{StoreError, VersionPayload, VersionStore};
use checkstore::types::{SourceParams, TypeCatalog, TypeVersionChain};
use tempfile::TempDir;

fn store_config(dir: &TempDir) -> StoreConfig {
    StoreConfig::new(dir.path()).with_durability(Durability::NoFsync)
}

fn resolve_identity(config: &StoreConfig) -> ConfigIdentity {
    TypeCatalog::open(config).register("some-type").unwrap();
    IdentityResolver::open(config)
        .find_or_create(
            "some-type",
            &SourceParams::from([("source-config", "some-value")]),
            &TypeVersionChain::empty(),
        )
        .unwrap()
}

fn v(reference: &str) -> VersionPayload {
    VersionPayload::from([("ref", reference)])
}

/// A committed catalog survives reopening from a fresh handle.
#[test]
fn test_catalog_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let identity = resolve_identity(&config);

    VersionStore::open(&config)
        .save_versions(&identity, &[v("v1"), v("v3")])
        .unwrap();

    let reopened = VersionStore::open(&store_config(&dir));
    let latest = reopened.latest_version(&identity).unwrap().unwrap();
    assert_eq!(latest.payload, v("v3"));
    assert_eq!(latest.check_order.value(), 2);
}

/// Tampering with the catalog document is detected on load.
#[test]
fn test_tampered_catalog_is_detected() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let identity = resolve_identity(&config);
    let store = VersionStore::open(&config);

    store.save_versions(&identity, &[v("v1")]).unwrap();

    let layout = DataLayout::new(dir.path());
    let catalog_path = layout.catalog_file(identity.id.as_str());
    let content = fs::read_to_string(&catalog_path).unwrap();
    fs::write(&catalog_path, content.replace("v1", "v9")).unwrap();

    let result = store.latest_version(&identity);
    assert!(matches!(result, Err(StoreError::Storage(_))));
}

/// A failed batch leaves the previous snapshot fully intact.
#[test]
fn test_failed_batch_rolls_back_entirely() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let identity = resolve_identity(&config);
    let store = VersionStore::open(&config);

    store.save_versions(&identity, &[v("v1")]).unwrap();

    // A save into an unregistered space fails; nothing of it may land.
    let result = store.save_version(
        &identity,
        &checkstore::store::SpaceVersion {
            space: "missing".to_string(),
            version: v("v2"),
            metadata: vec![],
        },
    );
    assert!(result.is_err());

    let rows = store.versions(&identity).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload, v("v1"));
    assert_eq!(rows[0].check_order.value(), 1);
}

/// Writers replace the document atomically: a reader holding the old
/// snapshot keeps a consistent view.
#[test]
fn test_reader_sees_whole_snapshots() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let identity = resolve_identity(&config);
    let store = VersionStore::open(&config);

    store.save_versions(&identity, &[v("v1"), v("v2")]).unwrap();
    let before = store.versions(&identity).unwrap();

    store.save_versions(&identity, &[v("v3")]).unwrap();
    let after = store.versions(&identity).unwrap();

    // Each read is internally consistent: orders are unique within it.
    for snapshot in [&before, &after] {
        let mut orders: Vec<u64> = snapshot.iter().map(|r| r.check_order.value()).collect();
        orders.dedup();
        assert_eq!(orders.len(), snapshot.len());
    }
    assert_eq!(before.len(), 2);
    assert_eq!(after.len(), 3);
}
