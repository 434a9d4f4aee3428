//! The per-configuration catalog document
//!
//! Per CATALOG.md §3, the document is the unit of atomicity: spaces, the
//! default-space pointer, the check-order counter and every version row
//! commit together or not at all. The counter lives inside the document and
//! is only ever advanced under the catalog lock, which is what serializes
//! check-order assignment across writer processes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Durability, StoreConfig};
use crate::identity::ConfigId;
use crate::storage::{read_document, write_document, DataLayout, FileLock};

use super::errors::StoreResult;
use super::payload::{Metadata, VersionPayload};
use super::version::{CheckOrder, Version};

/// Name of the space used when versions are saved before any space was
/// registered explicitly.
pub const IMPLICIT_SPACE: &str = "default";

/// The persisted catalog for one configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Registered space names
    pub spaces: BTreeSet<String>,
    /// The default-space pointer; `None` until set or implied
    pub default_space: Option<String>,
    /// Last assigned check-order value
    pub check_order_seq: u64,
    /// All version rows, across spaces
    pub versions: Vec<Version>,
}

impl CatalogDocument {
    /// Whether `name` is a registered space.
    pub fn has_space(&self, name: &str) -> bool {
        self.spaces.contains(name)
    }

    /// Register a space; re-registering is a no-op.
    pub fn register_space(&mut self, name: &str) {
        self.spaces.insert(name.to_string());
    }

    /// The space single-space operations target: the default space when the
    /// pointer is set, otherwise the whole configuration.
    fn default_scope(&self) -> Option<&str> {
        self.default_space.as_deref()
    }

    /// Upsert the row for (space, payload) and stamp it with the next check
    /// order. The counter advances whether or not the row already existed:
    /// check order encodes recency of detection, not first discovery.
    pub fn record_version(
        &mut self,
        space: &str,
        payload: &VersionPayload,
        metadata: Option<&Metadata>,
        now: DateTime<Utc>,
    ) {
        self.check_order_seq += 1;
        let check_order = CheckOrder::new(self.check_order_seq);

        if let Some(row) = self
            .versions
            .iter_mut()
            .find(|v| v.space == space && &v.payload == payload)
        {
            row.check_order = check_order;
            if let Some(metadata) = metadata {
                row.metadata = metadata.clone();
            }
            return;
        }

        self.versions.push(Version {
            id: Uuid::new_v4(),
            space: space.to_string(),
            payload: payload.clone(),
            check_order,
            metadata: metadata.cloned().unwrap_or_default(),
            first_seen_at: now,
        });
    }

    /// The row with the maximum check order in the default scope.
    pub fn latest(&self) -> Option<&Version> {
        self.scoped_rows().max_by_key(|v| v.check_order)
    }

    /// Exact canonical-payload lookup in the default scope.
    pub fn find(&self, payload: &VersionPayload) -> Option<&Version> {
        self.scoped_rows().find(|v| &v.payload == payload)
    }

    /// All rows in the default scope, most recently seen first.
    pub fn rows_by_recency(&self) -> Vec<&Version> {
        let mut rows: Vec<&Version> = self.scoped_rows().collect();
        rows.sort_by(|a, b| b.check_order.cmp(&a.check_order));
        rows
    }

    fn scoped_rows(&self) -> impl Iterator<Item = &Version> {
        let scope = self.default_scope().map(str::to_string);
        self.versions
            .iter()
            .filter(move |v| scope.as_deref().map_or(true, |s| v.space == s))
    }
}

/// Loads and transactionally rewrites catalog documents.
#[derive(Debug)]
pub struct CatalogStore {
    layout: DataLayout,
    durability: Durability,
}

impl CatalogStore {
    /// Open against `config`'s data directory.
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            layout: DataLayout::new(config.data_dir()),
            durability: config.durability(),
        }
    }

    /// Snapshot read of the committed catalog. A configuration with no
    /// catalog yet reads as the empty document.
    pub fn load(&self, config_id: &ConfigId) -> StoreResult<CatalogDocument> {
        Ok(read_document(&self.layout.catalog_file(config_id.as_str()))?.unwrap_or_default())
    }

    /// Run `mutate` against the catalog under the per-configuration write
    /// lock and commit the result atomically.
    ///
    /// If `mutate` fails, nothing is written: the batch rolls back entirely
    /// and readers keep seeing the previous snapshot.
    pub fn commit<T>(
        &self,
        config_id: &ConfigId,
        mutate: impl FnOnce(&mut CatalogDocument) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let lock = FileLock::exclusive(&self.layout.catalog_lock_file(config_id.as_str()))?;

        let outcome = self.load(config_id).and_then(|mut document| {
            let value = mutate(&mut document)?;
            write_document(
                &self.layout.catalog_file(config_id.as_str()),
                &document,
                self.durability,
            )?;
            Ok(value)
        });

        lock.unlock()?;
        outcome
    }
}
