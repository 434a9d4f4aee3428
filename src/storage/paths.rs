//! Data-directory layout
//!
//! Per CATALOG.md §1:
//!
//! ```text
//! <data_dir>/
//!   base_types.json           registered base types
//!   registry.lock             serializes identity + base-type creation
//!   configs/
//!     <config id>/
//!       identity.json         the immutable identity record
//!       catalog.json          spaces, default space, counter, version rows
//!       catalog.lock          serializes catalog writes
//!       check.lock            the check lock (advisory, session-scoped)
//!       check.json            holder token + last-check-completed timestamp
//! ```
//!
//! Paths are derived, never stored, so every process computes the same
//! layout from the shared root.

use std::path::{Path, PathBuf};

/// Resolves all paths under one shared data directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The shared root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The registered base-types document.
    pub fn base_types_file(&self) -> PathBuf {
        self.root.join("base_types.json")
    }

    /// Lock file serializing identity and base-type creation.
    pub fn registry_lock_file(&self) -> PathBuf {
        self.root.join("registry.lock")
    }

    /// Directory holding all per-configuration state.
    pub fn configs_dir(&self) -> PathBuf {
        self.root.join("configs")
    }

    /// Directory for one configuration.
    pub fn config_dir(&self, config_id: &str) -> PathBuf {
        self.configs_dir().join(config_id)
    }

    /// The immutable identity record.
    pub fn identity_file(&self, config_id: &str) -> PathBuf {
        self.config_dir(config_id).join("identity.json")
    }

    /// The version catalog document.
    pub fn catalog_file(&self, config_id: &str) -> PathBuf {
        self.config_dir(config_id).join("catalog.json")
    }

    /// Lock file serializing catalog writes.
    pub fn catalog_lock_file(&self, config_id: &str) -> PathBuf {
        self.config_dir(config_id).join("catalog.lock")
    }

    /// The check-lock file. Holding its advisory lock IS holding the check
    /// lock; the file content is never read.
    pub fn check_lock_file(&self, config_id: &str) -> PathBuf {
        self.config_dir(config_id).join("check.lock")
    }

    /// Holder token and last-check-completed timestamp.
    pub fn check_state_file(&self, config_id: &str) -> PathBuf {
        self.config_dir(config_id).join("check.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_derived_from_root() {
        let layout = DataLayout::new("/var/lib/checkstore");
        assert_eq!(
            layout.catalog_file("abc123"),
            PathBuf::from("/var/lib/checkstore/configs/abc123/catalog.json")
        );
        assert_eq!(
            layout.base_types_file(),
            PathBuf::from("/var/lib/checkstore/base_types.json")
        );
    }

    #[test]
    fn test_per_config_files_share_one_directory() {
        let layout = DataLayout::new("/data");
        let dir = layout.config_dir("id");
        for file in [
            layout.identity_file("id"),
            layout.catalog_file("id"),
            layout.catalog_lock_file("id"),
            layout.check_lock_file("id"),
            layout.check_state_file("id"),
        ] {
            assert_eq!(file.parent().unwrap(), dir);
        }
    }
}
