//! Store configuration
//!
//! Every component opens against a [`StoreConfig`] naming the shared data
//! directory. All processes coordinating through one catalog must point at
//! the same directory on a filesystem with POSIX advisory-lock and atomic
//! rename semantics.

use std::path::{Path, PathBuf};

/// Durability mode for catalog writes.
///
/// `Fsync` is the production mode: every document write is fsynced before the
/// atomic rename. `NoFsync` skips the fsync and is intended for tests, where
/// the tempdir does not outlive the process anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// fsync before rename on every document write
    Fsync,
    /// skip fsync (tests only)
    NoFsync,
}

/// Shared-store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    data_dir: PathBuf,
    durability: Durability,
}

impl StoreConfig {
    /// Create a configuration rooted at `data_dir` with full durability.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            durability: Durability::Fsync,
        }
    }

    /// Override the durability mode.
    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    /// The shared data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The configured durability mode.
    pub fn durability(&self) -> Durability {
        self.durability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_fsync() {
        let config = StoreConfig::new("/tmp/checkstore");
        assert_eq!(config.durability(), Durability::Fsync);
        assert_eq!(config.data_dir(), Path::new("/tmp/checkstore"));
    }

    #[test]
    fn test_durability_override() {
        let config = StoreConfig::new("/tmp/checkstore").with_durability(Durability::NoFsync);
        assert_eq!(config.durability(), Durability::NoFsync);
    }
}
