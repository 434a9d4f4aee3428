//! Checked atomic document I/O
//!
//! Per CATALOG.md §2, a document on disk is a JSON envelope:
//!
//! ```text
//! { "checksum": "crc32:XXXXXXXX", "body": { ... } }
//! ```
//!
//! The checksum covers the canonical serialization of `body` (serde_json
//! sorts object keys, so the byte form is stable across processes).
//!
//! Writes go through write-temp / fsync / rename. A reader racing a writer
//! sees either the previous document or the new one in full; a crash mid-write
//! leaves at worst a stale temp file that the next rename replaces.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Durability;

use super::checksum::{compute_checksum, format_checksum, parse_checksum};
use super::errors::{StorageError, StorageResult};

/// On-disk envelope wrapping every persisted document.
#[derive(Debug, Serialize, Deserialize)]
struct CheckedDocument {
    checksum: String,
    body: serde_json::Value,
}

/// Writes `body` to `path` atomically, creating parent directories as needed.
pub fn write_document<T: Serialize>(
    path: &Path,
    body: &T,
    durability: Durability,
) -> StorageResult<()> {
    let body = serde_json::to_value(body)
        .map_err(|e| StorageError::corrupt(path, format!("unencodable body: {}", e)))?;
    let body_bytes = canonical_bytes(path, &body)?;

    let document = CheckedDocument {
        checksum: format_checksum(compute_checksum(&body_bytes)),
        body,
    };
    let content = serde_json::to_vec(&document)
        .map_err(|e| StorageError::corrupt(path, format!("unencodable envelope: {}", e)))?;

    let parent = path
        .parent()
        .ok_or_else(|| {
            StorageError::io(
                path,
                io::Error::new(io::ErrorKind::Other, "document path has no parent"),
            )
        })?;
    fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;

    let temp_path = path.with_extension("json.tmp");
    let mut temp = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| StorageError::io(&temp_path, e))?;
    temp.write_all(&content)
        .map_err(|e| StorageError::io(&temp_path, e))?;

    if durability == Durability::Fsync {
        temp.sync_all().map_err(|e| StorageError::io(&temp_path, e))?;
    }
    drop(temp);

    fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;

    if durability == Durability::Fsync {
        // Make the rename itself durable. Failure here is not a torn write,
        // so it is tolerated.
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// Reads the document at `path`, verifying its checksum.
///
/// A missing file is `Ok(None)`: every document in the store has a meaningful
/// empty state (no base types, no prior check, empty catalog).
pub fn read_document<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| StorageError::io(path, e))?;

    let document: CheckedDocument = serde_json::from_slice(&content)
        .map_err(|e| StorageError::corrupt(path, format!("invalid envelope: {}", e)))?;

    let expected = parse_checksum(&document.checksum)
        .ok_or_else(|| StorageError::corrupt(path, "malformed checksum"))?;
    let actual = compute_checksum(&canonical_bytes(path, &document.body)?);
    if actual != expected {
        return Err(StorageError::corrupt(
            path,
            format!(
                "checksum mismatch: stored {} computed {}",
                format_checksum(expected),
                format_checksum(actual)
            ),
        ));
    }

    let body = serde_json::from_value(document.body)
        .map_err(|e| StorageError::corrupt(path, format!("invalid body: {}", e)))?;
    Ok(Some(body))
}

fn canonical_bytes(path: &Path, body: &serde_json::Value) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| StorageError::corrupt(path, format!("unencodable body: {}", e)))
}
