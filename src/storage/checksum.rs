//! CRC32 checksums for persisted documents
//!
//! Per CATALOG.md §2, every document carries a CRC32 (IEEE polynomial) of its
//! serialized body, verified on every load. Uses the crc32fast crate.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Formats a checksum as `crc32:XXXXXXXX` (lowercase hex, zero-padded).
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}

/// Parses a `crc32:XXXXXXXX` string back to the raw value.
///
/// Returns `None` if the prefix or hex digits are invalid.
pub fn parse_checksum(formatted: &str) -> Option<u32> {
    let stripped = formatted.strip_prefix("crc32:")?;
    u32::from_str_radix(stripped, 16).ok()
}
