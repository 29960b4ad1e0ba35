//! Content hashing — xxh3, chosen for throughput over cryptographic strength
//! since collisions only cost a redundant re-parse, never correctness.

use std::fs;
use std::path::Path;

use drift_core::errors::ScanError;
use xxhash_rust::xxh3::xxh3_64;

/// Hash the content of `path`. Returns `ScanError::ReadFailed` if the file
/// cannot be read (permission, vanished between discovery and hashing).
pub fn hash_file(path: &Path) -> Result<u64, ScanError> {
    let bytes = fs::read(path).map_err(|e| ScanError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(hash_content(&bytes))
}

/// Hash a buffer already in memory.
pub fn hash_content(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}
