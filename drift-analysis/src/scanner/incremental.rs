//! Per-file classification and diff construction for incremental scans.
//!
//! Classification trusts mtime+size before paying for a hash: if neither
//! changed since the cached scan, the file is `Unchanged` without reading
//! its content. Otherwise the file is hashed and compared against the
//! cached content hash — a `Touched` file (mtime moved, content did not)
//! is folded into the diff's `unchanged` bucket, since nothing downstream
//! needs to re-analyze it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::SystemTime;

use drift_core::errors::ScanError;
use drift_core::types::collections::FxHashMap;

use super::hasher;
use super::types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanEntry, ScanStats};

fn split_mtime(mtime: SystemTime) -> (i64, i64) {
    match mtime.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as i64, d.subsec_nanos() as i64),
        Err(_) => (0, 0),
    }
}

/// Classify one discovered file against its cached metadata.
pub fn classify_file(
    file: &DiscoveredFile,
    cached: Option<&CachedFileMetadata>,
    force_full: bool,
) -> Result<(FileStatus, ScanEntry), ScanError> {
    let (mtime_secs, mtime_nanos) = split_mtime(file.mtime);

    if !force_full {
        if let Some(c) = cached {
            if c.mtime_secs == mtime_secs && c.mtime_nanos == mtime_nanos && c.file_size == file.file_size {
                return Ok((
                    FileStatus::Unchanged,
                    ScanEntry {
                        path: file.path.clone(),
                        file_size: file.file_size,
                        language: file.language,
                        content_hash: c.content_hash,
                        mtime_secs,
                        mtime_nanos,
                    },
                ));
            }
        }
    }

    let content_hash = hasher::hash_file(&file.path)?;
    let status = match cached {
        None => FileStatus::Added,
        Some(c) if c.content_hash == content_hash => FileStatus::Touched,
        Some(_) => FileStatus::Modified,
    };

    Ok((
        status,
        ScanEntry {
            path: file.path.clone(),
            file_size: file.file_size,
            language: file.language,
            content_hash,
            mtime_secs,
            mtime_nanos,
        },
    ))
}

/// Bucket classified entries into a `ScanDiff`, and compute `removed` as
/// whatever cached path was not seen in this pass.
pub fn compute_diff(
    entries: Vec<(FileStatus, ScanEntry)>,
    cached_metadata: &FxHashMap<PathBuf, CachedFileMetadata>,
    stats: ScanStats,
) -> ScanDiff {
    let mut diff = ScanDiff {
        stats,
        ..Default::default()
    };

    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(entries.len());
    for (status, entry) in entries {
        seen.insert(entry.path.clone());
        match status {
            FileStatus::Added => diff.added.push(entry),
            FileStatus::Modified => diff.modified.push(entry),
            FileStatus::Unchanged | FileStatus::Touched => diff.unchanged.push(entry),
        }
    }

    diff.removed = cached_metadata
        .keys()
        .filter(|path| !seen.contains(*path))
        .cloned()
        .collect();
    diff.removed.sort();

    diff
}
