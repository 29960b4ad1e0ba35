//! Shared scanner types: discovery, caching, diffing.

use std::path::PathBuf;
use std::time::SystemTime;

use drift_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use super::language_detect::Language;

/// A file found by the walker, before hashing/classification.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub mtime: SystemTime,
    pub language: Option<Language>,
}

/// Metadata from a prior scan, used to short-circuit hashing via mtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedFileMetadata {
    pub content_hash: u64,
    pub mtime_secs: i64,
    pub mtime_nanos: i64,
    pub file_size: u64,
    pub language: Option<Language>,
}

/// Classification result for one file relative to its cached metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Unchanged,
    /// mtime differs but the content hash matches — touched, not changed.
    Touched,
}

/// A classified file ready for diffing: discovery data plus the computed
/// hash. Paired with its `FileStatus` by `classify_file`/`compute_diff`.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub file_size: u64,
    pub language: Option<Language>,
    pub content_hash: u64,
    pub mtime_secs: i64,
    pub mtime_nanos: i64,
}

/// Aggregate counters for one scan pass.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub discovery_ms: u64,
    pub hashing_ms: u64,
    pub diff_ms: u64,
    pub cache_hit_rate: f64,
    pub files_skipped_large: usize,
    pub files_skipped_ignored: usize,
    pub files_skipped_binary: usize,
    pub languages_found: FxHashMap<Language, usize>,
}

/// The set of changes discovered by one scan, relative to cached metadata.
#[derive(Debug, Clone, Default)]
pub struct ScanDiff {
    pub added: Vec<ScanEntry>,
    pub modified: Vec<ScanEntry>,
    pub removed: Vec<PathBuf>,
    pub unchanged: Vec<ScanEntry>,
    pub errors: Vec<String>,
    pub stats: ScanStats,
}
