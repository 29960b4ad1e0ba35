//! Store configuration: SQLite pragma knobs, pool sizing, batch writer
//! tuning. See `drift-storage::connection` for where these apply.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the embedded database file. Default: `<project_root>/drift.db`.
    pub db_path: Option<String>,
    /// Reader connection pool size. Default: 4.
    pub reader_pool_size: Option<usize>,
    /// `mmap_size` pragma, bytes. Default: 256 MiB.
    pub mmap_size_bytes: Option<u64>,
    /// `cache_size` pragma, bytes. Default: 64 MiB.
    pub page_cache_bytes: Option<u64>,
    /// `busy_timeout` pragma, milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u64>,
    /// Bounded ingest channel capacity. Default: 1024.
    pub batch_channel_capacity: Option<usize>,
    /// Max rows per writer transaction. Default: 500.
    pub batch_size: Option<usize>,
    /// Writer idle flush interval, milliseconds. Default: 100.
    pub batch_flush_interval_ms: Option<u64>,
}

impl StorageConfig {
    pub fn effective_db_path(&self, project_root: &str) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(|| format!("{project_root}/drift.db"))
    }

    pub fn effective_reader_pool_size(&self) -> usize {
        self.reader_pool_size.unwrap_or(4)
    }

    pub fn effective_mmap_size_bytes(&self) -> u64 {
        self.mmap_size_bytes.unwrap_or(256 * 1024 * 1024)
    }

    pub fn effective_page_cache_bytes(&self) -> u64 {
        self.page_cache_bytes.unwrap_or(64 * 1024 * 1024)
    }

    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5_000)
    }

    pub fn effective_batch_channel_capacity(&self) -> usize {
        self.batch_channel_capacity.unwrap_or(1024)
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(500)
    }

    pub fn effective_batch_flush_interval_ms(&self) -> u64 {
        self.batch_flush_interval_ms.unwrap_or(100)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            db_path: other.db_path.or(self.db_path),
            reader_pool_size: other.reader_pool_size.or(self.reader_pool_size),
            mmap_size_bytes: other.mmap_size_bytes.or(self.mmap_size_bytes),
            page_cache_bytes: other.page_cache_bytes.or(self.page_cache_bytes),
            busy_timeout_ms: other.busy_timeout_ms.or(self.busy_timeout_ms),
            batch_channel_capacity: other.batch_channel_capacity.or(self.batch_channel_capacity),
            batch_size: other.batch_size.or(self.batch_size),
            batch_flush_interval_ms: other
                .batch_flush_interval_ms
                .or(self.batch_flush_interval_ms),
        }
    }
}
