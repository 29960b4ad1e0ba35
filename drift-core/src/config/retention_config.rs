//! Retention policy for append-only tables (health trends, scan history,
//! query telemetry). Deserializes from the root config's `[backup]`
//! section name for TOML back-compat, but only governs in-store trimming
//! — no backup/upgrade scripting lives here (that is an external
//! collaborator's concern).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename = "backup")]
pub struct RetentionConfig {
    /// Max age in days for append-only rows before trimming. Default: 180.
    pub max_age_days: Option<u32>,
    /// Max row count per append-only table before trimming oldest first. Default: 10_000.
    pub max_rows: Option<u32>,
    /// Freelist fraction above which `incremental_vacuum` runs. Default: 0.20.
    pub vacuum_freelist_threshold: Option<f64>,
}

impl RetentionConfig {
    pub fn effective_max_age_days(&self) -> u32 {
        self.max_age_days.unwrap_or(180)
    }
    pub fn effective_max_rows(&self) -> u32 {
        self.max_rows.unwrap_or(10_000)
    }
    pub fn effective_vacuum_freelist_threshold(&self) -> f64 {
        self.vacuum_freelist_threshold.unwrap_or(0.20)
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            max_age_days: other.max_age_days.or(self.max_age_days),
            max_rows: other.max_rows.or(self.max_rows),
            vacuum_freelist_threshold: other
                .vacuum_freelist_threshold
                .or(self.vacuum_freelist_threshold),
        }
    }
}
