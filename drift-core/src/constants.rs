//! Engine-wide constants. Centralized so the numbers in spec prose (§4)
//! have exactly one source of truth in code.

/// Default max scanned file size, bytes (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Bounded ingest channel capacity feeding the Store's writer thread.
pub const BATCH_CHANNEL_CAPACITY: usize = 1024;

/// Max rows grouped per writer transaction.
pub const BATCH_MAX_ROWS: usize = 500;

/// Writer idle flush interval.
pub const BATCH_FLUSH_INTERVAL_MS: u64 = 100;

/// SQLite busy_timeout pragma.
pub const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

/// SQLite mmap_size pragma, bytes (256 MiB).
pub const SQLITE_MMAP_SIZE_BYTES: u64 = 256 * 1024 * 1024;

/// SQLite page cache, bytes (64 MiB).
pub const SQLITE_PAGE_CACHE_BYTES: u64 = 64 * 1024 * 1024;

/// Default reachability BFS max depth.
pub const DEFAULT_REACHABILITY_MAX_DEPTH: u32 = 20;

/// Recursive-CTE fallback BFS max depth.
pub const CTE_MAX_DEPTH: u32 = 5;

/// Pattern population size above which pairwise Jaccard gives way to MinHash LSH.
pub const MINHASH_LSH_THRESHOLD: usize = 50_000;

/// Jaccard similarity at which two patterns are flagged as merge candidates.
pub const MERGE_CANDIDATE_THRESHOLD: f64 = 0.85;

/// Jaccard similarity at which two patterns auto-merge.
pub const AUTO_MERGE_THRESHOLD: f64 = 0.95;

/// Fuzzy call-resolution name-similarity floor.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.85;

/// Days of absence after which a pattern's momentum applies temporal decay.
pub const MOMENTUM_DECAY_DAYS: u32 = 30;

/// Days of absence after which a convention is marked Expired.
pub const CONVENTION_EXPIRY_DAYS: u32 = 90;

/// Dominance-ratio gap below which two alternatives are Contested.
pub const CONTESTED_GAP: f64 = 0.20;

/// Trailing window over which a detector's false-positive rate is evaluated.
pub const DETECTOR_FP_WINDOW_DAYS: u32 = 30;

/// False-positive rate above which a detector becomes a disablement candidate.
pub const DETECTOR_FP_DISABLE_THRESHOLD: f64 = 0.20;

/// `user_version` pragma key used to track the schema migration level.
pub const SCHEMA_VERSION_PRAGMA: &str = "user_version";

/// Environment variable recognized for structured-log level configuration.
pub const LOG_LEVEL_ENV_VAR: &str = "DRIFT_LOG";

/// Environment variable override for project-root discovery.
pub const PROJECT_ROOT_ENV_VAR: &str = "DRIFT_PROJECT_ROOT";

/// Name of the embedded database file at the project root.
pub const DB_FILE_NAME: &str = "drift.db";

/// Name of the advisory lock file at the project root.
pub const LOCK_FILE_NAME: &str = "drift.lock";
