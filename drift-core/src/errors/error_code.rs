//! Stable string error codes, independent of enum variant names, for
//! consumers crossing an FFI or process boundary.

/// Maps a typed error to a stable `&'static str` code.
pub trait DriftErrorCode: std::error::Error {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_MALFORMED: &str = "CONFIG_MALFORMED";
pub const CONFIG_UNKNOWN_KEY: &str = "CONFIG_UNKNOWN_KEY";
pub const CONFIG_INVALID_PATTERN: &str = "CONFIG_INVALID_PATTERN";

pub const SCAN_PERMISSION_DENIED: &str = "SCAN_PERMISSION_DENIED";
pub const SCAN_READ_FAILED: &str = "SCAN_READ_FAILED";
pub const SCAN_OVERSIZE: &str = "SCAN_OVERSIZE";

pub const PARSER_GRAMMAR_ERROR: &str = "PARSER_GRAMMAR_ERROR";
pub const PARSER_UNSUPPORTED_LANGUAGE: &str = "PARSER_UNSUPPORTED_LANGUAGE";
pub const PARSER_POOL_EXHAUSTED: &str = "PARSER_POOL_EXHAUSTED";

pub const DETECTOR_FAILED: &str = "DETECTOR_FAILED";

pub const DETECTION_MALFORMED_PACK: &str = "DETECTION_MALFORMED_PACK";
pub const DETECTION_INVALID_REGEX: &str = "DETECTION_INVALID_REGEX";
pub const DETECTION_INVALID_GLOB: &str = "DETECTION_INVALID_GLOB";

pub const PIPELINE_INCONSISTENT: &str = "PIPELINE_INCONSISTENT";
pub const PIPELINE_NON_FINITE: &str = "PIPELINE_NON_FINITE";

pub const BOUNDARY_EXTRACTOR_FAILED: &str = "BOUNDARY_EXTRACTOR_FAILED";

pub const CALL_GRAPH_CYCLE_LIMIT: &str = "CALL_GRAPH_CYCLE_LIMIT";
pub const CALL_GRAPH_BUILD_FAILED: &str = "CALL_GRAPH_BUILD_FAILED";

pub const DB_BUSY: &str = "DB_BUSY";
pub const DB_CORRUPT: &str = "DB_CORRUPT";
pub const DISK_FULL: &str = "DISK_FULL";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
