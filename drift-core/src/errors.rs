//! Error taxonomy shared across the Drift analysis engine.
//!
//! Every domain error enum implements [`error_code::DriftErrorCode`] so
//! callers at an FFI or CLI boundary can map typed errors to a stable
//! string code without matching on enum variants directly.

pub mod error_code;
pub mod storage_error;

pub use error_code::DriftErrorCode;
pub use storage_error::StorageError;

use thiserror::Error;

/// Configuration-layer errors: malformed TOML, unknown keys in strict
/// sections, invalid pattern specs. Fatal to the affected load only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed TOML in {path}: {message}")]
    MalformedToml { path: String, message: String },

    #[error("unknown key '{key}' in section [{section}]")]
    UnknownKey { section: String, key: String },

    #[error("invalid pattern spec '{id}': {reason}")]
    InvalidPatternSpec { id: String, reason: String },

    #[error("invalid taint registry entry '{id}': {reason}")]
    InvalidTaintEntry { id: String, reason: String },
}

impl DriftErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedToml { .. } => error_code::CONFIG_MALFORMED,
            Self::UnknownKey { .. } => error_code::CONFIG_UNKNOWN_KEY,
            Self::InvalidPatternSpec { .. } => error_code::CONFIG_INVALID_PATTERN,
            Self::InvalidTaintEntry { .. } => error_code::CONFIG_INVALID_PATTERN,
        }
    }
}

/// Scanner/IO errors. Per-file; the scan continues and the file is marked
/// with the error rather than aborting the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("{path} exceeds the configured size cap ({size} > {cap} bytes)")]
    Oversize { path: String, size: u64, cap: u64 },
}

impl DriftErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => error_code::SCAN_PERMISSION_DENIED,
            Self::ReadFailed { .. } => error_code::SCAN_READ_FAILED,
            Self::Oversize { .. } => error_code::SCAN_OVERSIZE,
        }
    }
}

/// Parser errors. Per-file; a partial `ParseResult` with error ranges is
/// always preserved so detectors can still run on the valid subtrees.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("grammar error in {path} at {line}:{column}: {message}")]
    GrammarError {
        path: String,
        line: u32,
        column: u32,
        message: String,
    },

    #[error("unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("parser pool exhausted for language {language}")]
    PoolExhausted { language: String },
}

impl DriftErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GrammarError { .. } => error_code::PARSER_GRAMMAR_ERROR,
            Self::UnsupportedLanguage { .. } => error_code::PARSER_UNSUPPORTED_LANGUAGE,
            Self::PoolExhausted { .. } => error_code::PARSER_POOL_EXHAUSTED,
        }
    }
}

/// Detector errors: a detector panicked or returned an error on an
/// otherwise-valid file. That detector's output for the file is
/// discarded; the detector itself is not disabled here (see
/// `IDriftEnforcement::detector_false_positive_rate` for the policy
/// that decides disablement).
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector {detector_id} failed on {path}: {message}")]
    Failed {
        detector_id: String,
        path: String,
        message: String,
    },
}

impl DriftErrorCode for DetectorError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTOR_FAILED
    }
}

/// Framework-pack loading errors: malformed TOML, unparsable regex/glob
/// inside a `match` block. The offending pack is skipped; loading continues
/// with the remaining built-in and custom packs.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("malformed framework pack: {message}")]
    MalformedPack { message: String },

    #[error("invalid regex '{pattern}' in pack '{pack}': {message}")]
    InvalidRegex {
        pack: String,
        pattern: String,
        message: String,
    },

    #[error("invalid glob '{pattern}' in pack '{pack}': {message}")]
    InvalidGlob {
        pack: String,
        pattern: String,
        message: String,
    },
}

impl DriftErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedPack { .. } => error_code::DETECTION_MALFORMED_PACK,
            Self::InvalidRegex { .. } => error_code::DETECTION_INVALID_REGEX,
            Self::InvalidGlob { .. } => error_code::DETECTION_INVALID_GLOB,
        }
    }
}

impl From<toml::de::Error> for DetectionError {
    fn from(e: toml::de::Error) -> Self {
        Self::MalformedPack { message: e.to_string() }
    }
}

/// Boundary-analysis errors: a field extractor failed against an otherwise
/// valid `ParseResult`. Non-fatal — that extractor's models for the file
/// are dropped and the scan continues with the rest.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("extractor for {framework} failed on {path}: {message}")]
    ExtractorFailed {
        framework: String,
        path: String,
        message: String,
    },
}

impl DriftErrorCode for BoundaryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ExtractorFailed { .. } => error_code::BOUNDARY_EXTRACTOR_FAILED,
        }
    }
}

/// Call-graph construction errors. Non-fatal to the overall scan — the
/// caller falls back to an empty or partial graph and keeps going.
#[derive(Debug, Error)]
pub enum CallGraphError {
    #[error("call graph build failed: {message}")]
    BuildFailed { message: String },

    #[error("cycle depth exceeded limit of {limit} while traversing from {from}")]
    CycleLimitExceeded { from: String, limit: usize },
}

impl DriftErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BuildFailed { .. } => error_code::CALL_GRAPH_BUILD_FAILED,
            Self::CycleLimitExceeded { .. } => error_code::CALL_GRAPH_CYCLE_LIMIT,
        }
    }
}

/// Pipeline-level errors: unrecoverable inconsistencies discovered by the
/// orchestrator (e.g. aggregation sees a negative counter). The scan fails
/// with a specific diagnostic; prior durable state is left intact.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("inconsistent state: {message}")]
    Inconsistent { message: String },

    #[error("NaN or infinite value encountered computing {context}")]
    NonFiniteFloat { context: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DriftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Inconsistent { .. } => error_code::PIPELINE_INCONSISTENT,
            Self::NonFiniteFloat { .. } => error_code::PIPELINE_NON_FINITE,
            Self::Storage(e) => e.error_code(),
        }
    }
}

/// Sentinel carried via explicit status, never surfaced as a `Result::Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;
