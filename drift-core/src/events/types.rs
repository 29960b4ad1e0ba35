//! Typed event payloads dispatched over the event bus.

use std::path::PathBuf;

/// Emitted when a scan begins, before file discovery completes.
#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: Option<usize>,
}

/// Emitted periodically during scan/hash/detect as files are processed.
#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub processed: usize,
    pub total: usize,
}

/// Emitted when discovery or hashing fails for the scan as a whole
/// (per-file errors are recorded on the `ScanDiff`, not emitted here).
#[derive(Debug, Clone)]
pub struct ScanErrorEvent {
    pub message: String,
}

/// Emitted once a scan (full or incremental) completes, successfully or cancelled.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub duration_ms: u64,
}

/// Emitted when a convention transitions `Discovered -> Approved`.
#[derive(Debug, Clone)]
pub struct PatternApprovedEvent {
    pub pattern_id: u64,
    pub convention_id: String,
    pub file_spread: u32,
}

/// Emitted when a detector emits a new (not-previously-seen) violation.
#[derive(Debug, Clone)]
pub struct ConstraintViolatedEvent {
    pub violation_id: String,
    pub file: String,
    pub line: u32,
    pub severity: String,
    pub fingerprint: String,
}

/// Emitted when a fact is mirrored to the optional external memory store.
/// The memory subsystem itself is an external collaborator; this event
/// carries only an opaque link id, never the memory's content.
#[derive(Debug, Clone)]
pub struct MemoryCreatedEvent {
    pub opaque_memory_id: String,
    pub source_kind: String,
}
