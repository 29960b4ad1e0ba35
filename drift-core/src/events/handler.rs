//! `DriftEventHandler` — subscriber trait with no-op default methods.
//! Implement only the events a consumer cares about.

use super::types::{
    ConstraintViolatedEvent, MemoryCreatedEvent, PatternApprovedEvent, ScanCompleteEvent,
    ScanErrorEvent, ScanProgressEvent, ScanStartedEvent,
};

pub trait DriftEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_scan_error(&self, _event: &ScanErrorEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
    fn on_pattern_approved(&self, _event: &PatternApprovedEvent) {}
    fn on_constraint_violated(&self, _event: &ConstraintViolatedEvent) {}
    fn on_memory_created(&self, _event: &MemoryCreatedEvent) {}
}

/// Handler that does nothing; used as the bus's baseline when no
/// consumer has registered.
pub struct NoOpEventHandler;

impl DriftEventHandler for NoOpEventHandler {}
