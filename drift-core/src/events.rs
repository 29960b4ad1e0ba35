//! Cross-system event bus: a trait with no-op default methods, not a
//! runtime registry of loose callbacks. Dispatch is synchronous fan-out
//! with per-handler panic isolation; there is no persistence or replay.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::DriftEventHandler;
pub use types::{
    ConstraintViolatedEvent, MemoryCreatedEvent, PatternApprovedEvent, ScanCompleteEvent,
    ScanErrorEvent, ScanProgressEvent, ScanStartedEvent,
};
