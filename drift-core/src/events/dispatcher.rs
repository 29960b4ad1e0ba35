//! Synchronous fan-out dispatcher. Ordered per producer (handlers run in
//! registration order for a single `emit_*` call) but not across
//! producers — concurrent emitters may interleave. A panicking handler
//! is caught and logged; it never aborts dispatch to the remaining
//! handlers.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use super::handler::DriftEventHandler;
use super::types::{
    ConstraintViolatedEvent, MemoryCreatedEvent, PatternApprovedEvent, ScanCompleteEvent,
    ScanErrorEvent, ScanProgressEvent, ScanStartedEvent,
};

#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<Vec<Arc<dyn DriftEventHandler>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: Arc<dyn DriftEventHandler>) {
        self.handlers.write().unwrap().push(handler);
    }

    pub fn emit_scan_started(&self, event: ScanStartedEvent) {
        self.dispatch(|h| h.on_scan_started(&event));
    }

    pub fn emit_scan_progress(&self, event: ScanProgressEvent) {
        self.dispatch(|h| h.on_scan_progress(&event));
    }

    pub fn emit_scan_error(&self, event: ScanErrorEvent) {
        self.dispatch(|h| h.on_scan_error(&event));
    }

    pub fn emit_scan_complete(&self, event: ScanCompleteEvent) {
        self.dispatch(|h| h.on_scan_complete(&event));
    }

    pub fn emit_pattern_approved(&self, event: PatternApprovedEvent) {
        self.dispatch(|h| h.on_pattern_approved(&event));
    }

    pub fn emit_constraint_violated(&self, event: ConstraintViolatedEvent) {
        self.dispatch(|h| h.on_constraint_violated(&event));
    }

    pub fn emit_memory_created(&self, event: MemoryCreatedEvent) {
        self.dispatch(|h| h.on_memory_created(&event));
    }

    fn dispatch(&self, mut call: impl FnMut(&Arc<dyn DriftEventHandler>)) {
        let handlers = self.handlers.read().unwrap();
        for handler in handlers.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| call(handler)));
            if let Err(panic) = result {
                tracing::error!(?panic, "event handler panicked; continuing dispatch");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler(Arc<AtomicUsize>);
    impl DriftEventHandler for CountingHandler {
        fn on_scan_complete(&self, _event: &ScanCompleteEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingHandler;
    impl DriftEventHandler for PanickingHandler {
        fn on_scan_complete(&self, _event: &ScanCompleteEvent) {
            panic!("boom");
        }
    }

    fn sample_event() -> ScanCompleteEvent {
        ScanCompleteEvent {
            added: 1,
            modified: 0,
            removed: 0,
            unchanged: 0,
            duration_ms: 10,
        }
    }

    #[test]
    fn panicking_handler_does_not_block_others() {
        let dispatcher = EventDispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        dispatcher.register(Arc::new(PanickingHandler));
        dispatcher.register(Arc::new(CountingHandler(count.clone())));

        dispatcher.emit_scan_complete(sample_event());

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_handlers_is_a_no_op() {
        let dispatcher = EventDispatcher::new();
        dispatcher.emit_scan_complete(sample_event());
    }
}
