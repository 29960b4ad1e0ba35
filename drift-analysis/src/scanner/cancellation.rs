//! Scan-scoped cancellation — thin wrapper around `CancellationToken` that
//! also exposes the raw `AtomicBool` the parallel walker polls directly,
//! and supports `reset()` so one `Scanner` can run repeated incremental
//! scans without reallocating.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation handle for a single `Scanner::scan` call.
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation of the in-flight (or next) scan.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear the flag before starting a new scan.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Raw atomic handle, passed down to the parallel walker.
    pub fn as_atomic(&self) -> &AtomicBool {
        &self.flag
    }
}

impl Default for ScanCancellation {
    fn default() -> Self {
        Self::new()
    }
}
