//! Structured logging setup, built on `tracing` + `tracing-subscriber`.
//!
//! Honors the single logging-level knob recognized by the core:
//! `DRIFT_LOG=module=level,module2=level2,...`, falling back to `info`.

use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::LOG_LEVEL_ENV_VAR;

/// Initialize the global `tracing` subscriber from `DRIFT_LOG`. Safe to
/// call more than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

/// Initialize a subscriber that writes to the given writer instead of
/// stderr; used by tests that want to assert on log output.
#[cfg(any(test, feature = "test-util"))]
pub fn init_test_tracing() {
    let filter = EnvFilter::new("debug");
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
