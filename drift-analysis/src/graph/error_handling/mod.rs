//! Error-propagation analysis: traces how an error raised deep in the
//! call graph surfaces (or doesn't) to a handling function, and flags
//! swallowed catches, process aborts, and unhandled propagation chains.

pub mod gap_analysis;
pub mod handler_detection;
pub mod propagation;
pub mod types;

pub use gap_analysis::{find_gaps, gap_ratio};
pub use handler_detection::detect_handlers;
pub use propagation::trace_propagation;
pub use types::{ErrorHandler, ErrorHandlingGap, GapKind, PropagationChain, PropagationNode};
