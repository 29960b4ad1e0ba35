//! Batched write path: a dedicated writer thread fed by a bounded channel,
//! committing buffered commands in single transactions.

pub mod commands;
pub mod writer;

pub use commands::BatchCommand;
pub use writer::{BatchWriter, WriteStats};
