//! Table-scoped query modules. Each module owns one or a few related tables
//! and exposes plain functions over `&rusqlite::Connection` — no trait
//! dispatch here, that lives in `engine.rs`.

pub mod boundaries;
pub mod call_edges;
pub mod detections;
pub mod enforcement;
pub mod files;
pub mod functions;
pub mod parse_cache;
pub mod patterns;
pub mod scan_history;
