//! File discovery and incremental change detection (§4.1-§4.2).

pub mod cancellation;
pub mod hasher;
pub mod incremental;
pub mod language_detect;
pub mod scanner;
pub mod types;
pub mod walker;

pub use language_detect::Language;
pub use scanner::Scanner;
pub use types::{CachedFileMetadata, DiscoveredFile, FileStatus, ScanDiff, ScanEntry, ScanStats};
