//! The per-language parser contract implemented once per tree-sitter
//! grammar and dispatched to by `ParserManager`.

use std::path::Path;

use drift_core::errors::ParseError;

use super::types::ParseResult;

/// A single language's tree-sitter grammar plus flat-info extraction.
pub trait LanguageParser: Send + Sync {
    /// Parse `source` (already read from `path`) into a `ParseResult`.
    ///
    /// Never fails outright on a syntax error — tree-sitter's error
    /// recovery means a partial tree is still usable, so `error_ranges`
    /// carries the damage instead of an `Err`. `Err` is reserved for
    /// conditions that make extraction meaningless (e.g. the grammar
    /// itself rejects the whole buffer as binary).
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError>;
}
