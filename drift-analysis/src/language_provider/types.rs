//! Shared types for cross-language ORM call-chain normalization and N+1
//! detection.

use crate::scanner::language_detect::Language;

/// What kind of data operation a matched call chain performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOperation {
    Select,
    Insert,
    Update,
    Delete,
    RawQuery,
}

/// One argument passed to a call in a chain, as far as the flat parse
/// output lets us reconstruct it.
#[derive(Debug, Clone)]
pub enum CallArg {
    StringLiteral(String),
    Other,
}

/// One call in a normalized chain, e.g. the `.findOne(...)` in
/// `User.findOne(...)`.
#[derive(Debug, Clone)]
pub struct ChainCall {
    pub method: String,
    pub args: Vec<CallArg>,
}

/// A call chain normalized to a language-independent shape so the N+1
/// detector and framework matchers don't need per-language branching.
#[derive(Debug, Clone)]
pub struct UnifiedCallChain {
    pub receiver: String,
    pub calls: Vec<ChainCall>,
    pub file: String,
    pub line: u32,
    pub language: Language,
}
