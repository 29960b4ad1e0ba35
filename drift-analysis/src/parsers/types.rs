//! Flat parse output shared across every language parser and consumed
//! directly by the visitor (single AST pass, §4.4): functions, classes,
//! imports, exports, call sites, and decorators, each carrying its own
//! source range.
//!
//! This is deliberately flatter than the GAST tree in `engine::gast` —
//! detectors that only need "does this file call X" or "what does this
//! function import" work off these lists without re-walking tree-sitter
//! nodes themselves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scanner::language_detect::Language;

/// A half-open `[start, end)` byte/line range into the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: u32,
    pub end_line: u32,
}

impl Range {
    pub fn spanning(a: Range, b: Range) -> Range {
        Range {
            start_byte: a.start_byte.min(b.start_byte),
            end_byte: a.end_byte.max(b.end_byte),
            start_line: a.start_line.min(b.start_line),
            end_line: a.end_line.max(b.end_line),
        }
    }
}

/// Declared or inferred visibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    /// Language has no visibility modifiers on this kind of symbol (e.g.
    /// top-level Python functions).
    Unspecified,
}

/// What a `try`/`catch`/`except`/`rescue` block does with the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorHandlingKind {
    /// Caught and rethrown (possibly wrapped).
    Rethrow,
    /// Caught and logged, execution continues.
    LogAndContinue,
    /// Caught and silently discarded — an empty catch block.
    Swallowed,
    /// Caught and converted into a typed `Result`/`Either`/error value.
    ConvertToResult,
    /// Caught and the process/request is aborted (exit, panic, 5xx).
    Abort,
}

/// A single function or method definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Enclosing class name, if this is a method.
    pub class_name: Option<String>,
    pub visibility: Visibility,
    pub is_async: bool,
    pub is_static: bool,
    pub is_constructor: bool,
    pub is_test: bool,
    pub param_names: SmallVec<[String; 4]>,
    pub param_types: SmallVec<[Option<String>; 4]>,
    pub return_type: Option<String>,
    pub decorators: Vec<DecoratorInfo>,
    pub error_handling: Vec<ErrorHandlingKind>,
    pub line: u32,
    pub end_line: u32,
    pub range: Range,
}

/// A class, struct, interface, or trait definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub is_abstract: bool,
    pub is_interface: bool,
    pub decorators: Vec<DecoratorInfo>,
    pub method_names: Vec<String>,
    pub field_names: Vec<String>,
    pub line: u32,
    pub end_line: u32,
    pub range: Range,
}

/// A decorator/annotation/attribute attached to a function or class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoratorInfo {
    pub name: String,
    pub arguments: Vec<String>,
    pub line: u32,
}

/// One named binding pulled out of an import statement (`import { a, b }`,
/// `from x import y as z`, Go's blank `_` import, etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported_name: String,
    pub local_name: String,
    pub is_default: bool,
    pub is_namespace: bool,
}

/// A single `import`/`require`/`use` statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportInfo {
    pub source: String,
    pub specifiers: Vec<ImportSpecifier>,
    pub is_type_only: bool,
    pub line: u32,
}

/// A single exported symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub name: String,
    pub is_default: bool,
    pub line: u32,
}

/// A call-site: a function/method invocation found anywhere in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    /// Name of the function/method being called, e.g. `"save"`.
    pub callee_name: String,
    /// Receiver expression text for method calls, e.g. `"this.repo"`; `None`
    /// for bare function calls.
    pub receiver: Option<String>,
    /// Name of the enclosing function this call occurs in, if any.
    pub caller_function: Option<String>,
    pub argument_count: usize,
    pub line: u32,
    pub column: u32,
}

/// Everything extracted from parsing a single source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub file: String,
    pub language: Language,
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub call_sites: Vec<CallSite>,
    pub string_literals: Vec<(String, u32)>,
    /// Byte ranges tree-sitter could not parse (`ERROR`/`MISSING` nodes);
    /// detectors still run on the rest of the tree.
    pub error_ranges: Vec<Range>,
    pub parse_time_us: u64,
}

impl ParseResult {
    pub fn empty(file: impl Into<String>, language: Language) -> Self {
        Self {
            file: file.into(),
            language,
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            call_sites: Vec::new(),
            string_literals: Vec::new(),
            error_ranges: Vec::new(),
            parse_time_us: 0,
        }
    }

    /// `true` if tree-sitter reported at least one `ERROR`/`MISSING` node.
    pub fn has_errors(&self) -> bool {
        !self.error_ranges.is_empty()
    }
}
