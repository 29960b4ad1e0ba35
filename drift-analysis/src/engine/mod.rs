//! Detection engine: the single-AST-pass visitor, pattern matching, and
//! incremental re-analysis on top of the scanner/parser layers.

pub mod gast;
pub mod incremental;
pub mod pipeline;
pub mod regex_engine;
pub mod resolution;
pub mod string_extraction;
pub mod types;
pub mod visitor;

pub use gast::{GASTNode, GASTNormalizer};
pub use incremental::IncrementalAnalyzer;
pub use pipeline::AnalysisPipeline;
pub use regex_engine::RegexEngine;
pub use resolution::{ResolutionIndex, ResolutionStrategy};
pub use types::{AnalysisResult, DetectionMethod, PatternCategory, PatternMatch};
pub use visitor::{DetectionContext, DetectionEngine, VisitorRegistry};
