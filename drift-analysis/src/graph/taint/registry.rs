//! Name-based registry mapping call-site shapes to taint sources, sinks,
//! sanitizers, and propagators. Since the parser doesn't retain full
//! expression ASTs, classification works off `(receiver, callee_name)`
//! pairs the same way the framework packs match calls — by name, not by
//! type.
//!
//! The rules themselves live in a TOML pack (`packs/default.toml`),
//! parsed and compiled once behind a `OnceLock`, the same split as
//! `frameworks::loader`/`frameworks::registry`.

use std::sync::OnceLock;

use super::registry_loader::{self, CompiledPropagatorRule, CompiledTaintRegistry};
use super::types::{SanitizerType, SinkType, SourceType};

const DEFAULT_PACK: &str = include_str!("packs/default.toml");

fn registry() -> &'static CompiledTaintRegistry {
    static REGISTRY: OnceLock<CompiledTaintRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        registry_loader::load_from_str(DEFAULT_PACK).unwrap_or_else(|e| {
            eprintln!("[drift] warning: failed to load default taint registry: {e}");
            CompiledTaintRegistry::default()
        })
    })
}

/// Classify a call site as a taint source, if its shape matches a known one.
pub fn classify_source(receiver: Option<&str>, callee_name: &str) -> Option<SourceType> {
    registry().classify_source(receiver, callee_name)
}

/// Classify a call site as a taint sink, if its shape matches a known one.
pub fn classify_sink(receiver: Option<&str>, callee_name: &str) -> Option<SinkType> {
    registry().classify_sink(receiver, callee_name)
}

/// Classify a call site as applying a sanitizer, if its shape matches one.
pub fn classify_sanitizer(callee_name: &str) -> Option<SanitizerType> {
    registry().classify_sanitizer(callee_name)
}

/// Classify a call site as a known taint-preserving passthrough (e.g.
/// `.trim()`, `Array.from()`) — taint on the matched argument continues
/// to whatever the rule's `arg_flow` names, rather than stopping at the call.
pub fn classify_propagator(receiver: Option<&str>, callee_name: &str) -> Option<&'static CompiledPropagatorRule> {
    registry().classify_propagator(receiver, callee_name)
}
