//! TOML schema for the taint registry: `[[sources]]`, `[[sinks]]`,
//! `[[sanitizers]]`, and `[[propagators]]`, each declaring a framework, a
//! call-shape `match` predicate, and the semantic fields that entry kind
//! carries (taint_label, cwe, clears_cwes, arg_flow).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaintRegistrySpec {
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    #[serde(default)]
    pub sinks: Vec<SinkEntry>,
    #[serde(default)]
    pub sanitizers: Vec<SanitizerEntry>,
    #[serde(default)]
    pub propagators: Vec<PropagatorEntry>,
}

/// Call-shape predicate: a receiver substring (OR'd) and a method name
/// (OR'd). Empty `receiver_contains` matches any receiver.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CallMatch {
    #[serde(default)]
    pub receiver_contains: Vec<String>,
    /// Require some non-empty receiver even when `receiver_contains` is empty.
    #[serde(default)]
    pub receiver_required: bool,
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    pub id: String,
    pub framework: String,
    pub taint_label: String,
    #[serde(rename = "match")]
    pub match_block: CallMatch,
    /// Entries sharing a `group` are mutually exclusive with ungrouped
    /// entries: once a receiver matches a group, only that group's rules
    /// are considered (mirrors the "request-like" bucket — `req.getenv()`
    /// isn't an environment read, it's an unrecognized request accessor).
    pub group: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SinkEntry {
    pub id: String,
    pub framework: String,
    pub sink_type: String,
    pub cwe: Option<u32>,
    #[serde(rename = "match")]
    pub match_block: CallMatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SanitizerEntry {
    pub id: String,
    pub framework: String,
    pub sanitizer_type: String,
    #[serde(default)]
    pub clears_cwes: Vec<u32>,
    #[serde(rename = "match")]
    pub match_block: CallMatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropagatorEntry {
    pub id: String,
    pub framework: String,
    /// `"N->return"` or `"N->M"` — which argument index flows to the
    /// return value, or to another argument index.
    pub arg_flow: String,
    #[serde(rename = "match")]
    pub match_block: CallMatch,
}
