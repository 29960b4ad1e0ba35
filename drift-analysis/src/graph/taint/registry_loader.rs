//! TOML parsing → compiled, ready-to-match taint registry.
//!
//! Mirrors `frameworks::loader`: parse the declarative pack once, resolve
//! its string identifiers (`taint_label`, `sink_type`, `sanitizer_type`,
//! `arg_flow`) against the fixed enums in `super::types`, and hand back a
//! struct `registry.rs` can match against without re-parsing TOML per call.

use drift_core::errors::DetectionError;

use super::registry_spec::{
    CallMatch, PropagatorEntry, SanitizerEntry, SinkEntry, SourceEntry, TaintRegistrySpec,
};
use super::types::{SanitizerType, SinkType, SourceType};

#[derive(Debug, Clone)]
pub struct CompiledCallMatch {
    pub receiver_contains: Vec<String>,
    pub receiver_required: bool,
    pub methods: Vec<String>,
}

impl CompiledCallMatch {
    fn matches(&self, recv: &str, callee: &str) -> bool {
        if self.receiver_required && recv.is_empty() {
            return false;
        }
        if !self.receiver_contains.is_empty()
            && !self.receiver_contains.iter().any(|s| recv.contains(s.as_str()))
        {
            return false;
        }
        self.methods.is_empty() || self.methods.iter().any(|m| m == callee)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledSourceRule {
    pub source_type: SourceType,
    pub group: Option<String>,
    pub call_match: CompiledCallMatch,
}

#[derive(Debug, Clone)]
pub struct CompiledSinkRule {
    pub sink_type: SinkType,
    pub cwe_override: Option<u32>,
    pub call_match: CompiledCallMatch,
}

#[derive(Debug, Clone)]
pub struct CompiledSanitizerRule {
    pub sanitizer_type: SanitizerType,
    pub clears_cwes: Vec<u32>,
    pub call_match: CompiledCallMatch,
}

/// Which argument (by index) a propagator's taint flows to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgFlowTarget {
    Return,
    Arg(usize),
}

#[derive(Debug, Clone)]
pub struct CompiledPropagatorRule {
    pub from_arg: usize,
    pub to: ArgFlowTarget,
    pub call_match: CompiledCallMatch,
}

#[derive(Debug, Clone, Default)]
pub struct CompiledTaintRegistry {
    pub sources: Vec<CompiledSourceRule>,
    pub sinks: Vec<CompiledSinkRule>,
    pub sanitizers: Vec<CompiledSanitizerRule>,
    pub propagators: Vec<CompiledPropagatorRule>,
}

impl CompiledTaintRegistry {
    pub fn classify_source(&self, receiver: Option<&str>, callee_name: &str) -> Option<SourceType> {
        let recv = receiver.unwrap_or("").to_lowercase();
        let callee = callee_name.to_lowercase();

        let matched_group = self
            .sources
            .iter()
            .find(|r| r.group.is_some() && r.call_match.receiver_contains.iter().any(|s| recv.contains(s.as_str())))
            .and_then(|r| r.group.clone());

        if let Some(group) = matched_group {
            return self
                .sources
                .iter()
                .filter(|r| r.group.as_deref() == Some(group.as_str()))
                .find(|r| r.call_match.matches(&recv, &callee))
                .map(|r| r.source_type);
        }

        self.sources
            .iter()
            .filter(|r| r.group.is_none())
            .find(|r| r.call_match.matches(&recv, &callee))
            .map(|r| r.source_type)
    }

    pub fn classify_sink(&self, receiver: Option<&str>, callee_name: &str) -> Option<SinkType> {
        let recv = receiver.unwrap_or("").to_lowercase();
        let callee = callee_name.to_lowercase();
        self.sinks.iter().find(|r| r.call_match.matches(&recv, &callee)).map(|r| r.sink_type)
    }

    pub fn classify_sanitizer(&self, callee_name: &str) -> Option<SanitizerType> {
        let callee = callee_name.to_lowercase();
        self.sanitizers.iter().find(|r| r.call_match.matches("", &callee)).map(|r| r.sanitizer_type)
    }

    pub fn classify_propagator(&self, receiver: Option<&str>, callee_name: &str) -> Option<&CompiledPropagatorRule> {
        let recv = receiver.unwrap_or("").to_lowercase();
        let callee = callee_name.to_lowercase();
        self.propagators.iter().find(|r| r.call_match.matches(&recv, &callee))
    }
}

pub fn load_from_str(toml_str: &str) -> Result<CompiledTaintRegistry, DetectionError> {
    let spec: TaintRegistrySpec = toml::from_str(toml_str)?;
    compile(spec)
}

fn compile(spec: TaintRegistrySpec) -> Result<CompiledTaintRegistry, DetectionError> {
    let sources = spec
        .sources
        .into_iter()
        .map(compile_source)
        .collect::<Result<Vec<_>, _>>()?;
    let sinks = spec.sinks.into_iter().map(compile_sink).collect::<Result<Vec<_>, _>>()?;
    let sanitizers = spec
        .sanitizers
        .into_iter()
        .map(compile_sanitizer)
        .collect::<Result<Vec<_>, _>>()?;
    let propagators = spec
        .propagators
        .into_iter()
        .map(compile_propagator)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledTaintRegistry { sources, sinks, sanitizers, propagators })
}

fn compile_call_match(m: CallMatch) -> CompiledCallMatch {
    CompiledCallMatch {
        receiver_contains: m.receiver_contains.into_iter().map(|s| s.to_lowercase()).collect(),
        receiver_required: m.receiver_required,
        methods: m.methods.into_iter().map(|s| s.to_lowercase()).collect(),
    }
}

fn compile_source(e: SourceEntry) -> Result<CompiledSourceRule, DetectionError> {
    let source_type = parse_source_type(&e.taint_label).ok_or_else(|| DetectionError::MalformedPack {
        message: format!("taint source '{}': unknown taint_label '{}'", e.id, e.taint_label),
    })?;
    Ok(CompiledSourceRule { source_type, group: e.group, call_match: compile_call_match(e.match_block) })
}

fn compile_sink(e: SinkEntry) -> Result<CompiledSinkRule, DetectionError> {
    let sink_type = parse_sink_type(&e.sink_type).ok_or_else(|| DetectionError::MalformedPack {
        message: format!("taint sink '{}': unknown sink_type '{}'", e.id, e.sink_type),
    })?;
    Ok(CompiledSinkRule { sink_type, cwe_override: e.cwe, call_match: compile_call_match(e.match_block) })
}

fn compile_sanitizer(e: SanitizerEntry) -> Result<CompiledSanitizerRule, DetectionError> {
    let sanitizer_type = parse_sanitizer_type(&e.sanitizer_type).ok_or_else(|| DetectionError::MalformedPack {
        message: format!("sanitizer '{}': unknown sanitizer_type '{}'", e.id, e.sanitizer_type),
    })?;
    Ok(CompiledSanitizerRule {
        sanitizer_type,
        clears_cwes: e.clears_cwes,
        call_match: compile_call_match(e.match_block),
    })
}

fn compile_propagator(e: PropagatorEntry) -> Result<CompiledPropagatorRule, DetectionError> {
    let (from_arg, to) = parse_arg_flow(&e.arg_flow).ok_or_else(|| DetectionError::MalformedPack {
        message: format!("propagator '{}': malformed arg_flow '{}'", e.id, e.arg_flow),
    })?;
    Ok(CompiledPropagatorRule { from_arg, to, call_match: compile_call_match(e.match_block) })
}

fn parse_arg_flow(spec: &str) -> Option<(usize, ArgFlowTarget)> {
    let (from, to) = spec.split_once("->")?;
    let from_arg: usize = from.trim().parse().ok()?;
    let to = to.trim();
    let target = if to.eq_ignore_ascii_case("return") {
        ArgFlowTarget::Return
    } else {
        ArgFlowTarget::Arg(to.parse().ok()?)
    };
    Some((from_arg, target))
}

fn parse_source_type(name: &str) -> Option<SourceType> {
    use SourceType::*;
    [
        UserInput,
        HttpRequest,
        QueryParam,
        FormData,
        FileRead,
        EnvironmentVariable,
        DatabaseRead,
        NetworkResponse,
    ]
    .into_iter()
    .find(|v| v.name() == name)
}

fn parse_sink_type(name: &str) -> Option<SinkType> {
    use SinkType::*;
    [
        SqlQuery,
        ShellCommand,
        HtmlOutput,
        FileWrite,
        FilePath,
        LogOutput,
        HttpRedirect,
        Deserialization,
        TemplateEngine,
        XmlParser,
        Eval,
    ]
    .into_iter()
    .find(|v| v.name() == name)
}

fn parse_sanitizer_type(name: &str) -> Option<SanitizerType> {
    use SanitizerType::*;
    [HtmlEscape, SqlParameterize, ShellEscape, PathNormalize, Allowlist, SchemaValidate, UrlEncode]
        .into_iter()
        .find(|v| v.name() == name)
}
