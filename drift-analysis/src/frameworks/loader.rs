//! TOML parsing → compiled, ready-to-match framework packs.
//!
//! Regexes, Aho-Corasick automatons, glob patterns, and `RegexSet` fast
//! paths are all built once here so `matcher`/`learner` never re-compile a
//! pattern per file.

use std::fs;
use std::path::Path;

use aho_corasick::AhoCorasick;
use drift_core::errors::DetectionError;
use regex::{Regex, RegexSet};
use smallvec::SmallVec;

use crate::engine::types::PatternCategory;
use crate::scanner::language_detect::Language;

use super::types::{DetectSignal, FrameworkSpec, MatchBlock, PatternDef};

/// A framework pack with every pattern pre-compiled.
#[derive(Debug, Clone)]
pub struct CompiledFrameworkPack {
    pub name: String,
    pub display_name: Option<String>,
    pub version: Option<String>,
    pub languages: Vec<Language>,
    pub detect_signals: Vec<CompiledDetectSignal>,
    pub patterns: Vec<CompiledPattern>,
}

/// A pre-resolved detection signal for framework auto-detection.
#[derive(Debug, Clone)]
pub enum CompiledDetectSignal {
    Import(String),
    FilePattern(glob::Pattern),
    Decorator(String),
    Dependency(String),
}

/// A single compiled pattern, ready to be matched against a `DetectionContext`.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub id: String,
    pub category: PatternCategory,
    pub sub_type: Option<String>,
    pub confidence: f32,
    pub cwe_ids: SmallVec<[u32; 2]>,
    pub owasp: Option<String>,
    pub match_block: CompiledMatchBlock,
    pub has_learn: bool,
    pub learn_group_by: Option<String>,
    pub learn_signal: Option<String>,
    pub learn_deviation_threshold: f64,
}

/// A single "receiver.method" or bare "method" call predicate.
#[derive(Debug, Clone)]
pub struct CompiledCall {
    pub receiver: Option<String>,
    pub method: String,
}

/// Pre-compiled match predicates. Every non-empty field is ANDed together;
/// within a field, any element matching is sufficient (OR).
#[derive(Debug, Clone, Default)]
pub struct CompiledMatchBlock {
    pub imports: Vec<String>,
    pub import_ac: Option<AhoCorasick>,
    pub decorators: Vec<String>,
    pub decorator_ac: Option<AhoCorasick>,
    pub calls: Vec<CompiledCall>,
    pub extends: Vec<String>,
    pub extends_ac: Option<AhoCorasick>,
    pub implements: Vec<String>,
    pub implements_ac: Option<AhoCorasick>,
    pub function_names: Vec<Regex>,
    pub function_name_regex_set: Option<RegexSet>,
    pub class_names: Vec<Regex>,
    pub class_name_regex_set: Option<RegexSet>,
    pub string_literals: Vec<Regex>,
    pub string_literal_regex_set: Option<RegexSet>,
    pub param_types: Vec<String>,
    pub return_types: Vec<String>,
    pub content_patterns: Vec<Regex>,
    pub content_regex_set: Option<RegexSet>,
    pub exports: Vec<String>,
    pub error_handling: Vec<String>,
    pub doc_comments: Vec<Regex>,
    pub doc_comment_regex_set: Option<RegexSet>,
    pub file_patterns: Vec<glob::Pattern>,
    pub type_annotations: Vec<Regex>,
    pub type_annotation_regex_set: Option<RegexSet>,
    pub language: Option<Language>,
    pub not: Option<Box<CompiledMatchBlock>>,
}

/// Parse and compile a framework pack from a TOML string.
pub fn load_from_str(toml_str: &str) -> Result<CompiledFrameworkPack, DetectionError> {
    let spec: FrameworkSpec = toml::from_str(toml_str)?;
    compile(spec)
}

/// Parse and compile a framework pack from a TOML file on disk.
pub fn load_from_file(path: &Path) -> Result<CompiledFrameworkPack, DetectionError> {
    let toml_str = fs::read_to_string(path).map_err(|e| DetectionError::MalformedPack {
        message: format!("failed to read '{}': {e}", path.display()),
    })?;
    load_from_str(&toml_str)
}

fn compile(spec: FrameworkSpec) -> Result<CompiledFrameworkPack, DetectionError> {
    let pack_name = spec.framework.name.clone();

    let languages = spec
        .framework
        .languages
        .iter()
        .map(|s| parse_language(s, &pack_name))
        .collect::<Result<Vec<_>, _>>()?;

    let detect_signals = spec
        .framework
        .detect_by
        .iter()
        .map(|s| compile_detect_signal(s, &pack_name))
        .collect::<Result<Vec<_>, _>>()?;

    let patterns = spec
        .patterns
        .into_iter()
        .map(|p| compile_pattern(p, &pack_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledFrameworkPack {
        name: pack_name,
        display_name: spec.framework.display_name,
        version: spec.framework.version,
        languages,
        detect_signals,
        patterns,
    })
}

fn parse_language(name: &str, pack: &str) -> Result<Language, DetectionError> {
    match name.to_ascii_lowercase().as_str() {
        "typescript" => Ok(Language::TypeScript),
        "javascript" => Ok(Language::JavaScript),
        "python" => Ok(Language::Python),
        "java" => Ok(Language::Java),
        "csharp" => Ok(Language::CSharp),
        "go" => Ok(Language::Go),
        "rust" => Ok(Language::Rust),
        "ruby" => Ok(Language::Ruby),
        "php" => Ok(Language::Php),
        "kotlin" => Ok(Language::Kotlin),
        "cpp" => Ok(Language::Cpp),
        "c" => Ok(Language::C),
        "swift" => Ok(Language::Swift),
        "scala" => Ok(Language::Scala),
        "unknown" => Ok(Language::Unknown),
        other => Err(DetectionError::MalformedPack {
            message: format!("pack '{pack}': unknown language '{other}'"),
        }),
    }
}

fn compile_detect_signal(
    signal: &DetectSignal,
    pack: &str,
) -> Result<CompiledDetectSignal, DetectionError> {
    Ok(match signal {
        DetectSignal::Import { import } => CompiledDetectSignal::Import(import.clone()),
        DetectSignal::FilePattern { file_pattern } => {
            CompiledDetectSignal::FilePattern(compile_glob(file_pattern, pack)?)
        }
        DetectSignal::Decorator { decorator } => CompiledDetectSignal::Decorator(decorator.clone()),
        DetectSignal::Dependency { dependency } => CompiledDetectSignal::Dependency(dependency.clone()),
    })
}

fn compile_pattern(def: PatternDef, pack: &str) -> Result<CompiledPattern, DetectionError> {
    let category = PatternCategory::parse_str(&def.category).ok_or_else(|| DetectionError::MalformedPack {
        message: format!("pack '{pack}': pattern '{}' has unknown category '{}'", def.id, def.category),
    })?;

    let match_block = compile_match_block(def.match_predicates, pack)?;

    let (has_learn, learn_group_by, learn_signal, learn_deviation_threshold) = match def.learn {
        Some(l) => (true, Some(l.group_by), Some(l.signal), l.deviation_threshold),
        None => (false, None, None, 0.15),
    };

    Ok(CompiledPattern {
        id: def.id,
        category,
        sub_type: def.sub_type,
        confidence: def.confidence,
        cwe_ids: def.cwe_ids.into_iter().collect(),
        owasp: def.owasp,
        match_block,
        has_learn,
        learn_group_by,
        learn_signal,
        learn_deviation_threshold,
    })
}

fn compile_match_block(block: MatchBlock, pack: &str) -> Result<CompiledMatchBlock, DetectionError> {
    let import_ac = build_ac(&block.imports);
    let decorator_ac = build_ac(&block.decorators);
    let extends_ac = build_ac(&block.extends);
    let implements_ac = build_ac(&block.implements);

    let calls = block.calls.iter().map(|c| compile_call(c)).collect();

    let function_names = compile_regex_vec(&block.function_names, pack)?;
    let function_name_regex_set = build_regex_set(&block.function_names, pack)?;

    let class_names = compile_regex_vec(&block.class_names, pack)?;
    let class_name_regex_set = build_regex_set(&block.class_names, pack)?;

    let string_literals = compile_regex_vec(&block.string_literals, pack)?;
    let string_literal_regex_set = build_regex_set(&block.string_literals, pack)?;

    let content_patterns = compile_regex_vec(&block.content_patterns, pack)?;
    let content_regex_set = build_regex_set(&block.content_patterns, pack)?;

    let doc_comments = compile_regex_vec(&block.doc_comments, pack)?;
    let doc_comment_regex_set = build_regex_set(&block.doc_comments, pack)?;

    let type_annotations = compile_regex_vec(&block.type_annotations, pack)?;
    let type_annotation_regex_set = build_regex_set(&block.type_annotations, pack)?;

    let file_patterns = block
        .file_patterns
        .iter()
        .map(|p| compile_glob(p, pack))
        .collect::<Result<Vec<_>, _>>()?;

    let language = match &block.language {
        Some(s) => Some(parse_language(s, pack)?),
        None => None,
    };

    let not = match block.not {
        Some(inner) => Some(Box::new(compile_match_block(*inner, pack)?)),
        None => None,
    };

    Ok(CompiledMatchBlock {
        imports: block.imports,
        import_ac,
        decorators: block.decorators,
        decorator_ac,
        calls,
        extends: block.extends,
        extends_ac,
        implements: block.implements,
        implements_ac,
        function_names,
        function_name_regex_set,
        class_names,
        class_name_regex_set,
        string_literals,
        string_literal_regex_set,
        param_types: block.param_types,
        return_types: block.return_types,
        content_patterns,
        content_regex_set,
        exports: block.exports,
        error_handling: block.error_handling,
        doc_comments,
        doc_comment_regex_set,
        file_patterns,
        type_annotations,
        type_annotation_regex_set,
        language,
        not,
    })
}

/// Split a "receiver.method" or bare "method" call spec into its parts.
fn compile_call(spec: &str) -> CompiledCall {
    match spec.rsplit_once('.') {
        Some((receiver, method)) => CompiledCall {
            receiver: Some(receiver.to_string()),
            method: method.to_string(),
        },
        None => CompiledCall { receiver: None, method: spec.to_string() },
    }
}

fn build_ac(patterns: &[String]) -> Option<AhoCorasick> {
    if patterns.is_empty() {
        return None;
    }
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .ok()
}

fn compile_regex_vec(patterns: &[String], pack: &str) -> Result<Vec<Regex>, DetectionError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| DetectionError::InvalidRegex {
                pack: pack.to_string(),
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn build_regex_set(patterns: &[String], pack: &str) -> Result<Option<RegexSet>, DetectionError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    RegexSet::new(patterns)
        .map(Some)
        .map_err(|e| DetectionError::InvalidRegex {
            pack: pack.to_string(),
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
}

fn compile_glob(pattern: &str, pack: &str) -> Result<glob::Pattern, DetectionError> {
    glob::Pattern::new(pattern).map_err(|e| DetectionError::InvalidGlob {
        pack: pack.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [framework]
        name = "demo"
        languages = ["typescript"]

        [[patterns]]
        id = "demo/di/injectable"
        category = "structural"
        match = { decorators = ["Injectable"] }
    "#;

    #[test]
    fn loads_minimal_pack() {
        let pack = load_from_str(MINIMAL).expect("should parse");
        assert_eq!(pack.name, "demo");
        assert_eq!(pack.languages, vec![Language::TypeScript]);
        assert_eq!(pack.patterns.len(), 1);
        assert_eq!(pack.patterns[0].category, PatternCategory::Structural);
    }

    #[test]
    fn rejects_unknown_category() {
        let toml_str = r#"
            [framework]
            name = "bad"
            languages = ["typescript"]

            [[patterns]]
            id = "bad/x"
            category = "not-a-real-category"
            match = { imports = ["x"] }
        "#;
        assert!(load_from_str(toml_str).is_err());
    }

    #[test]
    fn rejects_invalid_regex() {
        let toml_str = r#"
            [framework]
            name = "bad"
            languages = ["typescript"]

            [[patterns]]
            id = "bad/x"
            category = "structural"
            match = { function_names = ["([unterminated"] }
        "#;
        assert!(load_from_str(toml_str).is_err());
    }

    #[test]
    fn compiles_receiver_method_call_spec() {
        let call = compile_call("repository.save");
        assert_eq!(call.receiver.as_deref(), Some("repository"));
        assert_eq!(call.method, "save");

        let bare = compile_call("save");
        assert_eq!(bare.receiver, None);
        assert_eq!(bare.method, "save");
    }
}
