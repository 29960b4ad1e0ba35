//! 9 language normalizers — extract call chains from language-specific AST patterns.

use crate::parsers::types::{CallSite, ParseResult};
use crate::scanner::language_detect::Language;

use super::types::{ChainCall, UnifiedCallChain};

/// Trait for language-specific call chain normalization.
pub trait LanguageNormalizer: Send + Sync {
    /// Which language this normalizer handles.
    fn language(&self) -> Language;

    /// Extract unified call chains from a parse result.
    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain>;
}

/// Normalize a call site into a UnifiedCallChain.
pub fn normalize_chain(call_site: &CallSite, pr: &ParseResult) -> UnifiedCallChain {
    let receiver = call_site.receiver.clone().unwrap_or_default();
    let call = ChainCall {
        method: call_site.callee_name.clone(),
        args: Vec::new(), // Args require deeper AST analysis
    };

    UnifiedCallChain {
        receiver,
        calls: vec![call],
        file: pr.file.clone(),
        line: call_site.line,
        language: pr.language,
    }
}

/// TypeScript/JavaScript normalizer.
pub struct TypeScriptNormalizer;

impl LanguageNormalizer for TypeScriptNormalizer {
    fn language(&self) -> Language { Language::TypeScript }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Python normalizer.
pub struct PythonNormalizer;

impl LanguageNormalizer for PythonNormalizer {
    fn language(&self) -> Language { Language::Python }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Java normalizer.
pub struct JavaNormalizer;

impl LanguageNormalizer for JavaNormalizer {
    fn language(&self) -> Language { Language::Java }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// C# normalizer.
pub struct CSharpNormalizer;

impl LanguageNormalizer for CSharpNormalizer {
    fn language(&self) -> Language { Language::CSharp }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// PHP normalizer.
pub struct PhpNormalizer;

impl LanguageNormalizer for PhpNormalizer {
    fn language(&self) -> Language { Language::Php }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Go normalizer.
pub struct GoNormalizer;

impl LanguageNormalizer for GoNormalizer {
    fn language(&self) -> Language { Language::Go }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Rust normalizer.
pub struct RustNormalizer;

impl LanguageNormalizer for RustNormalizer {
    fn language(&self) -> Language { Language::Rust }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Ruby normalizer.
pub struct RubyNormalizer;

impl LanguageNormalizer for RubyNormalizer {
    fn language(&self) -> Language { Language::Ruby }

    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// C++ normalizer.
pub struct CppNormalizer;

impl LanguageNormalizer for CppNormalizer {
    fn language(&self) -> Language { Language::Cpp }
    fn extract_chains(&self, pr: &ParseResult) -> Vec<UnifiedCallChain> {
        pr.call_sites.iter()
            .filter(|cs| cs.receiver.is_some())
            .map(|cs| normalize_chain(cs, pr))
            .collect()
    }
}

/// Create all normalizers.
pub fn create_all_normalizers() -> Vec<Box<dyn LanguageNormalizer>> {
    vec![
        Box::new(TypeScriptNormalizer),
        Box::new(PythonNormalizer),
        Box::new(JavaNormalizer),
        Box::new(CSharpNormalizer),
        Box::new(PhpNormalizer),
        Box::new(GoNormalizer),
        Box::new(RustNormalizer),
        Box::new(RubyNormalizer),
        Box::new(CppNormalizer),
    ]
}

/// Get the normalizer for a given language.
pub fn normalizer_for(language: Language) -> Box<dyn LanguageNormalizer> {
    match language {
        Language::TypeScript | Language::JavaScript => Box::new(TypeScriptNormalizer),
        Language::Python => Box::new(PythonNormalizer),
        Language::Java => Box::new(JavaNormalizer),
        Language::CSharp => Box::new(CSharpNormalizer),
        Language::Php => Box::new(PhpNormalizer),
        Language::Go => Box::new(GoNormalizer),
        Language::Rust => Box::new(RustNormalizer),
        Language::Ruby => Box::new(RubyNormalizer),
        Language::Kotlin => Box::new(CppNormalizer),
        Language::Cpp | Language::C => Box::new(CppNormalizer),
        Language::Swift | Language::Scala => Box::new(JavaNormalizer),
        Language::Unknown => Box::new(TypeScriptNormalizer),
    }
}
