//! Language detection by file extension.

use serde::{Deserialize, Serialize};

/// A supported source language. `Unknown` files are still discovered
/// (for stats) but never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Java,
    CSharp,
    Go,
    Rust,
    Ruby,
    Php,
    Kotlin,
    /// No dedicated grammar; parsed with the C# grammar as the closest
    /// approximation (see `ParserManager::parser_for`).
    Cpp,
    C,
    /// No dedicated grammar; parsed with the Java grammar as the closest
    /// approximation.
    Swift,
    Scala,
    Unknown,
}

impl Language {
    /// Map a file extension (no leading dot) to a language.
    pub fn from_extension(ext: Option<&str>) -> Option<Self> {
        let ext = ext?.to_ascii_lowercase();
        Some(match ext.as_str() {
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "py" | "pyi" => Language::Python,
            "java" => Language::Java,
            "cs" => Language::CSharp,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "kt" | "kts" => Language::Kotlin,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "c" | "h" => Language::C,
            "swift" => Language::Swift,
            "scala" | "sc" => Language::Scala,
            _ => return None,
        })
    }

    /// Display name used in diagnostics and framework-pack matching.
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Kotlin => "kotlin",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Swift => "swift",
            Language::Scala => "scala",
            Language::Unknown => "unknown",
        }
    }

    /// The tree-sitter grammar actually used to parse a file of this
    /// language. Languages with no dedicated grammar (`Cpp`/`C`,
    /// `Swift`/`Scala`) fall back to the closest approximation, matching
    /// `ParserManager::parser_for`'s dispatch.
    pub fn ts_language_for_ext(&self, ext: Option<&str>) -> tree_sitter::Language {
        match self {
            Language::TypeScript => {
                if ext == Some("tsx") {
                    tree_sitter_typescript::LANGUAGE_TSX.into()
                } else {
                    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
                }
            }
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            Language::Kotlin => tree_sitter_kotlin_sg::LANGUAGE.into(),
            Language::Cpp | Language::C => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Swift | Language::Scala => tree_sitter_java::LANGUAGE.into(),
            Language::Unknown => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}
