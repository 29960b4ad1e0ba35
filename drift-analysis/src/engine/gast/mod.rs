//! Generalized AST: a cross-language tree shape detectors can walk
//! without re-matching tree-sitter node kinds per grammar.

pub mod base_normalizer;
pub mod normalizers;
pub mod types;

pub use base_normalizer::{BaseNormalizer, GASTNormalizer};
pub use types::GASTNode;

use crate::scanner::language_detect::Language;

/// Normalize `tree` into a `GASTNode` using the override registered for
/// `language`. Languages with no dedicated GAST override (C/C++, Swift,
/// Scala) fall back to the plain `BaseNormalizer`, same approximation
/// `ParserManager::parser_for` uses for tree-sitter parsing itself.
pub fn normalize(language: Language, tree: &tree_sitter::Tree, source: &[u8]) -> GASTNode {
    match language {
        Language::TypeScript => normalizers::TypeScriptNormalizer.normalize(tree, source),
        Language::JavaScript => normalizers::JavaScriptNormalizer.normalize(tree, source),
        Language::Python => normalizers::PythonNormalizer.normalize(tree, source),
        Language::Java | Language::Swift | Language::Scala => normalizers::JavaNormalizer.normalize(tree, source),
        Language::CSharp | Language::Cpp | Language::C => normalizers::CSharpNormalizer.normalize(tree, source),
        Language::Go => normalizers::GoNormalizer.normalize(tree, source),
        Language::Rust => normalizers::RustNormalizer.normalize(tree, source),
        Language::Ruby => normalizers::RubyNormalizer.normalize(tree, source),
        Language::Php => normalizers::PhpNormalizer.normalize(tree, source),
        Language::Kotlin => normalizers::KotlinNormalizer.normalize(tree, source),
        Language::Unknown => BaseNormalizer.normalize(tree, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_dispatches_without_panicking_for_every_language() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_python::LANGUAGE.into()).unwrap();
        let tree = parser.parse("def f():\n    pass\n", None).unwrap();
        let node = normalize(Language::Python, &tree, b"def f():\n    pass\n");
        assert!(matches!(node, GASTNode::Program { .. }));
    }
}
