use std::path::Path;

use drift_core::errors::ParseError;

use super::common::parse_with_language;
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ParseResult;
use crate::scanner::language_detect::Language;

#[derive(Debug, Default)]
pub struct JavaParser;

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for JavaParser {
    fn parse(&self, source: &[u8], path: &Path) -> Result<ParseResult, ParseError> {
        parse_with_language(source, path, Language::Java, tree_sitter_java::LANGUAGE.into())
    }
}
