//! PHP GAST normalizer.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct PhpNormalizer;

impl GASTNormalizer for PhpNormalizer {
    fn language(&self) -> Language {
        Language::Php
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "program" => GASTNode::Program { body: self.normalize_children(node, source) },

            "function_definition" | "method_declaration" => self.normalize_function(node, source),

            "class_declaration" | "trait_declaration" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let bases = node.child_by_field_name("base_clause")
                    .and_then(|n| n.utf8_text(source).ok())
                    .map(|s| vec![s.trim_start_matches("extends").trim().to_string()])
                    .unwrap_or_default();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Class { name, bases, body, is_abstract: node.utf8_text(source).unwrap_or("").starts_with("abstract") }
            }

            "interface_declaration" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Interface { name, extends: vec![], body }
            }

            "foreach_statement" => {
                let variable = node.child_by_field_name("value")
                    .map(|n| GASTNode::Identifier { name: n.utf8_text(source).unwrap_or("$_").to_string() })
                    .unwrap_or(GASTNode::Identifier { name: "$_".to_string() });
                let iterable = node.child_by_field_name("array")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Block { statements: vec![] });
                GASTNode::ForEach { variable: Box::new(variable), iterable: Box::new(iterable), body: Box::new(body) }
            }

            "member_call_expression" | "scoped_call_expression" => {
                let receiver = node.child_by_field_name("object")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let method = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::MethodCall { receiver: Box::new(receiver), method, arguments }
            }

            "function_call_expression" => {
                let callee = node.child_by_field_name("function")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Call { callee: Box::new(callee), arguments }
            }

            "object_creation_expression" => {
                let callee = node.child_by_field_name("class")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::NewExpression { callee: Box::new(callee), arguments }
            }

            "namespace_use_declaration" => {
                let source_str = node.utf8_text(source).unwrap_or("").trim_start_matches("use").trim().trim_end_matches(';').to_string();
                GASTNode::Import { source: source_str, specifiers: vec![] }
            }

            "comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("/**");
                GASTNode::Comment { text, is_doc }
            }

            "variable_name" => GASTNode::Identifier { name: node.utf8_text(source).unwrap_or("").to_string() },

            "boolean" => GASTNode::BoolLiteral { value: node.utf8_text(source).unwrap_or("").eq_ignore_ascii_case("true") },
            "null" => GASTNode::NullLiteral,

            "expression_statement" => node.child(0)
                .map(|c| self.normalize_node(&c, source))
                .unwrap_or(GASTNode::Other { kind: "expression_statement".to_string(), children: vec![] }),

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}
