//! Rust GAST normalizer. No exceptions either — `?`/`Result` propagation
//! shows up as ordinary match/call expressions, not a dedicated node kind.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct RustNormalizer;

impl GASTNormalizer for RustNormalizer {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "source_file" => GASTNode::Program { body: self.normalize_children(node, source) },

            "function_item" | "closure_expression" => self.normalize_function(node, source),

            "struct_item" | "trait_item" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                if node.kind() == "trait_item" {
                    GASTNode::Interface { name, extends: vec![], body }
                } else {
                    GASTNode::Class { name, bases: vec![], body, is_abstract: false }
                }
            }

            "impl_item" => {
                let name = node.child_by_field_name("type")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let bases = node.child_by_field_name("trait")
                    .and_then(|n| n.utf8_text(source).ok())
                    .map(|s| vec![s.to_string()])
                    .unwrap_or_default();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Class { name, bases, body, is_abstract: false }
            }

            "enum_item" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let members = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Enum { name, members }
            }

            "match_expression" => {
                let discriminant = node.child_by_field_name("value")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let cases = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Switch { discriminant: Box::new(discriminant), cases }
            }

            "loop_expression" => {
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Block { statements: vec![] });
                GASTNode::WhileLoop { condition: Box::new(GASTNode::BoolLiteral { value: true }), body: Box::new(body) }
            }

            "for_expression" => {
                let variable = node.child_by_field_name("pattern")
                    .map(|n| GASTNode::Identifier { name: n.utf8_text(source).unwrap_or("_").to_string() })
                    .unwrap_or(GASTNode::Identifier { name: "_".to_string() });
                let iterable = node.child_by_field_name("value")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Block { statements: vec![] });
                GASTNode::ForEach { variable: Box::new(variable), iterable: Box::new(iterable), body: Box::new(body) }
            }

            "call_expression" => {
                let callee = node.child_by_field_name("function")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                if let GASTNode::MemberAccess { object, property } = callee {
                    return GASTNode::MethodCall { receiver: object, method: property, arguments };
                }
                GASTNode::Call { callee: Box::new(callee), arguments }
            }

            "field_expression" => {
                let object = node.child_by_field_name("value")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let property = node.child_by_field_name("field")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::MemberAccess { object: Box::new(object), property }
            }

            "use_declaration" => {
                let source_str = node.child(1).and_then(|n| n.utf8_text(source).ok()).unwrap_or("").to_string();
                GASTNode::Import { source: source_str, specifiers: vec![] }
            }

            "let_declaration" => {
                let name = node.child_by_field_name("pattern")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let value = node.child_by_field_name("value").map(|n| Box::new(self.normalize_node(&n, source)));
                GASTNode::VariableDeclaration { name, type_annotation: None, value, is_const: false }
            }

            "attribute_item" => self.normalize_decorator(node, source),

            "line_comment" | "block_comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("///") || text.starts_with("//!");
                GASTNode::Comment { text, is_doc }
            }

            "boolean_literal" => GASTNode::BoolLiteral { value: node.utf8_text(source) == Ok("true") },

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}
