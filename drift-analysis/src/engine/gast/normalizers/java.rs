//! Java GAST normalizer.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct JavaNormalizer;

impl GASTNormalizer for JavaNormalizer {
    fn language(&self) -> Language {
        Language::Java
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "program" => GASTNode::Program { body: self.normalize_children(node, source) },

            "method_declaration" | "constructor_declaration" => self.normalize_function(node, source),

            "class_declaration" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let bases = node.child_by_field_name("superclass")
                    .and_then(|n| n.utf8_text(source).ok())
                    .map(|s| vec![s.trim_start_matches("extends").trim().to_string()])
                    .unwrap_or_default();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Class { name, bases, body, is_abstract: has_modifier(node, source, "abstract") }
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

            "enhanced_for_statement" => {
                let variable = node.child_by_field_name("name")
                    .map(|n| GASTNode::Identifier { name: n.utf8_text(source).unwrap_or("").to_string() })
                    .unwrap_or(GASTNode::Identifier { name: "_".to_string() });
                let iterable = node.child_by_field_name("value")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Block { statements: vec![] });
                GASTNode::ForEach { variable: Box::new(variable), iterable: Box::new(iterable), body: Box::new(body) }
            }

            "method_invocation" => {
                let receiver = node.child_by_field_name("object").map(|n| self.normalize_node(&n, source));
                let method_name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                match receiver {
                    Some(r) => GASTNode::MethodCall { receiver: Box::new(r), method: method_name, arguments },
                    None => GASTNode::Call {
                        callee: Box::new(GASTNode::Identifier { name: method_name }),
                        arguments,
                    },
                }
            }

            "object_creation_expression" => {
                let callee = node.child_by_field_name("type")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::NewExpression { callee: Box::new(callee), arguments }
            }

            "import_declaration" => {
                let source_str = find_scoped_name(node, source).unwrap_or_default();
                GASTNode::Import { source: source_str, specifiers: vec![] }
            }

            "marker_annotation" | "annotation" => self.normalize_decorator(node, source),

            "line_comment" | "block_comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("/**");
                GASTNode::Comment { text, is_doc }
            }

            "true" | "false" => GASTNode::BoolLiteral { value: node.kind() == "true" },
            "null_literal" => GASTNode::NullLiteral,

            "expression_statement" => node.child(0)
                .map(|c| self.normalize_node(&c, source))
                .unwrap_or(GASTNode::Other { kind: "expression_statement".to_string(), children: vec![] }),

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}

fn has_modifier(node: &Node, source: &[u8], modifier: &str) -> bool {
    node.child_by_field_name("modifiers")
        .map(|m| m.utf8_text(source).unwrap_or("").contains(modifier))
        .unwrap_or(false)
}

fn find_scoped_name(node: &Node, source: &[u8]) -> Option<String> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .and_then(|n| n.utf8_text(source).ok())
        .map(str::to_string)
}
