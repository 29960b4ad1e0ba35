//! Kotlin GAST normalizer.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct KotlinNormalizer;

impl GASTNormalizer for KotlinNormalizer {
    fn language(&self) -> Language {
        Language::Kotlin
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "source_file" => GASTNode::Program { body: self.normalize_children(node, source) },

            "function_declaration" => self.normalize_function(node, source),

            "class_declaration" | "object_declaration" => {
                let name = node.child_by_field_name("name")
                    .or_else(|| find_child(node, "simple_identifier"))
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let body = find_child(node, "class_body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::Class { name, bases: vec![], body, is_abstract: false }
            }

            "when_expression" => {
                let discriminant = node.child(1)
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let cases = (0..node.child_count())
                    .filter_map(|i| node.child(i))
                    .filter(|c| c.kind() == "when_entry")
                    .map(|c| self.normalize_node(&c, source))
                    .collect();
                GASTNode::Switch { discriminant: Box::new(discriminant), cases }
            }

            "navigation_expression" => {
                let object = node.child(0)
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let property = node.child(node.child_count().saturating_sub(1))
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::MemberAccess { object: Box::new(object), property }
            }

            "call_expression" => {
                let callee = node.child(0)
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = find_child(node, "value_arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                if let GASTNode::MemberAccess { object, property } = callee {
                    return GASTNode::MethodCall { receiver: object, method: property, arguments };
                }
                GASTNode::Call { callee: Box::new(callee), arguments }
            }

            "import_header" => {
                let source_str = node.utf8_text(source).unwrap_or("").trim_start_matches("import").trim().to_string();
                GASTNode::Import { source: source_str, specifiers: vec![] }
            }

            "jump_expression" => {
                let text = node.utf8_text(source).unwrap_or("");
                if text.starts_with("return") {
                    let value = node.child(1).map(|n| Box::new(self.normalize_node(&n, source)));
                    GASTNode::Return { value }
                } else if text.starts_with("throw") {
                    let value = node.child(1)
                        .map(|n| self.normalize_node(&n, source))
                        .unwrap_or(GASTNode::NullLiteral);
                    GASTNode::Throw { value: Box::new(value) }
                } else {
                    GASTNode::Other { kind: "jump_expression".to_string(), children: vec![] }
                }
            }

            "line_comment" | "multiline_comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("/**");
                GASTNode::Comment { text, is_doc }
            }

            "simple_identifier" => GASTNode::Identifier { name: node.utf8_text(source).unwrap_or("").to_string() },
            "boolean_literal" => GASTNode::BoolLiteral { value: node.utf8_text(source) == Ok("true") },
            "null_literal" => GASTNode::NullLiteral,

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}

fn find_child<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).find(|c| c.kind() == kind)
}
