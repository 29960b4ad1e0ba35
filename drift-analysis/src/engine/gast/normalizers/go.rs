//! Go GAST normalizer. Go has no exceptions — `normalize_try` is never
//! reached since the grammar has no `try` node; error handling shows up
//! as ordinary `if err != nil` blocks, which fall through to `normalize_if`.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct GoNormalizer;

impl GASTNormalizer for GoNormalizer {
    fn language(&self) -> Language {
        Language::Go
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "source_file" => GASTNode::Program { body: self.normalize_children(node, source) },

            "function_declaration" | "method_declaration" | "func_literal" => self.normalize_function(node, source),

            "type_declaration" => {
                let spec = (0..node.child_count()).filter_map(|i| node.child(i)).find(|c| c.kind() == "type_spec");
                let Some(spec) = spec else {
                    return GASTNode::Other { kind: "type_declaration".to_string(), children: self.normalize_children(node, source) };
                };
                let name = spec.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                match spec.child_by_field_name("type").map(|t| t.kind()) {
                    Some("interface_type") => GASTNode::Interface {
                        name,
                        extends: vec![],
                        body: spec.child_by_field_name("type").map(|n| self.normalize_children(&n, source)).unwrap_or_default(),
                    },
                    _ => GASTNode::Class {
                        name,
                        bases: vec![],
                        body: spec.child_by_field_name("type").map(|n| self.normalize_children(&n, source)).unwrap_or_default(),
                        is_abstract: false,
                    },
                }
            }

            "import_spec" => {
                let source_str = node.child_by_field_name("path")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .trim_matches('"')
                    .to_string();
                GASTNode::Import { source: source_str, specifiers: vec![] }
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

            "selector_expression" => {
                let object = node.child_by_field_name("operand")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let property = node.child_by_field_name("field")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::MemberAccess { object: Box::new(object), property }
            }

            "defer_statement" => {
                let value = node.child(1)
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                GASTNode::Other { kind: "defer".to_string(), children: vec![value] }
            }

            "type_switch_statement" | "expression_switch_statement" => self.normalize_switch(node, source),

            "comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("// ") && node.prev_sibling().is_none();
                GASTNode::Comment { text, is_doc }
            }

            "true" | "false" => GASTNode::BoolLiteral { value: node.kind() == "true" },
            "nil" => GASTNode::NullLiteral,

            "expression_statement" => node.child(0)
                .map(|c| self.normalize_node(&c, source))
                .unwrap_or(GASTNode::Other { kind: "expression_statement".to_string(), children: vec![] }),

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}
