//! C# GAST normalizer.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::{BaseNormalizer, GASTNormalizer};
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct CSharpNormalizer;

impl GASTNormalizer for CSharpNormalizer {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "compilation_unit" => GASTNode::Program { body: self.normalize_children(node, source) },

            "method_declaration" | "constructor_declaration" | "local_function_statement" => {
                self.normalize_function(node, source)
            }

            "class_declaration" | "record_declaration" | "struct_declaration" => {
                let name = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let bases = node.child_by_field_name("bases")
                    .map(|n| n.utf8_text(source).unwrap_or("").trim_start_matches(':').split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                    .unwrap_or_default();
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                let is_abstract = node.child_by_field_name("modifiers")
                    .map(|m| m.utf8_text(source).unwrap_or("").contains("abstract"))
                    .unwrap_or(false);
                GASTNode::Class { name, bases, body, is_abstract }
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
                let variable = node.child_by_field_name("left")
                    .or_else(|| node.child_by_field_name("name"))
                    .map(|n| GASTNode::Identifier { name: n.utf8_text(source).unwrap_or("").to_string() })
                    .unwrap_or(GASTNode::Identifier { name: "_".to_string() });
                let iterable = node.child_by_field_name("right")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let body = node.child_by_field_name("body")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Block { statements: vec![] });
                GASTNode::ForEach { variable: Box::new(variable), iterable: Box::new(iterable), body: Box::new(body) }
            }

            "invocation_expression" => {
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

            "member_access_expression" => {
                let object = node.child_by_field_name("expression")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let property = node.child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::MemberAccess { object: Box::new(object), property }
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

            "using_directive" => {
                let source_str = (0..node.child_count())
                    .filter_map(|i| node.child(i))
                    .find(|c| matches!(c.kind(), "qualified_name" | "identifier"))
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::Import { source: source_str, specifiers: vec![] }
            }

            "attribute" => self.normalize_decorator(node, source),

            "comment" => {
                let text = node.utf8_text(source).unwrap_or("").to_string();
                let is_doc = text.starts_with("///");
                GASTNode::Comment { text, is_doc }
            }

            "boolean_literal" => GASTNode::BoolLiteral { value: node.utf8_text(source) == Ok("true") },
            "null_literal" => GASTNode::NullLiteral,

            "expression_statement" => node.child(0)
                .map(|c| self.normalize_node(&c, source))
                .unwrap_or(GASTNode::Other { kind: "expression_statement".to_string(), children: vec![] }),

            _ => BaseNormalizer.normalize_node(node, source),
        }
    }
}
