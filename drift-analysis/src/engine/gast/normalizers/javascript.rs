//! JavaScript GAST normalizer. Shares nearly all node kinds with
//! TypeScript's grammar; kept as its own file since `ParserManager`
//! dispatches per-language rather than per-grammar-family.

use tree_sitter::Node;

use crate::engine::gast::base_normalizer::GASTNormalizer;
use crate::engine::gast::types::GASTNode;
use crate::scanner::language_detect::Language;

pub struct JavaScriptNormalizer;

impl GASTNormalizer for JavaScriptNormalizer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn normalize_node(&self, node: &Node, source: &[u8]) -> GASTNode {
        match node.kind() {
            "member_expression" => {
                let object = node.child_by_field_name("object")
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let property = node.child_by_field_name("property")
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                GASTNode::MemberAccess { object: Box::new(object), property }
            }

            "new_expression" => {
                let callee = node.child_by_field_name("constructor")
                    .or_else(|| node.child(1))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::Identifier { name: "unknown".to_string() });
                let arguments = node.child_by_field_name("arguments")
                    .map(|n| self.normalize_children(&n, source))
                    .unwrap_or_default();
                GASTNode::NewExpression { callee: Box::new(callee), arguments }
            }

            "template_string" => {
                let parts = self.normalize_children(node, source);
                GASTNode::TemplateLiteral { parts }
            }

            "array" => GASTNode::ArrayLiteral { elements: self.normalize_children(node, source) },
            "object" => GASTNode::ObjectLiteral { properties: self.normalize_children(node, source) },

            "ternary_expression" => {
                let condition = node.child_by_field_name("condition")
                    .or_else(|| node.child(0))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::BoolLiteral { value: true });
                let consequent = node.child_by_field_name("consequence")
                    .or_else(|| node.child(2))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let alternate = node.child_by_field_name("alternative")
                    .or_else(|| node.child(4))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                GASTNode::Ternary {
                    condition: Box::new(condition),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                }
            }

            "binary_expression" => {
                let left = node.child_by_field_name("left")
                    .or_else(|| node.child(0))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                let op = node.child_by_field_name("operator")
                    .or_else(|| node.child(1))
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                let right = node.child_by_field_name("right")
                    .or_else(|| node.child(2))
                    .map(|n| self.normalize_node(&n, source))
                    .unwrap_or(GASTNode::NullLiteral);
                GASTNode::BinaryOp { left: Box::new(left), op, right: Box::new(right) }
            }

            "expression_statement" => {
                if let Some(child) = node.child(0) {
                    self.normalize_node(&child, source)
                } else {
                    GASTNode::Other { kind: "expression_statement".to_string(), children: vec![] }
                }
            }

            "null" | "undefined" => GASTNode::NullLiteral,

            // Everything else (functions, classes, control flow, literals,
            // imports) matches the base normalizer's defaults exactly.
            _ => crate::engine::gast::base_normalizer::BaseNormalizer.normalize_node(node, source),
        }
    }
}
