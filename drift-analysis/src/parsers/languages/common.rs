//! Shared tree-sitter walk used by every `LanguageParser` impl.
//!
//! Tree-sitter grammars name their nodes slightly differently per language
//! (`function_declaration` vs `function_definition` vs `function_item`),
//! but the shapes are close enough that one recursive walk matching on the
//! union of all ten grammars' node kinds covers every language without
//! duplicating the traversal ten times.

use std::path::Path;
use std::time::Instant;

use drift_core::errors::ParseError;
use smallvec::SmallVec;
use tree_sitter::{Node, Parser, Tree};

use super::super::types::{
    CallSite, ClassInfo, DecoratorInfo, ErrorHandlingKind, ExportInfo, FunctionInfo, ImportInfo,
    ImportSpecifier, ParseResult, Range, Visibility,
};
use crate::scanner::language_detect::Language;

/// Parse `source` and extract structure, discarding the tree-sitter tree.
pub fn parse_with_language(
    source: &[u8],
    path: &Path,
    language: Language,
    ts_language: tree_sitter::Language,
) -> Result<ParseResult, ParseError> {
    parse_with_language_and_tree(source, path, language, ts_language).map(|(r, _)| r)
}

/// Parse `source`, returning both the flat `ParseResult` and the raw tree
/// so callers that also need the AST (the detection engine) avoid a
/// redundant re-parse.
pub fn parse_with_language_and_tree(
    source: &[u8],
    path: &Path,
    language: Language,
    ts_language: tree_sitter::Language,
) -> Result<(ParseResult, Tree), ParseError> {
    let start = Instant::now();
    let file = path.to_string_lossy().to_string();

    let mut parser = Parser::new();
    parser
        .set_language(&ts_language)
        .map_err(|_| ParseError::UnsupportedLanguage { extension: language.name().to_string() })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError::GrammarError {
        path: file.clone(),
        line: 0,
        column: 0,
        message: "tree-sitter returned no tree".to_string(),
    })?;

    let mut result = ParseResult::empty(file.clone(), language);
    result.error_ranges = collect_error_ranges(tree.root_node());

    extract_structure(&mut result, tree.root_node(), source, &file);
    extract_calls(&mut result, tree.root_node(), source, &file);

    result.parse_time_us = start.elapsed().as_micros() as u64;
    Ok((result, tree))
}

fn collect_error_ranges(node: Node) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut cursor = node.walk();
    collect_error_ranges_rec(&mut cursor, &mut ranges, 0);
    ranges
}

fn collect_error_ranges_rec(cursor: &mut tree_sitter::TreeCursor, out: &mut Vec<Range>, depth: usize) {
    let node = cursor.node();
    if node.is_error() || node.is_missing() {
        out.push(node_range(&node));
    }
    if depth < 200 && cursor.goto_first_child() {
        loop {
            collect_error_ranges_rec(cursor, out, depth + 1);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn node_range(node: &Node) -> Range {
    Range {
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        start_line: node.start_position().row as u32,
        end_line: node.end_position().row as u32,
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> std::borrow::Cow<'a, str> {
    String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()])
}

fn find_child_text(node: &Node, source: &[u8], candidates: &[&str]) -> Option<String> {
    if let Some(n) = node.child_by_field_name("name") {
        return Some(node_text(n, source).into_owned());
    }
    let count = node.child_count();
    for i in 0..count {
        if let Some(child) = node.child(i) {
            if candidates.contains(&child.kind()) {
                return Some(node_text(child, source).into_owned());
            }
        }
    }
    None
}

fn has_child_kind(node: &Node, kind: &str) -> bool {
    (0..node.child_count()).any(|i| node.child(i).is_some_and(|c| c.kind() == kind))
}

/// Functions, classes, imports, exports — one recursive descent.
fn extract_structure(result: &mut ParseResult, root: Node, source: &[u8], file: &str) {
    let mut cursor = root.walk();
    extract_structure_rec(result, &mut cursor, source, file, None, 0);
}

fn extract_structure_rec(
    result: &mut ParseResult,
    cursor: &mut tree_sitter::TreeCursor,
    source: &[u8],
    file: &str,
    enclosing_class: Option<&str>,
    depth: usize,
) {
    let node = cursor.node();
    let kind = node.kind();

    let mut child_class_ctx: Option<String> = None;

    match kind {
        "function_declaration" | "function_definition" | "function_item" | "method_declaration"
        | "method_definition" | "method" | "singleton_method" | "constructor_declaration" => {
            if let Some(func) = extract_function(node, source, file, enclosing_class) {
                result.functions.push(func);
            }
        }
        "arrow_function" | "lambda" if enclosing_class.is_none() => {
            // Only top-level arrow functions/lambdas assigned to a name are
            // tracked; ones passed inline as callback arguments are noise.
            if let Some(name) = node.parent().and_then(|p| {
                (p.kind() == "variable_declarator" || p.kind() == "assignment")
                    .then(|| find_child_text(&p, source, &["identifier"]))
                    .flatten()
            }) {
                if let Some(mut func) = extract_function(node, source, file, enclosing_class) {
                    func.name = name;
                    result.functions.push(func);
                }
            }
        }
        "class_declaration" | "class_definition" | "class_specifier" | "struct_item"
        | "interface_declaration" | "trait_item" | "record_declaration" => {
            if let Some(class) = extract_class(node, source, file, kind) {
                child_class_ctx = Some(class.name.clone());
                result.classes.push(class);
            }
        }
        "import_statement" | "import_declaration" | "import_from_statement" | "use_declaration"
        | "using_directive" | "import_header" | "namespace_use_declaration" => {
            if let Some(import) = extract_import(node, source) {
                result.imports.push(import);
            }
        }
        "export_statement" | "export_declaration" => {
            if let Some(export) = extract_export(node, source) {
                result.exports.push(export);
            }
        }
        _ => {}
    }

    let class_ctx = child_class_ctx.as_deref().or(enclosing_class);

    if depth < 200 && cursor.goto_first_child() {
        loop {
            extract_structure_rec(result, cursor, source, file, class_ctx, depth + 1);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn extract_function(
    node: Node,
    source: &[u8],
    file: &str,
    enclosing_class: Option<&str>,
) -> Option<FunctionInfo> {
    let name = find_child_text(&node, source, &[
        "identifier",
        "property_identifier",
        "field_identifier",
        "simple_identifier",
    ])
    .unwrap_or_else(|| "<anonymous>".to_string());

    let is_constructor = matches!(name.as_str(), "constructor" | "__init__" | "initialize")
        || node.kind() == "constructor_declaration"
        || enclosing_class.is_some_and(|c| c == name);

    let (param_names, param_types) = extract_parameters(&node, source);
    let return_type = node
        .child_by_field_name("return_type")
        .or_else(|| node.child_by_field_name("type"))
        .map(|t| node_text(t, source).into_owned());

    let decorators = extract_decorators_for_node(&node, source);
    let error_handling = classify_error_handling(&node, source);
    let is_test = name.starts_with("test_")
        || name.starts_with("test")
        || decorators.iter().any(|d| {
            matches!(d.name.as_str(), "Test" | "test" | "pytest.fixture" | "Fact" | "Theory")
        });

    Some(FunctionInfo {
        name,
        class_name: enclosing_class.map(str::to_string),
        visibility: extract_visibility(&node, source),
        is_async: has_child_kind(&node, "async"),
        is_static: has_child_kind(&node, "static"),
        is_constructor,
        is_test,
        param_names,
        param_types,
        return_type,
        decorators,
        error_handling,
        line: node.start_position().row as u32,
        end_line: node.end_position().row as u32,
        range: node_range(&node),
    })
}

fn extract_parameters(node: &Node, source: &[u8]) -> (SmallVec<[String; 4]>, SmallVec<[Option<String>; 4]>) {
    let mut names = SmallVec::new();
    let mut types = SmallVec::new();

    let Some(params) = node
        .child_by_field_name("parameters")
        .or_else(|| node.child_by_field_name("formal_parameters"))
    else {
        return (names, types);
    };

    for i in 0..params.child_count() {
        let Some(param) = params.child(i) else { continue };
        if matches!(param.kind(), "(" | ")" | ",") {
            continue;
        }
        let name = find_child_text(&param, source, &["identifier", "simple_identifier"])
            .unwrap_or_else(|| node_text(param, source).trim().to_string());
        if name.is_empty() || name == "self" || name == "this" {
            continue;
        }
        let ty = param
            .child_by_field_name("type")
            .map(|t| node_text(t, source).into_owned());
        names.push(name);
        types.push(ty);
    }

    (names, types)
}

fn extract_visibility(node: &Node, source: &[u8]) -> Visibility {
    let text = node_text(*node, source);
    let prefix = &text[..text.len().min(64)];
    if prefix.contains("private") {
        Visibility::Private
    } else if prefix.contains("protected") {
        Visibility::Protected
    } else if prefix.contains("internal") {
        Visibility::Internal
    } else if prefix.contains("public") || prefix.contains("export") {
        Visibility::Public
    } else {
        Visibility::Unspecified
    }
}

fn classify_error_handling(node: &Node, source: &[u8]) -> Vec<ErrorHandlingKind> {
    let Some(body) = node.child_by_field_name("body") else { return Vec::new() };
    let text = node_text(body, source);
    let mut kinds = Vec::new();

    let mut cursor = body.walk();
    collect_catch_like(&mut cursor, source, &mut kinds, 0);

    if text.contains("throw ") || text.contains("raise ") {
        kinds.push(ErrorHandlingKind::Rethrow);
    }
    if text.contains(".unwrap()") || text.contains(".expect(") || text.contains("os.exit") || text.contains("process.exit") {
        kinds.push(ErrorHandlingKind::Abort);
    }
    kinds
}

fn collect_catch_like(
    cursor: &mut tree_sitter::TreeCursor,
    source: &[u8],
    out: &mut Vec<ErrorHandlingKind>,
    depth: usize,
) {
    let node = cursor.node();
    if matches!(node.kind(), "catch_clause" | "except_clause" | "rescue_clause" | "rescue") {
        let block_text = node_text(node, source);
        let body_lines = block_text.lines().filter(|l| !l.trim().is_empty()).count();
        if body_lines <= 1 {
            out.push(ErrorHandlingKind::Swallowed);
        } else if block_text.contains("log") || block_text.contains("Log") || block_text.contains("warn") {
            out.push(ErrorHandlingKind::LogAndContinue);
        } else if block_text.contains("Result") || block_text.contains("Either") || block_text.contains("return Err") {
            out.push(ErrorHandlingKind::ConvertToResult);
        }
    }
    if depth < 50 && cursor.goto_first_child() {
        loop {
            collect_catch_like(cursor, source, out, depth + 1);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn extract_decorators_for_node(node: &Node, source: &[u8]) -> Vec<DecoratorInfo> {
    let mut decorators = Vec::new();
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if matches!(s.kind(), "decorator" | "attribute_item" | "annotation" | "marker_annotation") {
            if let Some(name) = find_child_text(&s, source, &["identifier", "type_identifier"]) {
                decorators.push(DecoratorInfo {
                    name,
                    arguments: Vec::new(),
                    line: s.start_position().row as u32,
                });
            }
            sibling = s.prev_sibling();
        } else {
            break;
        }
    }
    decorators.reverse();
    decorators
}

fn extract_class(node: Node, source: &[u8], file: &str, kind: &str) -> Option<ClassInfo> {
    let name = find_child_text(&node, source, &["identifier", "type_identifier", "constant"])?;

    let extends = node
        .child_by_field_name("superclass")
        .map(|n| vec![node_text(n, source).trim_start_matches("extends ").trim().to_string()])
        .unwrap_or_default();
    let implements = node
        .child_by_field_name("interfaces")
        .map(|n| {
            node_text(n, source)
                .split(',')
                .map(|s| s.trim().trim_start_matches("implements").trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut method_names = Vec::new();
    let mut field_names = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        for i in 0..body.child_count() {
            let Some(child) = body.child(i) else { continue };
            match child.kind() {
                "method_definition" | "method_declaration" | "method" | "function_definition"
                | "function_item" | "constructor_declaration" => {
                    if let Some(f) = extract_function(child, source, file, Some(&name)) {
                        method_names.push(f.name);
                    }
                }
                "field_declaration" | "property_declaration" | "public_field_definition" => {
                    if let Some(n) = find_child_text(&child, source, &["identifier", "simple_identifier"]) {
                        field_names.push(n);
                    }
                }
                _ => {}
            }
        }
    }

    Some(ClassInfo {
        name,
        extends,
        implements,
        is_abstract: has_child_kind(&node, "abstract") || kind == "trait_item" || kind == "interface_declaration",
        is_interface: kind == "interface_declaration" || kind == "trait_item",
        decorators: extract_decorators_for_node(&node, source),
        method_names,
        field_names,
        line: node.start_position().row as u32,
        end_line: node.end_position().row as u32,
        range: node_range(&node),
    })
}

fn extract_import(node: Node, source: &[u8]) -> Option<ImportInfo> {
    let kind = node.kind();
    let is_type_only = node_text(node, source).trim_start().starts_with("import type");

    let module_source = node
        .child_by_field_name("source")
        .or_else(|| node.child_by_field_name("module_name"))
        .or_else(|| node.child_by_field_name("path"))
        .map(|n| node_text(n, source).trim_matches(|c| c == '"' || c == '\'').to_string())
        .or_else(|| {
            (0..node.child_count())
                .filter_map(|i| node.child(i))
                .find(|c| {
                    matches!(
                        c.kind(),
                        "string" | "string_literal" | "interpreted_string_literal"
                            | "scoped_identifier" | "dotted_name" | "identifier"
                            | "qualified_name"
                    )
                })
                .map(|n| node_text(n, source).trim_matches(|c| c == '"' || c == '\'').to_string())
        })?;

    let mut specifiers = Vec::new();
    collect_import_specifiers(node, source, &mut specifiers);

    let _ = kind;
    Some(ImportInfo {
        source: module_source,
        specifiers,
        is_type_only,
        line: node.start_position().row as u32,
    })
}

fn collect_import_specifiers(node: Node, source: &[u8], out: &mut Vec<ImportSpecifier>) {
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };
        match child.kind() {
            "import_specifier" | "named_imports" => {
                if child.kind() == "import_specifier" {
                    let imported = find_child_text(&child, source, &["identifier"]).unwrap_or_default();
                    if !imported.is_empty() {
                        out.push(ImportSpecifier {
                            imported_name: imported.clone(),
                            local_name: imported,
                            is_default: false,
                            is_namespace: false,
                        });
                    }
                } else {
                    collect_import_specifiers(child, source, out);
                }
            }
            "namespace_import" => {
                out.push(ImportSpecifier {
                    imported_name: "*".to_string(),
                    local_name: node_text(child, source).into_owned(),
                    is_default: false,
                    is_namespace: true,
                });
            }
            "identifier" if node.kind() == "import_clause" => {
                let name = node_text(child, source).into_owned();
                out.push(ImportSpecifier {
                    imported_name: name.clone(),
                    local_name: name,
                    is_default: true,
                    is_namespace: false,
                });
            }
            _ => {}
        }
    }
}

fn extract_export(node: Node, source: &[u8]) -> Option<ExportInfo> {
    let is_default = has_child_kind(&node, "default");
    let name = find_child_text(&node, source, &["identifier", "type_identifier"])
        .unwrap_or_else(|| "default".to_string());
    Some(ExportInfo { name, is_default, line: node.start_position().row as u32 })
}

/// Call sites, attached to the innermost enclosing function by name.
fn extract_calls(result: &mut ParseResult, root: Node, source: &[u8], _file: &str) {
    let mut cursor = root.walk();
    extract_calls_rec(result, &mut cursor, source, None, 0);
}

fn extract_calls_rec(
    result: &mut ParseResult,
    cursor: &mut tree_sitter::TreeCursor,
    source: &[u8],
    enclosing_fn: Option<&str>,
    depth: usize,
) {
    let node = cursor.node();
    let kind = node.kind();

    let mut fn_ctx: Option<String> = None;

    match kind {
        "function_declaration" | "function_definition" | "function_item" | "method_declaration"
        | "method_definition" | "method" => {
            fn_ctx = find_child_text(&node, source, &["identifier", "property_identifier"]);
        }
        "call_expression" | "call" | "method_invocation" | "invocation_expression"
        | "function_call_expression" => {
            if let Some(call) = extract_call_site(node, source, enclosing_fn) {
                result.call_sites.push(call);
            }
        }
        "string" | "string_literal" | "interpreted_string_literal" | "raw_string_literal" => {
            let text = node_text(node, source).trim_matches(|c| c == '"' || c == '\'').to_string();
            if !text.is_empty() {
                result.string_literals.push((text, node.start_position().row as u32));
            }
        }
        _ => {}
    }

    let ctx = fn_ctx.as_deref().or(enclosing_fn);

    if depth < 200 && cursor.goto_first_child() {
        loop {
            extract_calls_rec(result, cursor, source, ctx, depth + 1);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn extract_call_site(node: Node, source: &[u8], enclosing_fn: Option<&str>) -> Option<CallSite> {
    let callee = node.child_by_field_name("function").or_else(|| node.child(0))?;

    let (receiver, callee_name) = if callee.kind() == "member_expression"
        || callee.kind() == "field_expression"
        || callee.kind() == "attribute"
    {
        let object = callee.child_by_field_name("object").or_else(|| callee.child_by_field_name("value"));
        let property = callee
            .child_by_field_name("property")
            .or_else(|| callee.child_by_field_name("field"))
            .or_else(|| callee.child_by_field_name("attribute"));
        (
            object.map(|n| node_text(n, source).into_owned()),
            property.map(|n| node_text(n, source).into_owned()).unwrap_or_default(),
        )
    } else {
        (None, node_text(callee, source).into_owned())
    };

    if callee_name.is_empty() {
        return None;
    }

    let argument_count = node
        .child_by_field_name("arguments")
        .map(|a| (0..a.child_count()).filter(|&i| a.child(i).is_some_and(|c| !matches!(c.kind(), "(" | ")" | ","))).count())
        .unwrap_or(0);

    Some(CallSite {
        callee_name,
        receiver,
        caller_function: enclosing_fn.map(str::to_string),
        argument_count,
        line: node.start_position().row as u32,
        column: node.start_position().column as u32,
    })
}
