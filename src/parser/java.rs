//! Java front end
//!
//! Parses Java text with tree-sitter and lowers the concrete syntax tree into
//! a [`SourceUnit`]:
//! - package and import declarations
//! - class/interface declarations with their annotations
//! - every method declaration, wherever it is nested
//! - constructor bodies, initializer blocks and field initializers
//!
//! Class bodies that appear inside a method (anonymous and local classes) are
//! left out of that method's statement tree. Their own methods are collected
//! as separate entries.

use tree_sitter::{Node, Parser, Tree};

use crate::error::{AnalyzerError, Result};
use crate::unit::{
    Block, CatchClause, Expr, LineSpan, MethodBody, MethodDecl, SourceUnit, Stmt, SwitchCase,
    TypeDecl, TypeKind,
};

/// Deepest syntax nesting accepted for lowering
pub const MAX_SYNTAX_DEPTH: usize = 1000;

/// Parse Java source text into a source unit
///
/// `path` is only used for error messages. Files nested deeper than
/// [`MAX_SYNTAX_DEPTH`] are rejected as malformed.
pub fn parse_java(path: &str, source: &str) -> Result<SourceUnit> {
    let tree = parse_tree(path, source)?;
    let root = tree.root_node();

    let depth = syntax_depth(&tree);
    if depth > MAX_SYNTAX_DEPTH {
        return Err(AnalyzerError::MalformedUnit {
            path: path.to_string(),
            message: format!(
                "syntax nesting depth {} exceeds limit of {}",
                depth, MAX_SYNTAX_DEPTH
            ),
        });
    }

    if root.has_error() {
        let line = first_error_line(&root).unwrap_or(1);
        return Err(AnalyzerError::MalformedUnit {
            path: path.to_string(),
            message: format!("syntax error near line {}", line),
        });
    }

    let mut unit = SourceUnit {
        line_count: source.lines().count(),
        ..Default::default()
    };

    extract_package(&mut unit, &root, source);
    extract_imports(&mut unit, &root, source);
    collect_declarations(&mut unit, &root, source);

    Ok(unit)
}

fn parse_tree(path: &str, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| AnalyzerError::MalformedUnit {
            path: path.to_string(),
            message: format!("failed to load Java grammar: {:?}", e),
        })?;

    parser
        .parse(source, None)
        .ok_or_else(|| AnalyzerError::MalformedUnit {
            path: path.to_string(),
            message: "parser produced no tree".to_string(),
        })
}

/// Deepest node level of the tree, walked with a cursor instead of recursion
fn syntax_depth(tree: &Tree) -> usize {
    let mut cursor = tree.walk();
    let mut depth = 0;
    let mut deepest = 0;

    loop {
        if cursor.goto_first_child() {
            depth += 1;
            deepest = deepest.max(depth);
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return deepest;
            }
            depth -= 1;
        }
    }
}

/// Line (1-based) of the first error or missing node in pre-order
fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error_line)
}

// ============================================================================
// Package & Imports
// ============================================================================

fn extract_package(unit: &mut SourceUnit, root: &Node, source: &str) {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "package_declaration" {
            unit.package = qualified_name_child(&child).map(|n| node_text(&n, source));
            return;
        }
    }
}

fn extract_imports(unit: &mut SourceUnit, root: &Node, source: &str) {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "import_declaration" {
            if let Some(name) = qualified_name_child(&child) {
                unit.imports.push(node_text(&name, source));
            }
        }
    }
}

fn qualified_name_child<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"));
    found
}

// ============================================================================
// Declarations
// ============================================================================

/// Walk the whole tree collecting types, methods and code outside methods
fn collect_declarations(unit: &mut SourceUnit, node: &Node, source: &str) {
    match node.kind() {
        "class_declaration" | "interface_declaration" => {
            unit.types.push(lower_type(node, source));
        }
        "method_declaration" => {
            unit.methods.push(lower_method(node, source));
        }
        "constructor_declaration" | "compact_constructor_declaration" => {
            if let Some(body) = node.child_by_field_name("body") {
                unit.other_code.push(Stmt::Block(lower_block(&body, source)));
            }
        }
        "class_body" | "interface_body" | "enum_body_declarations" => {
            collect_member_code(unit, node, source);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    for child in &children {
        collect_declarations(unit, child, source);
    }
}

/// Initializer blocks and field initializers of one class body
fn collect_member_code(unit: &mut SourceUnit, body: &Node, source: &str) {
    let mut cursor = body.walk();
    let members: Vec<Node> = body.named_children(&mut cursor).collect();

    for member in &members {
        match member.kind() {
            "block" => unit.other_code.push(Stmt::Block(lower_block(member, source))),
            "static_initializer" => {
                if let Some(block) = child_of_kind(member, "block") {
                    unit.other_code.push(Stmt::Block(lower_block(&block, source)));
                }
            }
            "field_declaration" | "constant_declaration" => {
                let mut inner = member.walk();
                let initializers: Vec<Expr> = member
                    .named_children(&mut inner)
                    .filter(|c| c.kind() == "variable_declarator")
                    .filter_map(|d| d.child_by_field_name("value"))
                    .map(|v| lower_expr(&v, source))
                    .collect();
                let expr = Expr::compound(initializers);
                if expr != Expr::Atom {
                    unit.other_code.push(Stmt::Simple(vec![expr]));
                }
            }
            _ => {}
        }
    }
}

fn lower_type(node: &Node, source: &str) -> TypeDecl {
    let kind = if node.kind() == "interface_declaration" {
        TypeKind::Interface
    } else {
        TypeKind::Class
    };

    TypeDecl {
        name: node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source))
            .unwrap_or_default(),
        kind,
        annotations: annotation_names(node, source),
        span: span_of(node),
    }
}

fn lower_method(node: &Node, source: &str) -> MethodDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source))
        .unwrap_or_default();

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| {
            let mut cursor = params.walk();
            let names: Vec<String> = params
                .named_children(&mut cursor)
                .filter_map(|p| parameter_name(&p, source))
                .collect();
            names
        })
        .unwrap_or_default();

    let throws = child_of_kind(node, "throws")
        .map(|t| {
            let mut cursor = t.walk();
            let names: Vec<String> = t
                .named_children(&mut cursor)
                .map(|n| node_text(&n, source))
                .collect();
            names
        })
        .unwrap_or_default();

    let body = node.child_by_field_name("body").map(|block| MethodBody {
        text: node_text(&block, source),
        block: lower_block(&block, source),
    });

    MethodDecl {
        name,
        parameters,
        throws,
        annotations: annotation_names(node, source),
        body,
        span: span_of(node),
    }
}

fn parameter_name(param: &Node, source: &str) -> Option<String> {
    match param.kind() {
        "formal_parameter" => param
            .child_by_field_name("name")
            .map(|n| node_text(&n, source)),
        "spread_parameter" => {
            let declarator = child_of_kind(param, "variable_declarator")?;
            declarator
                .child_by_field_name("name")
                .map(|n| node_text(&n, source))
        }
        _ => None,
    }
}

/// Annotation names from a declaration's modifiers, as written
fn annotation_names(node: &Node, source: &str) -> Vec<String> {
    let Some(modifiers) = child_of_kind(node, "modifiers") else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    let names: Vec<String> = modifiers
        .named_children(&mut cursor)
        .filter(|c| matches!(c.kind(), "marker_annotation" | "annotation"))
        .filter_map(|a| a.child_by_field_name("name"))
        .map(|n| node_text(&n, source))
        .collect();
    names
}

// ============================================================================
// Statements
// ============================================================================

fn lower_block(node: &Node, source: &str) -> Block {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    Block::new(
        children
            .iter()
            .filter(|c| !is_comment(c))
            .map(|c| lower_stmt(c, source))
            .collect(),
    )
}

fn lower_stmt(node: &Node, source: &str) -> Stmt {
    match node.kind() {
        "block" | "constructor_body" => Stmt::Block(lower_block(node, source)),
        "if_statement" => Stmt::If {
            condition: field_expr(node, "condition", source),
            then_branch: Box::new(field_stmt(node, "consequence", source)),
            else_branch: node
                .child_by_field_name("alternative")
                .map(|alt| Box::new(lower_stmt(&alt, source))),
        },
        "while_statement" => Stmt::While {
            condition: field_expr(node, "condition", source),
            body: Box::new(field_stmt(node, "body", source)),
        },
        "do_statement" => Stmt::DoWhile {
            body: Box::new(field_stmt(node, "body", source)),
            condition: field_expr(node, "condition", source),
        },
        "for_statement" => {
            let body = node.child_by_field_name("body");
            let body_id = body.map(|b| b.id());
            let mut cursor = node.walk();
            let header: Vec<Expr> = node
                .named_children(&mut cursor)
                .filter(|c| Some(c.id()) != body_id)
                .map(|c| lower_expr(&c, source))
                .collect();
            Stmt::For {
                header,
                body: Box::new(
                    body.map(|b| lower_stmt(&b, source))
                        .unwrap_or(Stmt::Simple(Vec::new())),
                ),
            }
        }
        "enhanced_for_statement" => Stmt::ForEach {
            iterable: field_expr(node, "value", source),
            body: Box::new(field_stmt(node, "body", source)),
        },
        "switch_expression" => Stmt::Switch {
            selector: field_expr(node, "condition", source),
            cases: node
                .child_by_field_name("body")
                .map(|b| lower_switch_block(&b, source))
                .unwrap_or_default(),
        },
        "try_statement" | "try_with_resources_statement" => lower_try(node, source),
        "throw_statement" => {
            let mut cursor = node.walk();
            let thrown = node
                .named_children(&mut cursor)
                .find(|c| !is_comment(c))
                .map(|c| lower_expr(&c, source))
                .unwrap_or(Expr::Atom);
            Stmt::Throw(thrown)
        }
        "synchronized_statement" => {
            let mut cursor = node.walk();
            let lock = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "parenthesized_expression")
                .map(|c| lower_expr(&c, source))
                .unwrap_or(Expr::Atom);
            Stmt::Synchronized {
                lock,
                body: node
                    .child_by_field_name("body")
                    .map(|b| lower_block(&b, source))
                    .unwrap_or_default(),
            }
        }
        "labeled_statement" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "identifier" && !is_comment(c))
                .last();
            inner
                .map(|s| lower_stmt(&s, source))
                .unwrap_or(Stmt::Simple(Vec::new()))
        }
        // Local type declarations are collected on their own
        "class_declaration" | "interface_declaration" | "enum_declaration"
        | "record_declaration" => Stmt::Simple(Vec::new()),
        _ => {
            let mut cursor = node.walk();
            let exprs: Vec<Expr> = node
                .named_children(&mut cursor)
                .map(|c| lower_expr(&c, source))
                .filter(|e| *e != Expr::Atom)
                .collect();
            Stmt::Simple(exprs)
        }
    }
}

fn lower_try(node: &Node, source: &str) -> Stmt {
    let resources = node
        .child_by_field_name("resources")
        .map(|spec| {
            let mut cursor = spec.walk();
            let exprs: Vec<Expr> = spec
                .named_children(&mut cursor)
                .map(|r| lower_expr(&r, source))
                .collect();
            exprs
        })
        .unwrap_or_default();

    let mut catches = Vec::new();
    let mut finally = None;
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    for child in &children {
        match child.kind() {
            "catch_clause" => catches.push(lower_catch(child, source)),
            "finally_clause" => {
                finally = child_of_kind(child, "block").map(|b| lower_block(&b, source));
            }
            _ => {}
        }
    }

    Stmt::Try {
        resources,
        body: node
            .child_by_field_name("body")
            .map(|b| lower_block(&b, source))
            .unwrap_or_default(),
        catches,
        finally,
    }
}

fn lower_catch(node: &Node, source: &str) -> CatchClause {
    let types = child_of_kind(node, "catch_formal_parameter")
        .and_then(|param| child_of_kind(&param, "catch_type"))
        .map(|catch_type| {
            let mut cursor = catch_type.walk();
            let names: Vec<String> = catch_type
                .named_children(&mut cursor)
                .map(|t| node_text(&t, source))
                .collect();
            names
        })
        .unwrap_or_default();

    CatchClause {
        types,
        body: node
            .child_by_field_name("body")
            .map(|b| lower_block(&b, source))
            .unwrap_or_default(),
    }
}

/// One `SwitchCase` per label; a group's statements attach to its last label
fn lower_switch_block(node: &Node, source: &str) -> Vec<SwitchCase> {
    let mut cases: Vec<SwitchCase> = Vec::new();
    let mut cursor = node.walk();
    let entries: Vec<Node> = node.named_children(&mut cursor).collect();

    for entry in &entries {
        match entry.kind() {
            "switch_block_statement_group" => {
                let mut inner = entry.walk();
                let parts: Vec<Node> = entry.named_children(&mut inner).collect();
                for part in &parts {
                    if part.kind() == "switch_label" {
                        cases.push(SwitchCase {
                            label: node_text(part, source),
                            body: Vec::new(),
                        });
                    } else if !is_comment(part) {
                        let stmt = lower_stmt(part, source);
                        if let Some(case) = cases.last_mut() {
                            case.body.push(stmt);
                        }
                    }
                }
            }
            "switch_rule" => {
                let mut inner = entry.walk();
                let parts: Vec<Node> = entry.named_children(&mut inner).collect();
                let mut case = SwitchCase::default();
                for part in &parts {
                    if part.kind() == "switch_label" {
                        case.label = node_text(part, source);
                    } else if !is_comment(part) {
                        case.body.push(lower_stmt(part, source));
                    }
                }
                cases.push(case);
            }
            _ => {}
        }
    }

    cases
}

// ============================================================================
// Expressions
// ============================================================================

fn lower_expr(node: &Node, source: &str) -> Expr {
    match node.kind() {
        "ternary_expression" => Expr::Conditional {
            condition: Box::new(field_expr(node, "condition", source)),
            when_true: Box::new(field_expr(node, "consequence", source)),
            when_false: Box::new(field_expr(node, "alternative", source)),
        },
        "lambda_expression" => {
            let body = match node.child_by_field_name("body") {
                Some(b) if b.kind() == "block" => Stmt::Block(lower_block(&b, source)),
                Some(b) => Stmt::Simple(vec![lower_expr(&b, source)]),
                None => Stmt::Simple(Vec::new()),
            };
            Expr::Lambda(Box::new(body))
        }
        "switch_expression" => Expr::Switch {
            selector: Box::new(field_expr(node, "condition", source)),
            cases: node
                .child_by_field_name("body")
                .map(|b| lower_switch_block(&b, source))
                .unwrap_or_default(),
        },
        // Anonymous class bodies are collected as separate declarations
        "class_body" => Expr::Atom,
        _ if is_comment(node) => Expr::Atom,
        _ => {
            let mut cursor = node.walk();
            let parts: Vec<Expr> = node
                .named_children(&mut cursor)
                .map(|c| lower_expr(&c, source))
                .collect();
            Expr::compound(parts)
        }
    }
}

// ============================================================================
// Utility functions
// ============================================================================

fn field_expr(node: &Node, field: &str, source: &str) -> Expr {
    node.child_by_field_name(field)
        .map(|n| lower_expr(&n, source))
        .unwrap_or(Expr::Atom)
}

fn field_stmt(node: &Node, field: &str, source: &str) -> Stmt {
    node.child_by_field_name(field)
        .map(|n| lower_stmt(&n, source))
        .unwrap_or(Stmt::Simple(Vec::new()))
}

fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn span_of(node: &Node) -> LineSpan {
    LineSpan::new(node.start_position().row + 1, node.end_position().row + 1)
}

/// Get text content of a node
fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}
