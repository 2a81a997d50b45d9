//! Business-criticality signals
//!
//! Cheap pattern checks over annotations, method names and method body text.
//! These are risk indicators, not a verifier: false positives and negatives
//! are expected.

use crate::metadata::BusinessComplexity;
use crate::unit::{Block, Expr, MethodDecl, SourceUnit, Stmt};

/// Class annotations that mark a type as business-facing (exact match)
pub const BUSINESS_ANNOTATIONS: &[&str] = &[
    "Service", "Controller", "Component", "Repository", "Transactional",
    "RestController", "RequestMapping", "PostMapping", "GetMapping",
];

/// Method-name stems that suggest business logic (substring, lowercase)
pub const BUSINESS_KEYWORDS: &[&str] = &[
    "process", "calculate", "validate", "approve", "reject", "create", "update",
    "delete", "save", "find", "search", "payment", "order", "customer",
    "account", "transaction", "service", "repository", "controller",
];

/// Upper bound of the criticality score
pub const MAX_CRITICALITY: f64 = 10.0;

const ANNOTATION_WEIGHT: f64 = 2.0;
const BUSINESS_METHOD_WEIGHT: f64 = 1.0;
const VALIDATION_WEIGHT: f64 = 0.5;
const TRANSACTION_WEIGHT: f64 = 1.5;

/// Detect business signals in a source unit
pub fn analyze_business(unit: &SourceUnit) -> BusinessComplexity {
    // Accumulated unclamped; clamped once when the record is built
    let mut criticality = 0.0;
    let mut result = BusinessComplexity::default();

    for decl in &unit.types {
        for annotation in &decl.annotations {
            if is_business_annotation(annotation) {
                result.has_business_annotations = true;
                criticality += ANNOTATION_WEIGHT;
            }
        }
    }

    for method in &unit.methods {
        if is_business_method_name(&method.name) {
            result.business_method_count += 1;
            result.business_methods.push(method.name.clone());
            criticality += BUSINESS_METHOD_WEIGHT;
        }

        if has_validation_logic(method) {
            result.validation_complexity += 1;
            criticality += VALIDATION_WEIGHT;
        }

        for annotation in &method.annotations {
            if annotation.contains("Transactional") {
                result.transaction_handling = true;
                criticality += TRANSACTION_WEIGHT;
            }
        }
    }

    result.exception_handling = unit
        .methods
        .iter()
        .filter_map(|m| m.body.as_ref())
        .any(|body| block_handles_exceptions(&body.block))
        || unit.other_code.iter().any(stmt_handles_exceptions);

    result.business_criticality = clamp_criticality(criticality);
    result
}

/// Cap a raw criticality total at [`MAX_CRITICALITY`]
pub fn clamp_criticality(raw: f64) -> f64 {
    raw.clamp(0.0, MAX_CRITICALITY)
}

/// Exact, case-sensitive vocabulary match
pub fn is_business_annotation(name: &str) -> bool {
    BUSINESS_ANNOTATIONS.contains(&name)
}

/// Case-insensitive substring match against the keyword stems
pub fn is_business_method_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    BUSINESS_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Literal text heuristic: a condition, a rejection, and a validity term
pub fn has_validation_logic(method: &MethodDecl) -> bool {
    let Some(body) = &method.body else {
        return false;
    };
    let text = body.text.as_str();

    text.contains("if")
        && (text.contains("throw") || text.contains("return false"))
        && (text.contains("null")
            || text.contains("empty")
            || text.contains("invalid")
            || text.contains("validate"))
}

// ============================================================================
// Exception handling detection
// ============================================================================

fn block_handles_exceptions(block: &Block) -> bool {
    block.statements.iter().any(stmt_handles_exceptions)
}

fn stmt_handles_exceptions(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Try { .. } | Stmt::Throw(_) => true,
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            expr_handles_exceptions(condition)
                || stmt_handles_exceptions(then_branch)
                || else_branch.as_deref().is_some_and(stmt_handles_exceptions)
        }
        Stmt::While { condition, body } | Stmt::DoWhile { body, condition } => {
            expr_handles_exceptions(condition) || stmt_handles_exceptions(body)
        }
        Stmt::For { header, body } => {
            header.iter().any(expr_handles_exceptions) || stmt_handles_exceptions(body)
        }
        Stmt::ForEach { iterable, body } => {
            expr_handles_exceptions(iterable) || stmt_handles_exceptions(body)
        }
        Stmt::Switch { selector, cases } => {
            expr_handles_exceptions(selector)
                || cases
                    .iter()
                    .any(|c| c.body.iter().any(stmt_handles_exceptions))
        }
        Stmt::Block(block) => block_handles_exceptions(block),
        Stmt::Synchronized { lock, body } => {
            expr_handles_exceptions(lock) || block_handles_exceptions(body)
        }
        Stmt::Simple(exprs) => exprs.iter().any(expr_handles_exceptions),
    }
}

fn expr_handles_exceptions(expr: &Expr) -> bool {
    match expr {
        Expr::Lambda(body) => stmt_handles_exceptions(body),
        Expr::Switch { selector, cases } => {
            expr_handles_exceptions(selector)
                || cases
                    .iter()
                    .any(|c| c.body.iter().any(stmt_handles_exceptions))
        }
        Expr::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            expr_handles_exceptions(condition)
                || expr_handles_exceptions(when_true)
                || expr_handles_exceptions(when_false)
        }
        Expr::Compound(parts) => parts.iter().any(expr_handles_exceptions),
        Expr::Atom => false,
    }
}
