//! Cyclomatic and cognitive complexity
//!
//! A single depth-first walk over every method body (and over code that sits
//! outside methods) produces file-wide and per-method figures.
//!
//! Increments per construct:
//! ```text
//! construct              cyclomatic   nesting   cognitive (in a method)
//! if/while/for/for-each  +1           +1        +1 + depth before entry
//! switch (statement)     +cases       +1        +cases + depth before entry
//! catch clause           +1           -         +1
//! ternary                +1           -         +1
//! ```
//!
//! Example:
//! ```ignore
//! if (a) {            // +1 cognitive (depth 0)
//!     if (b) {        // +1 + 1 = +2 (depth 1)
//!     }
//! }
//! // cognitive 3, cyclomatic 3
//! ```

use crate::metadata::{CodeComplexity, MethodComplexity};
use crate::unit::{Block, Expr, MethodDecl, SourceUnit, Stmt, SwitchCase};

/// Methods above this cyclomatic complexity are reported as complex
pub const COMPLEX_METHOD_CYCLOMATIC: u32 = 10;
/// Methods above this cognitive complexity are reported as complex
pub const COMPLEX_METHOD_COGNITIVE: u32 = 15;

/// Compute the complexity figures of a source unit
pub fn analyze_complexity(unit: &SourceUnit) -> CodeComplexity {
    let mut tally = Tally::new();

    for method in &unit.methods {
        tally.walk_method(method);
    }
    for stmt in &unit.other_code {
        tally.walk_stmt(stmt, Depth::TOP);
    }

    tally.finish()
}

/// Complexity of a single method, walked in isolation
pub fn method_complexity(method: &MethodDecl) -> MethodComplexity {
    let mut tally = Tally::new();
    tally.walk_method(method);
    let counters = tally.last_method.unwrap_or_default();
    MethodComplexity {
        name: method.name.clone(),
        cyclomatic_complexity: counters.cyclomatic,
        cognitive_complexity: counters.cognitive,
        line_count: method.span.line_count(),
    }
}

// ============================================================================
// Walk state
// ============================================================================

/// Nesting depth at the current point of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Depth(u32);

impl Depth {
    const TOP: Depth = Depth(0);

    fn deeper(self) -> Depth {
        Depth(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct MethodCounters {
    cyclomatic: u32,
    cognitive: u32,
}

impl Default for MethodCounters {
    fn default() -> Self {
        Self {
            cyclomatic: 1,
            cognitive: 0,
        }
    }
}

/// Accumulators for one analysis call; never outlives it
#[derive(Debug)]
struct Tally {
    cyclomatic: u32,
    cognitive: u32,
    max_nesting: u32,
    method_count: u32,
    method_lines: usize,
    complex_methods: Vec<MethodComplexity>,
    /// Counters of the method being walked, `None` outside methods
    current: Option<MethodCounters>,
    last_method: Option<MethodCounters>,
}

impl Tally {
    fn new() -> Self {
        Self {
            cyclomatic: 1,
            cognitive: 0,
            max_nesting: 0,
            method_count: 0,
            method_lines: 0,
            complex_methods: Vec::new(),
            current: None,
            last_method: None,
        }
    }

    fn finish(self) -> CodeComplexity {
        let average_method_length = if self.method_count > 0 {
            self.method_lines as f64 / self.method_count as f64
        } else {
            0.0
        };

        CodeComplexity {
            cyclomatic_complexity: self.cyclomatic,
            cognitive_complexity: self.cognitive,
            total_methods: self.method_count,
            average_method_length,
            max_nesting_depth: self.max_nesting,
            complex_methods: self.complex_methods,
        }
    }

    fn walk_method(&mut self, method: &MethodDecl) {
        let line_count = method.span.line_count();
        self.method_count += 1;
        self.method_lines += line_count;
        self.current = Some(MethodCounters::default());

        if let Some(body) = &method.body {
            self.walk_block(&body.block, Depth::TOP);
        }

        let counters = self.current.take().unwrap_or_default();
        self.cognitive += counters.cognitive;

        if counters.cyclomatic > COMPLEX_METHOD_CYCLOMATIC
            || counters.cognitive > COMPLEX_METHOD_COGNITIVE
        {
            self.complex_methods.push(MethodComplexity {
                name: method.name.clone(),
                cyclomatic_complexity: counters.cyclomatic,
                cognitive_complexity: counters.cognitive,
                line_count,
            });
        }
        self.last_method = Some(counters);
    }

    /// Record a branching construct
    fn bump(&mut self, cyclomatic: u32, cognitive: u32) {
        self.cyclomatic += cyclomatic;
        if let Some(method) = self.current.as_mut() {
            method.cyclomatic += cyclomatic;
            method.cognitive += cognitive;
        }
    }

    /// Enter a nesting construct, returning the depth of its children
    fn enter(&mut self, depth: Depth) -> Depth {
        let inner = depth.deeper();
        self.max_nesting = self.max_nesting.max(inner.0);
        inner
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    fn walk_block(&mut self, block: &Block, depth: Depth) {
        for stmt in &block.statements {
            self.walk_stmt(stmt, depth);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt, depth: Depth) {
        match stmt {
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.bump(1, 1 + depth.0);
                let inner = self.enter(depth);
                self.walk_expr(condition, inner);
                self.walk_stmt(then_branch, inner);
                if let Some(else_branch) = else_branch {
                    self.walk_stmt(else_branch, inner);
                }
            }
            Stmt::While { condition, body } => {
                self.bump(1, 1 + depth.0);
                let inner = self.enter(depth);
                self.walk_expr(condition, inner);
                self.walk_stmt(body, inner);
            }
            Stmt::For { header, body } => {
                self.bump(1, 1 + depth.0);
                let inner = self.enter(depth);
                for expr in header {
                    self.walk_expr(expr, inner);
                }
                self.walk_stmt(body, inner);
            }
            Stmt::ForEach { iterable, body } => {
                self.bump(1, 1 + depth.0);
                let inner = self.enter(depth);
                self.walk_expr(iterable, inner);
                self.walk_stmt(body, inner);
            }
            Stmt::Switch { selector, cases } => {
                let case_count = cases.len() as u32;
                self.bump(case_count, case_count + depth.0);
                let inner = self.enter(depth);
                self.walk_expr(selector, inner);
                self.walk_cases(cases, inner);
            }
            // do-while is not a branching construct here
            Stmt::DoWhile { body, condition } => {
                self.walk_stmt(body, depth);
                self.walk_expr(condition, depth);
            }
            Stmt::Try {
                resources,
                body,
                catches,
                finally,
            } => {
                for expr in resources {
                    self.walk_expr(expr, depth);
                }
                self.walk_block(body, depth);
                for catch in catches {
                    self.bump(1, 1);
                    self.walk_block(&catch.body, depth);
                }
                if let Some(finally) = finally {
                    self.walk_block(finally, depth);
                }
            }
            Stmt::Throw(expr) => self.walk_expr(expr, depth),
            Stmt::Block(block) => self.walk_block(block, depth),
            Stmt::Synchronized { lock, body } => {
                self.walk_expr(lock, depth);
                self.walk_block(body, depth);
            }
            Stmt::Simple(exprs) => {
                for expr in exprs {
                    self.walk_expr(expr, depth);
                }
            }
        }
    }

    fn walk_cases(&mut self, cases: &[SwitchCase], depth: Depth) {
        for case in cases {
            for stmt in &case.body {
                self.walk_stmt(stmt, depth);
            }
        }
    }

    fn walk_expr(&mut self, expr: &Expr, depth: Depth) {
        match expr {
            Expr::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.bump(1, 1);
                self.walk_expr(condition, depth);
                self.walk_expr(when_true, depth);
                self.walk_expr(when_false, depth);
            }
            Expr::Lambda(body) => self.walk_stmt(body, depth),
            // Switch expressions are values, not branches
            Expr::Switch { selector, cases } => {
                self.walk_expr(selector, depth);
                self.walk_cases(cases, depth);
            }
            Expr::Compound(parts) => {
                for part in parts {
                    self.walk_expr(part, depth);
                }
            }
            Expr::Atom => {}
        }
    }
}
