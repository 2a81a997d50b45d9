//! Parsed source unit model
//!
//! A `SourceUnit` is the structured view of one Java file that every walker
//! consumes. It is produced by a [`crate::parser::SourceProvider`] and never
//! mutated afterwards. The statement tree keeps only what the walkers look
//! at: branching constructs, exception constructs, and the nested blocks and
//! expressions that can contain them.

use serde::{Deserialize, Serialize};

/// One parsed source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Declared package, if any
    pub package: Option<String>,
    /// Class and interface declarations in pre-order; the first is primary
    pub types: Vec<TypeDecl>,
    /// Every method declaration in the file, nested classes included
    pub methods: Vec<MethodDecl>,
    /// Code outside any method: constructor bodies, initializer blocks,
    /// field initializers
    pub other_code: Vec<Stmt>,
    /// Import names as written (`com.acme.Foo`, `com.acme` for wildcards)
    pub imports: Vec<String>,
    /// Number of lines in the file text
    pub line_count: usize,
}

impl SourceUnit {
    /// The primary class or interface, if the unit has one
    pub fn primary_type(&self) -> Option<&TypeDecl> {
        self.types.first()
    }

    /// Package name, or `"default"` for the unnamed package
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("default")
    }
}

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

/// A class or interface declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    /// Annotation names as written, without the `@`
    pub annotations: Vec<String>,
    pub span: LineSpan,
}

/// Inclusive, 1-based line range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered (`end - start + 1`)
    pub fn line_count(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<String>,
    /// Exception types listed in the `throws` clause
    pub throws: Vec<String>,
    pub annotations: Vec<String>,
    /// `None` for abstract and interface methods
    pub body: Option<MethodBody>,
    /// Span of the whole declaration, modifiers and annotations included
    pub span: LineSpan,
}

/// Body of a method: its source text and its statement tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodBody {
    /// Source text of the brace-delimited block
    pub text: String,
    pub block: Block,
}

/// A sequence of statements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    For {
        /// Init, condition and update expressions
        header: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        iterable: Expr,
        body: Box<Stmt>,
    },
    /// Statement switch; one case per label, `default` included
    Switch {
        selector: Expr,
        cases: Vec<SwitchCase>,
    },
    Try {
        resources: Vec<Expr>,
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Throw(Expr),
    Block(Block),
    Synchronized {
        lock: Expr,
        body: Block,
    },
    /// Expression statements, returns, local declarations and the like
    Simple(Vec<Expr>),
}

/// One case label of a switch and the statements attached to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Label text, e.g. `case 1` or `default`
    pub label: String,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    /// Caught exception types
    pub types: Vec<String>,
    pub body: Block,
}

/// Expression node, reduced to the parts walkers care about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// `a ? b : c`
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Lambda(Box<Stmt>),
    /// Switch used as a value
    Switch {
        selector: Box<Expr>,
        cases: Vec<SwitchCase>,
    },
    /// Any other expression holding interesting sub-expressions
    Compound(Vec<Expr>),
    /// Leaf with nothing of interest inside
    Atom,
}

impl Expr {
    /// Collapse a list of sub-expressions, dropping atoms
    pub fn compound(parts: Vec<Expr>) -> Self {
        let mut parts: Vec<Expr> = parts.into_iter().filter(|e| *e != Expr::Atom).collect();
        match parts.len() {
            0 => Expr::Atom,
            1 => parts.remove(0),
            _ => Expr::Compound(parts),
        }
    }
}
