// AST (Abstract Syntax Tree) definitions for arithmetic expressions

use std::fmt;

/// Source location information for error reporting
///
/// `offset` is the 0-based character index into the input; `line` and
/// `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The source symbol for this operator.
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }

    /// Operator name as shown in tree outlines.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Sub => "Sub",
            BinOp::Mul => "Mul",
            BinOp::Div => "Div",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree produced by the parser.
///
/// Every subtree is owned by exactly one parent. Nodes carry no source
/// locations, so two inputs that differ only in whitespace produce equal trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal
    Integer(i64),

    /// Binary operation, left-associative within a precedence level
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Explicit parentheses written in the source
    Grouped(Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn grouped(inner: Expr) -> Self {
        Expr::Grouped(Box::new(inner))
    }

    /// Number of nodes in the tree, `Grouped` wrappers included.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Integer(_) => 1,
            Expr::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Expr::Grouped(inner) => 1 + inner.node_count(),
        }
    }

    /// Height of the tree; a lone literal has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Integer(_) => 1,
            Expr::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            Expr::Grouped(inner) => 1 + inner.depth(),
        }
    }
}

/// Re-serializes the tree.
///
/// Operands are separated from operators by single spaces, and parentheses
/// appear only where the source wrote them (`Grouped`). Precedence is never
/// used to insert extra grouping.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(value) => write!(f, "{}", value),
            Expr::BinaryOp { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Grouped(inner) => write!(f, "({})", inner),
        }
    }
}
