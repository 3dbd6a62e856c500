//! Integer arithmetic parser
//!
//! This module transforms expression text into an [`ast::Expr`] tree:
//! - [`mod@parse`]: the [`Parser`] cursor, error types, and top-level entry point
//! - [`expressions`]: the grammar (expression, term, factor, integer)
//! - [`ast`]: tree definitions and the printer (`Display`)
//!
//! # Supported Syntax
//!
//! - Non-negative integer literals (base 10)
//! - Binary `+ - * /`, with `*` and `/` binding tighter, all left-associative
//! - Parentheses, kept in the tree as [`ast::Expr::Grouped`]
//! - Whitespace anywhere between tokens
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent over characters with one loop per precedence
//! level. No tokenizer and no parser generator.

pub mod ast;
pub mod expressions;
pub mod parse;

pub use ast::{BinOp, Expr, SourceLocation};
pub use parse::{
    Expected, ParseError, ParseErrorKind, Parser, MAX_PAREN_NESTING, MAX_TREE_DEPTH,
};

/// Parse `source` as a single expression.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source).parse_input()
}
