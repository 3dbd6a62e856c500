//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! error types, the character cursor, and the top-level entry point.
//!
//! # Parser Architecture
//!
//! There is no separate tokenizer. The parser walks the input one character at
//! a time and skips whitespace in front of every token it tries to match.
//! - This module: Parser struct, cursor helpers, and error reporting
//! - `expressions`: the grammar itself (expression, term, factor, integer)
//!
//! # Implementation
//!
//! Grammar methods live in `expressions` as a second `impl Parser` block, so
//! they share the cursor state defined here.

use crate::parser::ast::{Expr, SourceLocation};
use std::fmt;

/// Deepest tree the parser will build.
///
/// Printing, evaluating and dropping a tree all recurse once per level, so
/// the limit keeps them within the stack of a default thread. A flat chain of
/// `n` operands is `n` levels deep.
pub const MAX_TREE_DEPTH: usize = 1000;

/// Deepest parenthesis nesting the parser will descend into.
///
/// Each open parenthesis costs several parser frames, so nesting is bounded
/// more tightly than tree depth.
pub const MAX_PAREN_NESTING: usize = 256;

/// What the parser was looking for when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// One or more decimal digits (also reported when neither a number nor
    /// an opening parenthesis can start a factor)
    IntegerNumber,
    /// A specific punctuation character, e.g. `')'`
    Char(char),
    /// Nothing but whitespace may follow a complete expression
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::IntegerNumber => write!(f, "integer number"),
            Expected::Char(c) => write!(f, "'{}'", c),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Why a parse failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The character at the failure position does not fit the grammar.
    /// `found` is `None` at end of input.
    Unexpected {
        expected: Expected,
        found: Option<char>,
    },

    /// A digit sequence whose value does not fit in an `i64`
    LiteralOutOfRange { literal: String },

    /// The expression nests deeper than `limit` levels. Reported for a long
    /// operator chain (past [`MAX_TREE_DEPTH`]) and for deep parentheses
    /// (past [`MAX_PAREN_NESTING`]).
    TooDeep { limit: usize },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    /// The expected item, for errors caused by an unexpected character.
    pub fn expected(&self) -> Option<Expected> {
        match &self.kind {
            ParseErrorKind::Unexpected { expected, .. } => Some(*expected),
            ParseErrorKind::LiteralOutOfRange { .. } | ParseErrorKind::TooDeep { .. } => None,
        }
    }

    /// Render the offending source line with a caret under the failure column.
    ///
    /// ```text
    /// 1 + * 2
    ///     ^
    /// ```
    pub fn annotate(&self, source: &str) -> String {
        let line = source
            .split('\n')
            .nth(self.location.line.saturating_sub(1))
            .unwrap_or("")
            .trim_end_matches('\r');
        let width = match &self.kind {
            ParseErrorKind::LiteralOutOfRange { literal } => literal.chars().count().max(1),
            ParseErrorKind::Unexpected { .. } | ParseErrorKind::TooDeep { .. } => 1,
        };
        format!(
            "{}\n{}{}",
            line,
            " ".repeat(self.location.column.saturating_sub(1)),
            "^".repeat(width)
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.line > 1 {
            write!(
                f,
                "Parse error at line {}, column {}: ",
                self.location.line, self.location.column
            )?;
        } else {
            write!(f, "Parse error at column {}: ", self.location.column)?;
        }

        match &self.kind {
            ParseErrorKind::Unexpected {
                expected,
                found: Some(c),
            } => write!(f, "expected {}, found '{}'", expected, c),
            ParseErrorKind::Unexpected {
                expected,
                found: None,
            } => write!(f, "expected {}, found end of input", expected),
            ParseErrorKind::LiteralOutOfRange { literal } => {
                write!(f, "integer literal {} is out of range", literal)
            }
            ParseErrorKind::TooDeep { limit } => {
                write!(f, "expression nests deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for integer arithmetic
pub struct Parser {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
    /// Parentheses opened and not yet closed
    pub(crate) open_parens: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            open_parens: 0,
        }
    }

    /// Parse the entire input as one expression.
    ///
    /// Only whitespace may follow the expression; anything else is reported
    /// as expecting end of input.
    pub fn parse_input(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;

        self.skip_whitespace();
        if !self.is_at_end() {
            return Err(self.error_here(Expected::EndOfInput));
        }

        Ok(expr)
    }

    // ===== Helper methods =====

    /// Skip whitespace, then consume `expected` if it is the next character.
    pub(crate) fn match_char(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace, then report whether the next character is a digit.
    pub(crate) fn check_digit(&mut self) -> bool {
        self.skip_whitespace();
        self.peek().is_some_and(|c| c.is_ascii_digit())
    }

    pub(crate) fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        if self.match_char(expected) {
            Ok(())
        } else {
            Err(self.error_here(Expected::Char(expected)))
        }
    }

    /// Build an error for the character under the cursor.
    pub(crate) fn error_here(&self, expected: Expected) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Unexpected {
                expected,
                found: self.peek(),
            },
            location: self.current_location(),
        }
    }

    /// Depth of a node whose deepest child is `child_depth` levels deep.
    pub(crate) fn nest(
        &self,
        child_depth: usize,
        location: SourceLocation,
    ) -> Result<usize, ParseError> {
        let depth = child_depth + 1;
        if depth > MAX_TREE_DEPTH {
            return Err(ParseError {
                kind: ParseErrorKind::TooDeep {
                    limit: MAX_TREE_DEPTH,
                },
                location,
            });
        }
        Ok(depth)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::BinOp;

    #[test]
    fn test_parse_single_integer() {
        let mut parser = Parser::new("42");
        assert_eq!(parser.parse_input().unwrap(), Expr::Integer(42));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut parser = Parser::new("   7  ");
        assert_eq!(parser.parse_input().unwrap(), Expr::Integer(7));
    }

    #[test]
    fn test_parse_expression() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.parse_input().unwrap();

        match expr {
            Expr::BinaryOp {
                op: BinOp::Add,
                left,
                right,
            } => {
                assert_eq!(*left, Expr::Integer(1));
                assert!(matches!(*right, Expr::BinaryOp { op: BinOp::Mul, .. }));
            }
            other => panic!("Expected addition at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_garbage_expects_end_of_input() {
        let mut parser = Parser::new("1 2");
        let err = parser.parse_input().unwrap_err();

        assert_eq!(err.expected(), Some(Expected::EndOfInput));
        assert_eq!(err.location.offset, 2);
        assert_eq!(
            err.to_string(),
            "Parse error at column 3: expected end of input, found '2'"
        );
    }

    #[test]
    fn test_unmatched_close_paren() {
        let mut parser = Parser::new("1)");
        let err = parser.parse_input().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::Unexpected {
                expected: Expected::EndOfInput,
                found: Some(')'),
            }
        );
    }

    #[test]
    fn test_error_on_later_line_reports_line() {
        let mut parser = Parser::new("1 +\n  *");
        let err = parser.parse_input().unwrap_err();

        assert_eq!(err.location.line, 2);
        assert_eq!(err.location.column, 3);
        assert_eq!(
            err.to_string(),
            "Parse error at line 2, column 3: expected integer number, found '*'"
        );
    }

    #[test]
    fn test_annotate_points_at_failure() {
        let source = "1 + * 2";
        let err = Parser::new(source).parse_input().unwrap_err();

        assert_eq!(err.annotate(source), "1 + * 2\n    ^");
    }

    #[test]
    fn test_annotate_underlines_whole_literal() {
        let source = "1 + 99999999999999999999";
        let err = Parser::new(source).parse_input().unwrap_err();

        assert_eq!(
            err.annotate(source),
            "1 + 99999999999999999999\n    ^^^^^^^^^^^^^^^^^^^^"
        );
    }
}
