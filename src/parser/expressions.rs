//! Expression parsing implementation
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term ( ('+' | '-') term )*
//! term       := factor ( ('*' | '/') factor )*
//! factor     := integer | '(' expression ')'
//! integer    := digit+
//! ```
//!
//! Each binary level parses one operand, then folds further operands into
//! the accumulated left-hand side, which makes every level left-associative.
//! Recursion only happens through a parenthesized factor, after the `(` has
//! been consumed.
//!
//! Every level also reports the depth of the tree it built. A fold that would
//! go past [`MAX_TREE_DEPTH`](crate::parser::parse::MAX_TREE_DEPTH) or a `(`
//! past [`MAX_PAREN_NESTING`] fails with
//! [`ParseErrorKind::TooDeep`], so no later walk over the tree can exhaust
//! the stack.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{BinOp, Expr};
use crate::parser::parse::{Expected, ParseError, ParseErrorKind, Parser, MAX_PAREN_NESTING};

/// A parsed subtree and its depth
type Parsed = (Expr, usize);

impl Parser {
    /// Parse additive expression (`+`, `-`)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_sum().map(|(expr, _)| expr)
    }

    fn parse_sum(&mut self) -> Result<Parsed, ParseError> {
        let (mut left, mut depth) = self.parse_term()?;

        loop {
            self.skip_whitespace();
            let loc = self.current_location();
            let op = if self.match_char('+') {
                BinOp::Add
            } else if self.match_char('-') {
                BinOp::Sub
            } else {
                break;
            };

            let (right, right_depth) = self.parse_term()?;
            depth = self.nest(depth.max(right_depth), loc)?;
            left = Expr::binary(op, left, right);
        }

        Ok((left, depth))
    }

    /// Parse multiplicative expression (`*`, `/`)
    fn parse_term(&mut self) -> Result<Parsed, ParseError> {
        let (mut left, mut depth) = self.parse_factor()?;

        loop {
            self.skip_whitespace();
            let loc = self.current_location();
            let op = if self.match_char('*') {
                BinOp::Mul
            } else if self.match_char('/') {
                BinOp::Div
            } else {
                break;
            };

            let (right, right_depth) = self.parse_factor()?;
            depth = self.nest(depth.max(right_depth), loc)?;
            left = Expr::binary(op, left, right);
        }

        Ok((left, depth))
    }

    /// Parse an integer literal or a parenthesized expression.
    ///
    /// When neither alternative can start here the error expects an integer
    /// number at the current position.
    fn parse_factor(&mut self) -> Result<Parsed, ParseError> {
        if self.check_digit() {
            return Ok((self.parse_integer()?, 1));
        }

        let open = self.current_location();
        if self.match_char('(') {
            if self.open_parens >= MAX_PAREN_NESTING {
                return Err(ParseError {
                    kind: ParseErrorKind::TooDeep {
                        limit: MAX_PAREN_NESTING,
                    },
                    location: open,
                });
            }

            self.open_parens += 1;
            let (inner, depth) = self.parse_sum()?;
            self.expect_char(')')?;
            self.open_parens -= 1;

            let depth = self.nest(depth, open)?;
            return Ok((Expr::grouped(inner), depth));
        }

        Err(self.error_here(Expected::IntegerNumber))
    }

    /// Parse one or more decimal digits into an `i64`.
    pub(crate) fn parse_integer(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        let loc = self.current_location();

        let mut literal = String::new();
        let mut value: Option<i64> = Some(0);

        while let Some(ch) = self.peek().filter(|c| c.is_ascii_digit()) {
            self.advance();
            literal.push(ch);

            let digit = ch as u32 - '0' as u32;
            value = value
                .and_then(|acc| acc.checked_mul(10))
                .and_then(|acc| acc.checked_add(i64::from(digit)));
        }

        if literal.is_empty() {
            return Err(self.error_here(Expected::IntegerNumber));
        }

        match value {
            Some(n) => Ok(Expr::Integer(n)),
            None => Err(ParseError {
                kind: ParseErrorKind::LiteralOutOfRange { literal },
                location: loc,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{BinOp, Expr};
    use crate::parser::parse::{
        Expected, ParseErrorKind, Parser, MAX_PAREN_NESTING, MAX_TREE_DEPTH,
    };

    fn parse(source: &str) -> Expr {
        Parser::new(source).parse_input().unwrap()
    }

    fn int(n: i64) -> Expr {
        Expr::Integer(n)
    }

    #[test]
    fn test_digits_parse_to_decimal_value() {
        for (source, value) in [("0", 0), ("7", 7), ("007", 7), ("1234567890", 1234567890)] {
            assert_eq!(parse(source), int(value), "source: {}", source);
        }
    }

    #[test]
    fn test_largest_literal() {
        assert_eq!(parse("9223372036854775807"), int(i64::MAX));
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = Parser::new("9223372036854775808").parse_input().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::LiteralOutOfRange {
                literal: "9223372036854775808".to_string()
            }
        );
        assert_eq!(err.location.offset, 0);
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expected = Expr::binary(
            BinOp::Sub,
            Expr::binary(BinOp::Sub, int(1), int(2)),
            int(3),
        );
        assert_eq!(parse("1-2-3"), expected);
    }

    #[test]
    fn test_division_is_left_associative() {
        let expected = Expr::binary(
            BinOp::Div,
            Expr::binary(BinOp::Div, int(8), int(4)),
            int(2),
        );
        assert_eq!(parse("8/4/2"), expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expected = Expr::binary(
            BinOp::Add,
            int(1),
            Expr::binary(BinOp::Mul, int(2), int(3)),
        );
        assert_eq!(parse("1+2*3"), expected);
    }

    #[test]
    fn test_parentheses_produce_grouped_node() {
        let expected = Expr::binary(
            BinOp::Mul,
            Expr::grouped(Expr::binary(BinOp::Add, int(1), int(2))),
            int(3),
        );
        assert_eq!(parse("(1+2)*3"), expected);
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(
            parse("((4))"),
            Expr::grouped(Expr::grouped(int(4)))
        );
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert_eq!(parse("1 + 2"), parse("1+2"));
        assert_eq!(parse(" ( 1 +2 ) *  3 "), parse("(1+2)*3"));
        assert_eq!(parse("\t4\t/\t2"), parse("4/2"));
    }

    #[test]
    fn test_missing_right_operand() {
        let err = Parser::new("1+").parse_input().unwrap_err();

        assert_eq!(err.expected(), Some(Expected::IntegerNumber));
        assert_eq!(err.location.offset, 2);
        assert_eq!(
            err.to_string(),
            "Parse error at column 3: expected integer number, found end of input"
        );
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = Parser::new("(1+2").parse_input().unwrap_err();

        assert_eq!(err.expected(), Some(Expected::Char(')')));
        assert_eq!(err.location.offset, 4);
    }

    #[test]
    fn test_empty_input() {
        let err = Parser::new("").parse_input().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::Unexpected {
                expected: Expected::IntegerNumber,
                found: None,
            }
        );
    }

    #[test]
    fn test_unary_minus_is_rejected() {
        let err = Parser::new("-1").parse_input().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::Unexpected {
                expected: Expected::IntegerNumber,
                found: Some('-'),
            }
        );
    }

    #[test]
    fn test_empty_parentheses() {
        let err = Parser::new("()").parse_input().unwrap_err();

        assert_eq!(err.expected(), Some(Expected::IntegerNumber));
        assert_eq!(err.location.offset, 1);
    }

    #[test]
    fn test_identifier_is_rejected() {
        let err = Parser::new("2 * x").parse_input().unwrap_err();

        assert_eq!(err.location.column, 5);
        assert_eq!(err.expected(), Some(Expected::IntegerNumber));
    }

    fn chain(terms: usize, op: &str) -> String {
        vec!["1"; terms].join(op)
    }

    #[test]
    fn test_chain_at_depth_limit() {
        let expr = parse(&chain(MAX_TREE_DEPTH, "+"));

        assert_eq!(expr.depth(), MAX_TREE_DEPTH);
        assert_eq!(expr.node_count(), 2 * MAX_TREE_DEPTH - 1);
    }

    #[test]
    fn test_chain_past_depth_limit() {
        let err = Parser::new(&chain(MAX_TREE_DEPTH + 1, "*"))
            .parse_input()
            .unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::TooDeep {
                limit: MAX_TREE_DEPTH
            }
        );
        // The operator that would add the extra level
        assert_eq!(err.location.offset, 2 * MAX_TREE_DEPTH - 1);
        assert_eq!(err.expected(), None);
    }

    #[test]
    fn test_depth_counts_both_levels() {
        // Same number of terms as the chain at the limit, but each operand is
        // a product one level deeper than a literal
        let source = chain(MAX_TREE_DEPTH, "+").replace('1', "2*3");
        let err = Parser::new(&source).parse_input().unwrap_err();

        assert!(matches!(err.kind, ParseErrorKind::TooDeep { .. }));
    }

    #[test]
    fn test_paren_nesting_limit() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));

        assert_eq!(parse(&nested(MAX_PAREN_NESTING)).depth(), MAX_PAREN_NESTING + 1);

        let err = Parser::new(&nested(MAX_PAREN_NESTING + 1))
            .parse_input()
            .unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::TooDeep {
                limit: MAX_PAREN_NESTING
            }
        );
        assert_eq!(err.location.offset, MAX_PAREN_NESTING);
    }
}
