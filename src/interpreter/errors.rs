//! Evaluation error types
//!
//! This module defines [`EvalError`], which covers every way a well-formed
//! expression tree can fail to produce a value (as opposed to parse errors).
//!
//! All evaluation errors are fatal for the request that raised them; the
//! evaluator never substitutes a value.

use crate::parser::ast::BinOp;
use std::fmt;

/// Errors that can occur while evaluating an expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Right operand of `/` evaluated to zero
    DivisionByZero { operation: String },

    /// Result does not fit in an `i64` (including `i64::MIN / -1`)
    IntegerOverflow { operation: String },
}

impl EvalError {
    pub(crate) fn division_by_zero(left: i64, right: i64) -> Self {
        EvalError::DivisionByZero {
            operation: describe(BinOp::Div, left, right),
        }
    }

    pub(crate) fn overflow(op: BinOp, left: i64, right: i64) -> Self {
        EvalError::IntegerOverflow {
            operation: describe(op, left, right),
        }
    }

    /// The failing operation, written with its evaluated operands.
    pub fn operation(&self) -> &str {
        match self {
            EvalError::DivisionByZero { operation } => operation,
            EvalError::IntegerOverflow { operation } => operation,
        }
    }
}

fn describe(op: BinOp, left: i64, right: i64) -> String {
    format!("{} {} {}", left, op, right)
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivisionByZero { operation } => {
                write!(f, "Division by zero: {}", operation)
            }
            EvalError::IntegerOverflow { operation } => {
                write!(f, "Integer overflow in operation: {}", operation)
            }
        }
    }
}

impl std::error::Error for EvalError {}
