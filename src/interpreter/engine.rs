//! Tree-walking evaluator
//!
//! [`evaluate`] reduces an [`Expr`] to an `i64`. It is pure: no state is kept
//! between calls and the tree is only read. Operands are evaluated left before
//! right, so when both sides would fail the left-hand error is reported.

use crate::interpreter::errors::EvalError;
use crate::interpreter::ops::apply_binary;
use crate::parser::ast::Expr;

/// Evaluate an expression tree.
pub fn evaluate(expr: &Expr) -> Result<i64, EvalError> {
    match expr {
        Expr::Integer(value) => Ok(*value),
        Expr::BinaryOp { op, left, right } => {
            let left_val = evaluate(left)?;
            let right_val = evaluate(right)?;
            apply_binary(*op, left_val, right_val)
        }
        Expr::Grouped(inner) => evaluate(inner),
    }
}
