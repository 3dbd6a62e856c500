use crate::interpreter::errors::EvalError;
use crate::parser::ast::BinOp;

/// Apply `op` to two evaluated operands.
///
/// Every operation is checked: overflow becomes [`EvalError::IntegerOverflow`]
/// instead of a debug-build panic or a silent wrap.
#[inline]
pub(crate) fn apply_binary(op: BinOp, left: i64, right: i64) -> Result<i64, EvalError> {
    match op {
        BinOp::Add => left
            .checked_add(right)
            .ok_or_else(|| EvalError::overflow(op, left, right)),
        BinOp::Sub => left
            .checked_sub(right)
            .ok_or_else(|| EvalError::overflow(op, left, right)),
        BinOp::Mul => left
            .checked_mul(right)
            .ok_or_else(|| EvalError::overflow(op, left, right)),
        BinOp::Div => checked_div(left, right),
    }
}

/// Truncating division toward zero.
#[inline]
fn checked_div(left: i64, right: i64) -> Result<i64, EvalError> {
    if right == 0 {
        return Err(EvalError::division_by_zero(left, right));
    }

    // Only i64::MIN / -1 can fail once zero is ruled out
    left.checked_div(right)
        .ok_or_else(|| EvalError::overflow(BinOp::Div, left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(apply_binary(BinOp::Div, 5, 2), Ok(2));
        assert_eq!(apply_binary(BinOp::Div, -7, 2), Ok(-3));
        assert_eq!(apply_binary(BinOp::Div, 7, -2), Ok(-3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply_binary(BinOp::Div, 1, 0),
            Err(EvalError::DivisionByZero {
                operation: "1 / 0".to_string()
            })
        );
    }

    #[test]
    fn test_min_divided_by_minus_one_overflows() {
        let err = apply_binary(BinOp::Div, i64::MIN, -1).unwrap_err();
        assert!(matches!(err, EvalError::IntegerOverflow { .. }));
    }

    #[test]
    fn test_add_overflow() {
        let err = apply_binary(BinOp::Add, i64::MAX, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Integer overflow in operation: 9223372036854775807 + 1"
        );
    }

    #[test]
    fn test_sub_and_mul() {
        assert_eq!(apply_binary(BinOp::Sub, 3, 10), Ok(-7));
        assert_eq!(apply_binary(BinOp::Mul, -4, 6), Ok(-24));
        assert!(apply_binary(BinOp::Mul, i64::MAX, 2).is_err());
    }
}
