//! Checked evaluation of parsed rule expressions
//!
//! Walks an [`Expr`] tree with the variable `n` bound to the current
//! sequence value. All arithmetic is checked: overflow, division by zero,
//! and negative exponents surface as [`RuleError`]s instead of panics.

use crate::core::RuleError;
use crate::rule::parser::{BinaryOp, Expr};

/// Evaluate an expression with `n` bound to `value`
pub fn evaluate(expr: &Expr, value: i64) -> Result<i64, RuleError> {
    match expr {
        Expr::Literal(literal) => Ok(*literal),
        Expr::Variable => Ok(value),
        Expr::Ident(name) => Err(RuleError::unknown_variable(name.as_str())),
        Expr::Neg(inner) => {
            let inner = evaluate(inner, value)?;
            inner
                .checked_neg()
                .ok_or(RuleError::overflow("negate", value))
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs = evaluate(lhs, value)?;
            let rhs = evaluate(rhs, value)?;
            apply_binary(*op, lhs, rhs, value)
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: i64, rhs: i64, value: i64) -> Result<i64, RuleError> {
    match op {
        BinaryOp::Add => lhs
            .checked_add(rhs)
            .ok_or(RuleError::overflow("add", value)),
        BinaryOp::Sub => lhs
            .checked_sub(rhs)
            .ok_or(RuleError::overflow("subtract", value)),
        BinaryOp::Mul => lhs
            .checked_mul(rhs)
            .ok_or(RuleError::overflow("multiply", value)),
        BinaryOp::FloorDiv => {
            if rhs == 0 {
                return Err(RuleError::DivisionByZero { value });
            }
            floor_div(lhs, rhs).ok_or(RuleError::overflow("divide", value))
        }
        BinaryOp::Mod => {
            if rhs == 0 {
                return Err(RuleError::DivisionByZero { value });
            }
            floor_mod(lhs, rhs).ok_or(RuleError::overflow("modulo", value))
        }
        BinaryOp::Pow => {
            if rhs < 0 {
                return Err(RuleError::NegativeExponent { exponent: rhs });
            }
            let exponent =
                u32::try_from(rhs).map_err(|_| RuleError::overflow("exponentiate", value))?;
            lhs.checked_pow(exponent)
                .ok_or(RuleError::overflow("exponentiate", value))
        }
    }
}

/// Floor division (quotient rounded toward negative infinity)
///
/// Matches the `//` operator the original rule expressions were written
/// against: `-7 // 2 == -4`, not the `-3` of truncating division.
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Floor modulo (result takes the sign of the divisor)
fn floor_mod(lhs: i64, rhs: i64) -> Option<i64> {
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        remainder.checked_add(rhs)
    } else {
        Some(remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parser::RuleParser;

    fn eval(input: &str, n: i64) -> Result<i64, RuleError> {
        let expr = RuleParser::new().parse_expression(input)?;
        evaluate(&expr, n)
    }

    #[test]
    fn test_eval_canonical_even_rule() {
        assert_eq!(eval("n // 2", 22).unwrap(), 11);
        assert_eq!(eval("n / 2", 22).unwrap(), 11);
    }

    #[test]
    fn test_eval_canonical_odd_rule() {
        assert_eq!(eval("3 * n + 1", 7).unwrap(), 22);
    }

    #[test]
    fn test_eval_floor_division_negative() {
        assert_eq!(eval("n // 2", -7).unwrap(), -4);
        assert_eq!(eval("-7 // 2", 0).unwrap(), -4);
    }

    #[test]
    fn test_eval_floor_modulo() {
        assert_eq!(eval("n % 3", 7).unwrap(), 1);
        assert_eq!(eval("n % 3", -7).unwrap(), 2);
        assert_eq!(eval("n % -3", 7).unwrap(), -2);
    }

    #[test]
    fn test_eval_power() {
        assert_eq!(eval("n ** 3", 2).unwrap(), 8);
        assert_eq!(eval("2 ** 3 ** 2", 0).unwrap(), 512);
    }

    #[test]
    fn test_eval_unary_minus() {
        assert_eq!(eval("-n", 5).unwrap(), -5);
        assert_eq!(eval("-n ** 2", 3).unwrap(), -9);
        assert_eq!(eval("(-n) ** 2", 3).unwrap(), 9);
    }

    #[test]
    fn test_eval_division_by_zero() {
        let err = eval("n // 0", 5).unwrap_err();
        assert_eq!(err, RuleError::DivisionByZero { value: 5 });

        let err = eval("n % (n - n)", 5).unwrap_err();
        assert_eq!(err, RuleError::DivisionByZero { value: 5 });
    }

    #[test]
    fn test_eval_negative_exponent() {
        let err = eval("n ** -1", 5).unwrap_err();
        assert_eq!(err, RuleError::NegativeExponent { exponent: -1 });
    }

    #[test]
    fn test_eval_overflow() {
        let err = eval("n * n", i64::MAX).unwrap_err();
        assert!(matches!(err, RuleError::Overflow { .. }));

        let err = eval("n + 1", i64::MAX).unwrap_err();
        assert!(matches!(err, RuleError::Overflow { .. }));

        let err = eval("n ** 99", 10).unwrap_err();
        assert!(matches!(err, RuleError::Overflow { .. }));
    }

    #[test]
    fn test_eval_min_div_minus_one_does_not_panic() {
        let err = eval("n // -1", i64::MIN).unwrap_err();
        assert!(matches!(err, RuleError::Overflow { .. }));
    }
}
