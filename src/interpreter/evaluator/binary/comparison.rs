use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::{
        evaluator::{
            binary::scalar::as_real,
            core::{EvalResult, Evaluator},
        },
        value::core::Value,
    },
};

/// Maps an equality-style operator and a boolean equality result
/// to the final boolean value.
///
/// This function does not perform any comparison itself.
#[must_use]
pub const fn equality_op_result(op: BinaryOperator, is_equal: bool) -> bool {
    match op {
        BinaryOperator::NotEqual => !is_equal,
        _ => is_equal,
    }
}

impl Evaluator<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// For `Equal` and `NotEqual`, numbers compare by value across integer
    /// and real (`1 == 1.0`), everything else structurally. Values of
    /// different kinds are simply unequal. Relational operators accept two
    /// numbers or two strings.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let a = Value::Integer(3);
    /// let b = Value::Real(5.0);
    ///
    /// let result = Evaluator::eval_comparison(BinaryOperator::Less, &a, &b);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Evaluator::eval_comparison(BinaryOperator::Equal,
    ///                                         &Value::Integer(2),
    ///                                         &Value::Real(2.0));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        if matches!(op, Equal | NotEqual) {
            let is_equal = if left.is_numeric() && right.is_numeric() {
                numeric_ordering(left, right)? == Some(Ordering::Equal)
            } else {
                left == right
            };
            return Ok(Value::Bool(equality_op_result(op, is_equal)));
        }

        let ordering = match (left, right) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ if left.is_numeric() && right.is_numeric() => numeric_ordering(left, right)?,
            _ => {
                return Err(EvalError::TypeError { details: format!("cannot compare {} with {} \
                                                                    using '{op}'",
                                                                   left.type_name(),
                                                                   right.type_name()) });
            },
        };

        // NaN compares false under every ordering operator.
        let Some(ordering) = ordering else {
            return Ok(Value::Bool(false));
        };

        Ok(Value::Bool(match op {
                           Less => ordering == Ordering::Less,
                           Greater => ordering == Ordering::Greater,
                           LessEqual => ordering != Ordering::Greater,
                           GreaterEqual => ordering != Ordering::Less,
                           _ => false,
                       }))
    }
}

fn numeric_ordering(left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
        (Value::Integer(a), Value::Real(b)) => Ok(integer_real_ordering(*a, *b)),
        (Value::Real(a), Value::Integer(b)) => {
            Ok(integer_real_ordering(*b, *a).map(Ordering::reverse))
        },
        _ => Ok(as_real(left)?.partial_cmp(&as_real(right)?)),
    }
}

/// Orders an integer against a real exactly, without rounding the integer
/// to the nearest `f64`. `None` only for NaN.
#[allow(clippy::cast_possible_truncation)]
fn integer_real_ordering(int: i64, real: f64) -> Option<Ordering> {
    // 2^63, exact in f64.
    const BEYOND_I64: f64 = 9_223_372_036_854_775_808.0;

    if real.is_nan() {
        return None;
    }
    if real >= BEYOND_I64 {
        return Some(Ordering::Less);
    }
    if real < -BEYOND_I64 {
        return Some(Ordering::Greater);
    }

    // In range, so the whole part converts to i64 exactly.
    let whole = real.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&real),
        other => Some(other),
    }
}
