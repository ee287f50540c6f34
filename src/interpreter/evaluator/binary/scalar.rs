use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    util::num::promote_i64,
};

impl Evaluator<'_> {
    /// Evaluates an arithmetic operation.
    ///
    /// Two integers stay integers and every step is overflow checked. An
    /// integer meeting a real is promoted to real first. `+` also joins two
    /// strings or two arrays. Division by zero is checked explicitly for both
    /// numeric kinds.
    ///
    /// - `/` on integers yields an integer when the division is exact and a
    ///   real otherwise.
    /// - `%` is a floored modulo: the result takes the sign of the divisor.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div` or `Mod`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed value.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let half = Evaluator::eval_scalar_op(BinaryOperator::Div,
    ///                                      &Value::Integer(7),
    ///                                      &Value::Integer(2)).unwrap();
    /// assert_eq!(half, Value::Real(3.5));
    ///
    /// let exact = Evaluator::eval_scalar_op(BinaryOperator::Div,
    ///                                       &Value::Integer(8),
    ///                                       &Value::Integer(2)).unwrap();
    /// assert_eq!(exact, Value::Integer(4));
    ///
    /// let wrapped = Evaluator::eval_scalar_op(BinaryOperator::Mod,
    ///                                         &Value::Integer(-1),
    ///                                         &Value::Integer(3)).unwrap();
    /// assert_eq!(wrapped, Value::Integer(2));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use Value::{Array, Integer, Real, Str};

        match (left, right) {
            (Integer(a), Integer(b)) => Self::eval_integer_op(op, *a, *b),
            (Integer(_) | Real(_), Integer(_) | Real(_)) => {
                let a = as_real(left)?;
                let b = as_real(right)?;
                Self::eval_real_op(op, a, b)
            },
            (Str(a), Str(b)) if op == BinaryOperator::Add => Ok(Str(format!("{a}{b}"))),
            (Array(a), Array(b)) if op == BinaryOperator::Add => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(Array(Rc::new(joined)))
            },
            _ => Err(EvalError::TypeError { details: format!("unsupported operands for '{op}': \
                                                              {} and {}",
                                                             left.type_name(),
                                                             right.type_name()) }),
        }
    }

    fn eval_integer_op(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        let result = match op {
            Add => a.checked_add(b),
            Sub => a.checked_sub(b),
            Mul => a.checked_mul(b),
            Div => {
                if b == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                if a.checked_rem(b).ok_or(EvalError::Overflow)? != 0 {
                    return Ok(Value::Real(promote_i64(a)? / promote_i64(b)?));
                }
                a.checked_div(b)
            },
            Mod => {
                if b == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                a.checked_rem(b).map(|r| if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
            },
            _ => return Err(EvalError::TypeError { details: format!("'{op}' is not arithmetic") }),
        };

        result.map(Value::Integer).ok_or(EvalError::Overflow)
    }

    fn eval_real_op(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        Ok(Value::Real(match op {
                           Add => a + b,
                           Sub => a - b,
                           Mul => a * b,
                           Div => {
                               if b == 0.0 {
                                   return Err(EvalError::DivisionByZero);
                               }
                               a / b
                           },
                           Mod => {
                               if b == 0.0 {
                                   return Err(EvalError::DivisionByZero);
                               }
                               let r = a % b;
                               if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
                           },
                           _ => {
                               return Err(EvalError::TypeError { details: format!("'{op}' is not \
                                                                                   arithmetic") });
                           },
                       }))
    }
}

/// Reads a numeric value as `f64`, promoting integers.
pub(crate) fn as_real(value: &Value) -> EvalResult<f64> {
    match value {
        Value::Integer(n) => promote_i64(*n),
        Value::Real(r) => Ok(*r),
        other => Err(EvalError::TypeError { details: format!("expected a number, found {}",
                                                             other.type_name()) }),
    }
}
