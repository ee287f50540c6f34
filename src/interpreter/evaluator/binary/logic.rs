use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a logical operation on boolean operands.
    ///
    /// The left operand is evaluated first. `and` skips the right operand
    /// when the left is `false`, `or` when it is `true`. Both operands must
    /// be booleans; there is no truthiness.
    ///
    /// # Example
    /// ```
    /// use startrace::interpreter::{
    ///     evaluator::core::Evaluator,
    ///     parser::core::parse,
    ///     value::core::{Bindings, Value},
    /// };
    ///
    /// let bindings = Bindings::new();
    /// let evaluator = Evaluator::new(&bindings);
    ///
    /// // `missing` is never looked up.
    /// let expr = parse("false and missing").unwrap();
    /// assert_eq!(evaluator.eval(&expr).unwrap(), Value::Bool(false));
    ///
    /// let expr = parse("1 < 2 || missing").unwrap();
    /// assert_eq!(evaluator.eval(&expr).unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_logic(&self, op: BinaryOperator, left: &Expr, right: &Expr) -> EvalResult<Value> {
        let left = self.eval(left)?.deref_cells()?.as_bool()?;

        match (op, left) {
            (BinaryOperator::And, false) => Ok(Value::Bool(false)),
            (BinaryOperator::Or, true) => Ok(Value::Bool(true)),
            _ => Ok(Value::Bool(self.eval(right)?.deref_cells()?.as_bool()?)),
        }
    }
}
