use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates both operands of a binary node and applies the operator.
    ///
    /// `and` / `or` are handed to [`Evaluator::eval_logic`] unevaluated so the
    /// right operand is only evaluated when needed. Cells in the operands are
    /// read through before the operator is applied.
    pub(crate) fn eval_binary_op(&self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr)
                                 -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right);
        }

        let left = self.eval(left)?.deref_cells()?;
        let right = self.eval(right)?.deref_cells()?;
        Self::eval_binary(op, &left, &right)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators are handled by `eval_scalar_op`, equality and
    /// ordering by `eval_comparison`. The logical operators are not accepted
    /// here because they short-circuit on unevaluated operands.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_binary(BinaryOperator::Add,
    ///                                     &Value::Integer(3),
    ///                                     &Value::Integer(4));
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_scalar_op(op, left, right),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Ok(Value::Bool(match op {
                                           And => left.as_bool()? && right.as_bool()?,
                                           _ => left.as_bool()? || right.as_bool()?,
                                       })),
        }
    }
}
