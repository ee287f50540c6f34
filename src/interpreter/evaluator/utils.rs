use crate::{
    ast::{Expr, LiteralValue},
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
    util::num::resolve_index,
};

impl Evaluator<'_> {
    /// Evaluates a literal expression.
    ///
    /// Converts the literal value directly into a `Value` and returns it.
    /// Literals never produce errors.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     ast::LiteralValue,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// assert_eq!(Evaluator::eval_literal(&LiteralValue::from("a")),
    ///            Value::Str("a".to_string()));
    /// ```
    #[must_use]
    pub fn eval_literal(value: &LiteralValue) -> Value {
        match value {
            LiteralValue::Integer(n) => Value::Integer(*n),
            LiteralValue::Real(r) => Value::Real(*r),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Str(s) => Value::Str(s.clone()),
        }
    }

    /// Evaluates every element of an array literal, in order.
    ///
    /// Elements keep any cells they evaluate to.
    pub(crate) fn eval_array_literal(&self, elements: &[Expr]) -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|e| self.eval(e))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(values))
    }

    /// Evaluates `target[index]`.
    ///
    /// - arrays and strings take an integer index, negative values counting
    ///   from the end; indexing a string yields a one-character string,
    /// - maps take a string key.
    ///
    /// # Errors
    /// - `EvalError::IndexOutOfBounds` for an index outside the value.
    /// - `EvalError::MissingKey` for a key the map does not hold.
    /// - `EvalError::TypeError` for any other combination.
    pub(crate) fn eval_index(&self, target: &Expr, index: &Expr) -> EvalResult<Value> {
        let target = self.eval(target)?.deref_cells()?;
        let index = self.eval(index)?.deref_cells()?;

        match (&target, &index) {
            (Value::Array(items), Value::Integer(i)) => {
                Ok(items[resolve_index(*i, items.len())?].clone())
            },
            (Value::Str(s), Value::Integer(i)) => {
                let chars: Vec<char> = s.chars().collect();
                Ok(Value::Str(chars[resolve_index(*i, chars.len())?].to_string()))
            },
            (Value::Map(entries), Value::Str(key)) => {
                entries.get(key)
                       .cloned()
                       .ok_or_else(|| EvalError::MissingKey { key: key.clone() })
            },
            _ => Err(EvalError::TypeError { details: format!("cannot index {} with {}",
                                                             target.type_name(),
                                                             index.type_name()) }),
        }
    }
}
