use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated and read through any cells; it must then be a
    /// function. Arguments are evaluated left to right and passed with their
    /// cells already read, so host functions only ever see plain values.
    ///
    /// # Errors
    /// - `EvalError::NotCallable` if the callee is not a function.
    /// - Any error raised by an argument or by the function itself.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     context::DynamicContext,
    ///     interpreter::{
    ///         evaluator::core::Evaluator,
    ///         parser::core::parse,
    ///         value::{
    ///             core::{Bindings, Value},
    ///             function::Function,
    ///         },
    ///     },
    /// };
    ///
    /// let scale = DynamicContext::new(Function::unary(|v| match v {
    ///                                     Value::Integer(n) => Ok(Value::Integer(n * 2)),
    ///                                     _ => Ok(Value::Integer(0)),
    ///                                 }));
    ///
    /// let mut bindings = Bindings::new();
    /// bindings.insert("x".to_string(), Value::Integer(10));
    /// bindings.insert("y".to_string(), Value::Cell(scale));
    ///
    /// let expr = parse("y(x)").unwrap();
    /// assert_eq!(Evaluator::new(&bindings).eval(&expr).unwrap(), Value::Integer(20));
    /// ```
    pub fn eval_call(&self, callee: &Expr, arguments: &[Expr]) -> EvalResult<Value> {
        let callee = self.eval(callee)?.deref_cells()?;
        let Value::Function(function) = callee else {
            return Err(EvalError::NotCallable { found: callee.type_name() });
        };

        let args = arguments.iter()
                            .map(|a| self.eval(a)?.deref_cells())
                            .collect::<EvalResult<Vec<_>>>()?;
        function.call(&args)
    }
}
