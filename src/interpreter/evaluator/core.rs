use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::value::core::{Bindings, Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates link expressions against a fixed set of bindings.
///
/// ## Usage
///
/// An `Evaluator` borrows the bindings of one token and is created for a
/// single render. It holds no state of its own: names resolve only against
/// the bindings, and there are no built-in functions. Live values are
/// placed in the bindings as cells, which are read when the expression is
/// evaluated.
pub struct Evaluator<'a> {
    /// The names visible to the expression.
    pub bindings: &'a Bindings,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over `bindings`.
    #[must_use]
    pub const fn new(bindings: &'a Bindings) -> Self {
        Self { bindings }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, unary and binary operations, calls, indexing
    /// and array literals.
    ///
    /// A variable bound to a cell evaluates to the cell itself; operators,
    /// calls and indexing read through it. Rendering the result resolves any
    /// remaining cell.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     interpreter::{
    ///         evaluator::core::Evaluator,
    ///         parser::core::parse,
    ///         value::core::{Bindings, Value},
    ///     },
    /// };
    ///
    /// let mut bindings = Bindings::new();
    /// bindings.insert("x".to_string(), Value::Integer(10));
    ///
    /// let expr = parse("x * 2 + 1").unwrap();
    /// let v = Evaluator::new(&bindings).eval(&expr).unwrap();
    /// assert_eq!(v, Value::Integer(21));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::Variable { name, .. } => self.eval_variable(name),
            Expr::UnaryOp { op, expr, .. } => {
                let value = self.eval(expr)?.deref_cells()?;
                Self::eval_unary(*op, &value)
            },
            Expr::BinaryOp { left, op, right, .. } => self.eval_binary_op(left, *op, right),
            Expr::Call { callee, arguments, .. } => self.eval_call(callee, arguments),
            Expr::Index { target, index, .. } => self.eval_index(target, index),
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements),
        }
    }

    /// Evaluates an expression and renders the result.
    ///
    /// # Errors
    /// Any evaluation error, or `EvalError::Unstringifiable` if the result
    /// has no string form.
    pub fn eval_to_string(&self, expr: &Expr) -> EvalResult<String> {
        self.eval(expr)?.render()
    }

    /// Looks up a name in the bindings.
    ///
    /// # Errors
    /// `EvalError::UnknownVariable` if the name is not bound.
    pub fn eval_variable(&self, name: &str) -> EvalResult<Value> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownVariable { name: name.to_string() })
    }
}
