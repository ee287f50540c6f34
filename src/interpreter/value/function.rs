use std::{fmt, rc::Rc};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Signature shared by every host function.
type HostFn = dyn Fn(&[Value]) -> EvalResult<Value>;

/// A host function that link expressions may call.
///
/// Functions are registered by the caller through the bindings; the
/// expression language itself has no built-in functions. Two `Function`s are
/// equal only when they wrap the same closure.
#[derive(Clone)]
pub struct Function {
    func: Rc<HostFn>,
}

impl Function {
    /// Wraps a closure taking any number of arguments.
    ///
    /// # Example
    /// ```
    /// use startrace::interpreter::value::{core::Value, function::Function};
    ///
    /// let count = Function::new(|args| Ok(Value::Integer(args.len() as i64)));
    /// assert_eq!(count.call(&[Value::Bool(true), Value::Bool(false)]).unwrap(),
    ///            Value::Integer(2));
    /// ```
    pub fn new(func: impl Fn(&[Value]) -> EvalResult<Value> + 'static) -> Self {
        Self { func: Rc::new(func) }
    }

    /// Wraps a closure that takes no arguments.
    pub fn nullary(func: impl Fn() -> EvalResult<Value> + 'static) -> Self {
        Self::new(move |args| {
            check_arity(0, args)?;
            func()
        })
    }

    /// Wraps a closure that takes exactly one argument.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     error::EvalError,
    ///     interpreter::value::{core::Value, function::Function},
    /// };
    ///
    /// let double = Function::unary(|v| match v {
    ///     Value::Integer(n) => Ok(Value::Integer(n * 2)),
    ///     _ => Err(EvalError::host("expected an integer")),
    /// });
    /// assert_eq!(double.call(&[Value::Integer(10)]).unwrap(), Value::Integer(20));
    /// assert!(double.call(&[]).is_err());
    /// ```
    pub fn unary(func: impl Fn(&Value) -> EvalResult<Value> + 'static) -> Self {
        Self::new(move |args| {
            check_arity(1, args)?;
            func(&args[0])
        })
    }

    /// Invokes the function.
    ///
    /// # Errors
    /// Whatever the wrapped closure returns.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.func)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Rc::as_ptr(&self.func).cast::<()>())
    }
}

/// Checks that exactly `expected` arguments were passed.
///
/// # Errors
/// `EvalError::ArgumentCountMismatch` otherwise.
pub fn check_arity(expected: usize, args: &[Value]) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::ArgumentCountMismatch { expected,
                                               found: args.len() })
    }
}
