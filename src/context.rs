use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// How many cells deep a read may go before it is treated as a cycle.
///
/// Every walk over a value counts the cells it passes through, including
/// cells reached through arrays and maps.
pub(crate) const MAX_CELL_DEPTH: usize = 64;

/// The error raised when a walk passes through more than
/// [`MAX_CELL_DEPTH`] cells.
pub(crate) fn cells_too_deep() -> EvalError {
    EvalError::TypeError { details: format!("cells nested deeper than {MAX_CELL_DEPTH} levels") }
}

/// A shared, mutable cell that link expressions read at render time.
///
/// Cloning a `DynamicContext` yields another handle to the same cell, so a
/// caller can keep one handle, place another in a token's bindings, and
/// change what the token renders by calling [`DynamicContext::set`] between
/// renders. Reads always see the most recent write.
///
/// A cell holding a [`Function`](crate::interpreter::value::function::Function)
/// is called through when used in a call expression, and invoked with no
/// arguments when rendered directly.
///
/// # Example
/// ```
/// use startrace::{context::DynamicContext, interpreter::value::core::Value};
///
/// let threshold = DynamicContext::new(10);
/// let handle = threshold.clone();
///
/// handle.set(20);
/// assert_eq!(threshold.get(), Value::Integer(20));
/// assert_eq!(threshold.render().unwrap(), "20");
/// ```
#[derive(Clone)]
pub struct DynamicContext {
    held: Rc<RefCell<Value>>,
}

impl DynamicContext {
    /// Creates a cell holding `value`.
    pub fn new(value: impl Into<Value>) -> Self {
        Self { held: Rc::new(RefCell::new(value.into())) }
    }

    /// Returns a copy of the held value.
    ///
    /// Containers inside the value are shared, not deep-copied.
    #[must_use]
    pub fn get(&self) -> Value {
        self.held.borrow().clone()
    }

    /// Replaces the held value. Every handle observes the change.
    pub fn set(&self, value: impl Into<Value>) {
        *self.held.borrow_mut() = value.into();
    }

    /// Replaces the held value with `f(current)`.
    ///
    /// The current value is copied out before `f` runs, so `f` may itself
    /// read or write this cell.
    ///
    /// # Example
    /// ```
    /// use startrace::{context::DynamicContext, interpreter::value::core::Value};
    ///
    /// let counter = DynamicContext::new(1);
    /// counter.update(|v| match v {
    ///            Value::Integer(n) => Value::Integer(n + 1),
    ///            other => other,
    ///        });
    /// assert_eq!(counter.get(), Value::Integer(2));
    /// ```
    pub fn update(&self, f: impl FnOnce(Value) -> Value) {
        let next = f(self.get());
        self.set(next);
    }

    /// Returns `true` if both handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.held, &other.held)
    }

    /// Reads the current value, following nested cells and invoking a held
    /// function with no arguments.
    ///
    /// # Errors
    /// - Any error the held function returns.
    /// - `EvalError::TypeError` when cells nest deeper than the read limit,
    ///   which happens when a cell ends up holding itself.
    pub fn resolve(&self) -> EvalResult<Value> {
        match Self::peel(self.get())? {
            Value::Function(f) => Self::peel(f.call(&[])?),
            other => Ok(other),
        }
    }

    /// Renders the resolved value.
    ///
    /// # Errors
    /// Anything [`DynamicContext::resolve`] or
    /// [`Value::render`] returns.
    pub fn render(&self) -> EvalResult<String> {
        self.resolve()?.render()
    }

    /// Unwraps `value` until it is no longer a cell.
    pub(crate) fn peel(mut value: Value) -> EvalResult<Value> {
        for _ in 0..MAX_CELL_DEPTH {
            match value {
                Value::Cell(cell) => value = cell.get(),
                other => return Ok(other),
            }
        }
        Err(cells_too_deep())
    }
}

/// Handles compare by identity: two cells are equal only if they are the
/// same cell.
impl PartialEq for DynamicContext {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Shows the held value as [`Value::describe`] does, so a cell that
/// contains itself still prints.
impl fmt::Debug for DynamicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicContext({})", self.get().describe())
    }
}
