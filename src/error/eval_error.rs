use thiserror::Error;

/// Represents all errors that can occur while rendering a token.
///
/// Every variant is produced at call time. A pattern that returns one of
/// these is well formed; its live link or clock failed this time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression referenced a name missing from the bindings.
    #[error("Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// The expression called a value that is not a function.
    #[error("Value of type {found} is not callable.")]
    NotCallable {
        /// Type name of the value that was called.
        found: &'static str,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
    /// Tried to access an element outside the allowed bounds.
    #[error("Index out of bounds. Length is {len}, but index {found} was requested.")]
    IndexOutOfBounds {
        /// Number of elements in the indexed value.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
    },
    /// Tried to read a map entry that does not exist.
    #[error("Missing key '{key}'.")]
    MissingKey {
        /// The key that was requested.
        key: String,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Argument count mismatch: expected {expected}, found {found}.")]
    ArgumentCountMismatch {
        /// Number of arguments the function accepts.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// Attempted division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// Integer arithmetic overflowed.
    #[error("Integer overflow while trying to compute result.")]
    Overflow,
    /// The result of an evaluation has no string form.
    #[error("Value of type {found} cannot be rendered as a string.")]
    Unstringifiable {
        /// Type name of the offending value.
        found: &'static str,
    },
    /// The timestamp format was rejected while formatting.
    #[error("Invalid time format '{fmt}'.")]
    TimeFormat {
        /// The format that failed.
        fmt: String,
    },
    /// A host function reported a failure.
    #[error("Host function failed: {message}.")]
    Host {
        /// Message supplied by the host function.
        message: String,
    },
}

impl EvalError {
    /// Builds a [`EvalError::Host`] from any displayable message.
    ///
    /// Intended for host functions placed in a binding map.
    ///
    /// # Example
    /// ```
    /// use startrace::error::EvalError;
    ///
    /// let err = EvalError::host("sensor offline");
    /// assert_eq!(err.to_string(), "Host function failed: sensor offline.");
    /// ```
    pub fn host(message: impl std::fmt::Display) -> Self {
        Self::Host { message: message.to_string() }
    }
}
