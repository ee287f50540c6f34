use thiserror::Error;

use crate::error::{EvalError, ParseError};

/// Represents all errors that can occur while constructing a counter, token
/// or pattern.
///
/// These are permanent: retrying with the same arguments fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A counter was given a step of zero.
    #[error("Invalid bounds: step cannot be zero.")]
    ZeroStep,
    /// A counter was given identical start and end values.
    #[error("Invalid bounds: start and end cannot be equal ({value}).")]
    EqualBounds {
        /// The shared start/end value.
        value: String,
    },
    /// The bounds do not agree with the step direction, or the initial value
    /// lies outside them.
    #[error("Invalid bounds: {details}.")]
    InvalidBounds {
        /// Details describing why the bounds are invalid.
        details: String,
    },
    /// A real-valued counter field is NaN or infinite.
    #[error("Invalid bounds: {field} must be finite.")]
    NonFinite {
        /// The offending field.
        field: &'static str,
    },
    /// Range fields mix integer and real values.
    #[error("Range start, end and step must all be integers or all be reals.")]
    MixedNumericTypes,
    /// A range field is not a number.
    #[error("Range {field} must be numeric, found {found}.")]
    NotNumeric {
        /// The offending field.
        field: &'static str,
        /// Type name of the value found.
        found: &'static str,
    },
    /// A value has no string form.
    #[error("{token}: value of type {found} cannot be rendered as a string.")]
    Unstringifiable {
        /// The token kind being built.
        token: &'static str,
        /// Type name of the offending value.
        found: &'static str,
    },
    /// A list token was given no values.
    #[error("ListToken: values cannot be empty.")]
    EmptyList,
    /// A timestamp token was given a mode outside the five recognized names.
    #[error("TimeToken: Invalid mode: {mode}. Valid modes are: date, time, datetime, iso, custom.")]
    UnknownTimeMode {
        /// The unrecognized mode.
        mode: String,
    },
    /// A `custom` timestamp token was given no format.
    #[error("TimeToken: custom mode requires a non-empty format string.")]
    MissingTimeFormat,
    /// A `custom` timestamp format was rejected by the trial format.
    #[error("TimeToken: invalid custom format string: {fmt}.")]
    InvalidTimeFormat {
        /// The rejected format.
        fmt: String,
    },
    /// A link token was given an empty expression.
    #[error("LinkToken: link cannot be an empty string.")]
    EmptyLink,
    /// A link token was built without opting in to evaluation.
    #[error("LinkToken: eval_allowed must be true to enable expression evaluation.")]
    EvalNotAllowed,
    /// A link expression failed to parse.
    #[error("LinkToken: link '{link}' is not a valid expression: {source}")]
    InvalidLink {
        /// The expression source.
        link:   String,
        /// The syntax error.
        #[source]
        source: ParseError,
    },
    /// A link expression failed its construction-time trial evaluation.
    #[error("LinkToken: link '{link}' failed validation: {source}")]
    LinkValidation {
        /// The expression source.
        link:   String,
        /// The evaluation error.
        #[source]
        source: EvalError,
    },
}
