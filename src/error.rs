/// Construction errors.
///
/// Raised synchronously while building a counter, token or pattern whose
/// arguments violate an invariant. A value that fails construction is never
/// partially built.
pub mod build_error;
/// Declarative descriptor errors.
///
/// Raised while reading a token or pattern description that is missing its
/// `type` discriminator, names an unknown `type`, lacks a required field or
/// carries a field of the wrong shape.
pub mod descriptor_error;
/// Evaluation errors.
///
/// Raised at render time, when a link expression fails against its bindings
/// or a timestamp cannot be formatted.
pub mod eval_error;
/// Expression syntax errors.
///
/// Raised while tokenizing or parsing a link expression.
pub mod parse_error;

pub use build_error::BuildError;
pub use descriptor_error::DescriptorError;
pub use eval_error::EvalError;
pub use parse_error::ParseError;
use thiserror::Error;

/// Umbrella error for entry points that both read a description and render
/// from it.
///
/// Library operations return the narrow error of their phase. This type only
/// exists so that callers going straight from JSON to rendered strings can use
/// a single `?`.
#[derive(Debug, Error)]
pub enum Error {
    /// The description could not be read.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// The description was read but the live object could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// A live object failed while rendering.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
