/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and the short-circuiting logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the `Evaluator`, the result type shared by every evaluation
/// function and the dispatch over expression nodes.
pub mod core;

/// Utility functions for evaluation.
///
/// Literal conversion, array literals and indexing.
pub mod utils;

/// Function calls.
///
/// Invokes host functions found in the bindings, directly or through a cell.
pub mod function;
