/// Binary operator parsing.
///
/// Implements the precedence levels of the infix operators, from logical OR
/// down to multiplication.
pub mod binary;

/// Entry points of the parser.
///
/// Provides the top-level `parse` function and the expression rule every
/// other rule recurses into.
pub mod core;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix operators, calls, indexing, literals, names, grouping and
/// array literals.
pub mod unary;

/// Utility functions for the parser.
///
/// Provides helpers shared by several grammar rules.
pub mod utils;
