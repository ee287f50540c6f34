/// The evaluator module computes the value of a parsed expression.
///
/// The evaluator walks the AST against a set of bindings, performs
/// arithmetic, comparison and logical operations, indexes arrays, strings and
/// maps, and calls host functions found in the bindings.
///
/// # Responsibilities
/// - Resolves names against the bindings only.
/// - Reads cells at evaluation time, so links stay live.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes expression source.
///
/// The lexer reads the raw expression text and produces tokens for numbers,
/// strings, names, operators and delimiters, each paired with its byte
/// offset.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per precedence level. A
/// link expression must parse completely; trailing input is an error.
pub mod parser;
/// The value module defines the data an expression works on.
///
/// Integers, reals, booleans, strings, arrays, maps, host functions and
/// cells, with their rendering rules.
pub mod value;
