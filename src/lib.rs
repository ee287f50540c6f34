//! # startrace
//!
//! startrace generates sequences of strings from patterns of typed tokens.
//! A pattern is stepped like an odometer: constant text, enumerated lists,
//! numeric ranges, timestamps and live expressions over caller-supplied
//! bindings are concatenated, and the last token turns fastest.
//!
//! ```
//! use startrace::{pattern::Pattern, token::Token};
//!
//! let mut pattern = Pattern::new(vec![Token::constant("backup_").unwrap(),
//!                                     Token::list(["A", "B"]).unwrap()]);
//! assert_eq!(pattern.renderings(3).unwrap(), ["backup_A", "backup_B", "backup_A"]);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{descriptor::PatternDescriptor, pattern::Pattern};

/// Defines the structure of parsed link expressions.
///
/// This module declares the `Expr` enum and related types that represent an
/// expression as a tree. The AST is built by the parser and walked by the
/// evaluator.
pub mod ast;
/// Shared mutable cells for live bindings.
///
/// A `DynamicContext` placed in a link token's bindings lets the caller
/// change what the token renders without rebuilding it.
pub mod context;
/// The scalar counter behind list and range tokens.
pub mod counter;
/// Declarative token and pattern descriptions.
///
/// Converts between the live objects, their plain-data descriptors and JSON.
pub mod descriptor;
/// Provides unified error types for building, describing and rendering.
///
/// Construction, render-time, descriptor and expression syntax failures each
/// get their own enum, so callers can tell a malformed pattern from a live
/// link that broke this time.
pub mod error;
/// The restricted expression language used by link tokens.
///
/// Ties together lexing, parsing, values and evaluation. Expressions only see
/// the names a caller binds; there is no built-in namespace.
pub mod interpreter;
/// Ordered sequences of tokens stepped like an odometer.
pub mod pattern;
/// The five token kinds and the `Token` enum over them.
pub mod token;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the counter and the evaluator.
pub mod util;

pub use error::Error;

/// Builds a pattern from JSON descriptor text.
///
/// # Errors
/// `Error::Descriptor` for unreadable JSON, `Error::Build` for a descriptor
/// that does not make a valid pattern.
///
/// # Example
/// ```
/// use startrace::build_pattern;
///
/// let pattern = build_pattern(r#"{"tokens": [{"type": "time", "mode": "date"}]}"#).unwrap();
/// assert_eq!(pattern.len(), 1);
///
/// assert!(build_pattern(r#"{"tokens": [{"type": "time", "mode": "week"}]}"#).is_err());
/// ```
pub fn build_pattern(json: &str) -> Result<Pattern, Error> {
    let descriptor = PatternDescriptor::from_json_str(json)?;
    Ok(Pattern::from_descriptor(&descriptor)?)
}

/// Builds a pattern from JSON descriptor text and returns its first `count`
/// renderings.
///
/// # Errors
/// Anything [`build_pattern`] returns, or `Error::Eval` if a render fails.
///
/// # Examples
/// ```
/// use startrace::render_descriptor;
///
/// let json = r#"{
///     "tokens": [
///         {"type": "const", "value": "file_"},
///         {"type": "range", "start": 0, "end": 9, "step": 1}
///     ]
/// }"#;
/// let out = render_descriptor(json, 3).unwrap();
/// assert_eq!(out, ["file_0", "file_1", "file_2"]);
///
/// // Links must be explicitly allowed.
/// let json = r#"{"tokens": [{"type": "link", "link": "1 + 1"}]}"#;
/// assert!(render_descriptor(json, 1).is_err());
/// ```
pub fn render_descriptor(json: &str, count: usize) -> Result<Vec<String>, Error> {
    Ok(build_pattern(json)?.renderings(count)?)
}
