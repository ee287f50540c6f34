use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_logical_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deep an expression may nest before parsing fails with
/// [`ParseError::TooDeep`].
///
/// Groups, brackets, call arguments and prefix operators each add a level
/// while they are parsed. A finished operator chain counts as tall as the tree
/// it folds into, so `1 + 1 + ...` is held to the same limit as `((...))`.
pub const MAX_EXPR_DEPTH: usize = 64;

/// Tokenizes and parses a complete link expression.
///
/// The whole source must form a single expression; anything left over after
/// it is an error.
///
/// # Errors
/// Returns a `ParseError` if the source fails to tokenize, is empty, is
/// malformed, nests deeper than [`MAX_EXPR_DEPTH`] or has trailing tokens.
///
/// # Example
/// ```
/// use startrace::{ast::Expr, error::ParseError, interpreter::parser::core::parse};
///
/// let expr = parse("y(x)").unwrap();
/// assert!(matches!(expr, Expr::Call { .. }));
///
/// assert!(parse("y(x").is_err());
/// assert!(parse("x y").is_err());
///
/// let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
/// assert!(matches!(parse(&nested), Err(ParseError::TooDeep { .. })));
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_expression(&mut iter, 0).map_err(|e| match e {
                                              ParseError::UnexpectedEndOfInput { .. } => {
                                                  ParseError::UnexpectedEndOfInput { position:
                                                                                         source.len() }
                                              },
                                              other => other,
                                          })?;

    if let Some((tok, position)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token:    format!("{tok:?}"),
                                                          position: *position, });
    }

    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `depth`: How many levels the expression already sits inside.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Returns [`ParseError::TooDeep`] once `depth` passes [`MAX_EXPR_DEPTH`],
/// before descending any further.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    check_depth(tokens, depth)?;
    parse_logical_or(tokens, depth)
}

/// Fails with [`ParseError::TooDeep`] at the next token once `depth` is past
/// [`MAX_EXPR_DEPTH`].
pub(in crate::interpreter::parser) fn check_depth<'a, I>(tokens: &mut Peekable<I>,
                                                         depth: usize)
                                                         -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if depth > MAX_EXPR_DEPTH {
        let position = tokens.peek().map_or(0, |(_, position)| *position);
        return Err(ParseError::TooDeep { position });
    }
    Ok(())
}
