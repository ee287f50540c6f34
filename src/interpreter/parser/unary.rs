use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{MAX_EXPR_DEPTH, ParseResult, check_depth, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!` / `not`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Each prefix operator nests its operand one level deeper.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "not") unary
///            | primary postfix*
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    check_depth(tokens, depth)?;

    let op = match tokens.peek() {
        Some((Token::Minus, position)) => Some((UnaryOperator::Negate, *position)),
        Some((Token::Bang | Token::Not, position)) => Some((UnaryOperator::Not, *position)),
        _ => None,
    };

    if let Some((op, position)) = op {
        tokens.next();
        let expr = parse_unary(tokens, depth + 1)?;
        return Ok(Expr::UnaryOp { op,
                                  expr: Box::new(expr),
                                  position });
    }

    let primary = parse_primary(tokens, depth)?;
    parse_postfix(tokens, primary, depth)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, boolean and string literals
/// - names
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar:
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { position: 0 })?;

    match peeked {
        (Token::Real(..) | Token::Integer(..) | Token::Bool(..) | Token::Str(..), _) => {
            parse_literal(tokens)
        },
        (Token::LParen, _) => parse_grouping(tokens, depth),
        (Token::LBracket, _) => parse_array_literal(tokens, depth),
        (Token::Identifier(name), position) => {
            let expr = Expr::Variable { name:     name.clone(),
                                        position: *position, };
            tokens.next();
            Ok(expr)
        },
        (tok, position) => Err(ParseError::UnexpectedToken { token:    format!("{tok:?}"),
                                                             position: *position, }),
    }
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// two kinds of postfix constructs, in any order and any number of times:
///
/// 1. **Calls** `expr(arg1, arg2, ...)`
/// 2. **Indexing** `expr[index]`
///
/// so `table["f"](x)[0]` is a call of an indexed value, indexed again.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "(" arguments ")"
///              | postfix "[" expression "]"
/// ```
///
/// # Errors
/// Returns a `ParseError` if:
/// - an `[` is not properly closed with `]`,
/// - an argument or the index expression fails to parse,
/// - the argument list is not closed with `)`,
/// - the chain grows taller than [`MAX_EXPR_DEPTH`] allows at `depth`.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut height = None;
    loop {
        let position = match tokens.peek() {
            Some((Token::LParen | Token::LBracket, position)) => *position,
            _ => break,
        };
        node = match tokens.next() {
            Some((Token::LParen, _)) => {
                let arguments =
                    parse_comma_separated(tokens, parse_expression, depth + 1, &Token::RParen)?;
                Expr::Call { callee: Box::new(node),
                             arguments,
                             position }
            },
            _ => {
                let index = parse_expression(tokens, depth + 1)?;
                match tokens.next() {
                    Some((Token::RBracket, _)) => Expr::Index { target: Box::new(node),
                                                                index: Box::new(index),
                                                                position },
                    _ => return Err(ParseError::ExpectedClosingBracket { position }),
                }
            },
        };
        let grown = match height {
            Some(below) => 1 + tallest_operand(&node).max(below),
            None => node.height(),
        };
        if depth + grown > MAX_EXPR_DEPTH {
            return Err(ParseError::TooDeep { position });
        }
        height = Some(grown);
    }
    Ok(node)
}

/// Height of the arguments or index of a call or index node.
fn tallest_operand(node: &Expr) -> usize {
    match node {
        Expr::Call { arguments, .. } => arguments.iter().map(Expr::height).max().unwrap_or(0),
        Expr::Index { index, .. } => index.height(),
        _ => 0,
    }
}

/// Parses a numeric, boolean or string literal.
///
/// # Returns
/// An [`Expr::Literal`] containing the parsed value.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (tok, position) = tokens.next()
                                .ok_or(ParseError::UnexpectedEndOfInput { position: 0 })?;
    let value = match tok {
        Token::Real(n) => LiteralValue::Real(*n),
        Token::Integer(n) => LiteralValue::Integer(*n),
        Token::Bool(b) => LiteralValue::Bool(*b),
        Token::Str(s) => LiteralValue::Str(s.clone()),
        other => {
            return Err(ParseError::UnexpectedToken { token:    format!("{other:?}"),
                                                     position: *position, });
        },
    };

    Ok(Expr::Literal { value,
                       position: *position })
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`. Failure to find the closing
/// parenthesis yields `ParseError::ExpectedClosingParen`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let position = match tokens.next() {
        Some((_, position)) => *position,
        None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    };
    let expr = parse_expression(tokens, depth + 1)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { position }),
    }
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed using `parse_expression`, separated by commas.
///
/// # Returns
/// An [`Expr::ArrayLiteral`] node containing the parsed elements.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let position = match tokens.next() {
        Some((_, position)) => *position,
        None => return Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    };
    let elements = parse_comma_separated(tokens, parse_expression, depth + 1, &Token::RBracket)?;
    Ok(Expr::ArrayLiteral { elements,
                            position })
}
