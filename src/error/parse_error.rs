use thiserror::Error;

/// Represents all errors that can occur while lexing or parsing a link
/// expression.
///
/// Positions are byte offsets into the expression source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error at offset {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Where the token starts.
        position: usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at offset {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Length of the source, where more input was expected.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at offset {position}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Where the group was opened.
        position: usize,
    },
    /// A closing bracket `]` was expected but not found.
    #[error("Error at offset {position}: Expected closing bracket ']' but none found.")]
    ExpectedClosingBracket {
        /// Where the index or array was opened.
        position: usize,
    },
    /// Found extra tokens after the expression should have ended.
    #[error("Error at offset {position}: Extra tokens after expression: {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Where the token starts.
        position: usize,
    },
    /// A string literal was opened but never closed, or holds a bad escape.
    #[error("Error at offset {position}: Malformed string literal.")]
    MalformedString {
        /// Where the literal starts.
        position: usize,
    },
    /// A numeric literal was too large to be represented safely.
    #[error("Error at offset {position}: Literal is too large.")]
    LiteralTooLarge {
        /// Where the literal starts.
        position: usize,
    },
    /// The expression nests deeper than the parser accepts.
    #[error("Error at offset {position}: Expression is nested too deeply.")]
    TooDeep {
        /// Where the limit was crossed.
        position: usize,
    },
}
