use std::ops::{AddAssign, SubAssign};

use tracing::{debug, trace};

use crate::{
    descriptor::PatternDescriptor,
    error::BuildError,
    interpreter::evaluator::core::EvalResult,
    token::Token,
};

/// An ordered sequence of tokens rendered by concatenation and stepped like
/// an odometer.
///
/// The last token is the least significant digit: `advance` moves it first
/// and carries into the token before it only when it wraps. When every token
/// wraps, the pattern is back at its first rendering and `advance` returns
/// `false`.
///
/// # Example
/// ```
/// use startrace::{pattern::Pattern, token::Token};
///
/// let mut pattern = Pattern::new(vec![Token::constant("test_").unwrap(),
///                                     Token::range(0, 2, 1).unwrap(),
///                                     Token::range(0, 9, 1).unwrap()]);
/// assert_eq!(pattern.render().unwrap(), "test_00");
/// pattern.advance();
/// assert_eq!(pattern.render().unwrap(), "test_01");
///
/// pattern.shift(9);
/// assert_eq!(pattern.render().unwrap(), "test_10");
///
/// pattern.shift(-11);
/// assert_eq!(pattern.render().unwrap(), "test_29");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Creates a pattern from tokens, most significant first.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Builds a pattern from its descriptor.
    ///
    /// Each link token sees the descriptor's `global_context` overlaid with
    /// its own `context`; its own entries win on a shared name. A link that
    /// does not say whether evaluation is allowed takes the descriptor's
    /// `eval_allowed`.
    ///
    /// # Errors
    /// The first `BuildError` raised by any token.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     descriptor::{PatternDescriptor, TokenDescriptor},
    ///     interpreter::value::core::{Bindings, Value},
    ///     pattern::Pattern,
    /// };
    ///
    /// let mut global = Bindings::new();
    /// global.insert("site".to_string(), Value::from("north"));
    ///
    /// let descriptor =
    ///     PatternDescriptor { tokens:         vec![TokenDescriptor::link("site"),
    ///                                              TokenDescriptor::Const { value: "-".into() },
    ///                                              TokenDescriptor::Range { start: 1.into(),
    ///                                                                       end:   2.into(),
    ///                                                                       step:  1.into(), }],
    ///                         global_context: global,
    ///                         eval_allowed:   true, };
    ///
    /// let mut pattern = Pattern::from_descriptor(&descriptor).unwrap();
    /// assert_eq!(pattern.renderings(3).unwrap(), ["north-1", "north-2", "north-1"]);
    /// ```
    pub fn from_descriptor(descriptor: &PatternDescriptor) -> Result<Self, BuildError> {
        debug!(tokens = descriptor.tokens.len(),
               globals = descriptor.global_context.len(),
               "building pattern from descriptor");

        let tokens = descriptor.tokens
                               .iter()
                               .map(|token| Token::from_descriptor(&descriptor.resolve(token)))
                               .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tokens))
    }

    /// Produces a descriptor listing every token's descriptor.
    ///
    /// Link tokens carry their full bindings, so the pattern-level
    /// `global_context` is left empty.
    #[must_use]
    pub fn to_descriptor(&self) -> PatternDescriptor {
        PatternDescriptor { tokens:         self.tokens.iter().map(Token::to_descriptor).collect(),
                            global_context: Default::default(),
                            eval_allowed:   false, }
    }

    /// Concatenates the rendering of every token.
    ///
    /// # Errors
    /// The first `EvalError` raised by a token.
    pub fn render(&self) -> EvalResult<String> {
        self.tokens.iter().map(Token::render).collect()
    }

    /// Steps the pattern forward one position.
    ///
    /// Returns `false` after a full cycle, with every token back at its
    /// start.
    pub fn advance(&mut self) -> bool {
        let moved = self.tokens.iter_mut().rev().any(Token::advance);
        if !moved {
            trace!(tokens = self.tokens.len(), "pattern wrapped forward");
        }
        moved
    }

    /// Steps the pattern back one position.
    ///
    /// Returns `false` after a full cycle, with every token at its last
    /// position.
    pub fn retreat(&mut self) -> bool {
        let moved = self.tokens.iter_mut().rev().any(Token::retreat);
        if !moved {
            trace!(tokens = self.tokens.len(), "pattern wrapped backward");
        }
        moved
    }

    /// Advances `n` times, or retreats `-n` times when `n` is negative.
    ///
    /// Steps carry on past a wrap. Whole cycles are skipped, since each one
    /// ends where it began.
    pub fn shift(&mut self, n: i64) {
        self.walk(n.unsigned_abs(), n > 0);
    }

    fn walk(&mut self, steps: u64, forward: bool) {
        let steps = self.positions()
                        .and_then(|cycle| steps.checked_rem(cycle))
                        .unwrap_or(steps);
        for _ in 0..steps {
            if forward {
                self.advance();
            } else {
                self.retreat();
            }
        }
    }

    /// Puts every token back at its start.
    pub fn reset(&mut self) {
        self.tokens.iter_mut().for_each(Token::reset);
    }

    /// Number of distinct positions in one full cycle.
    ///
    /// `None` if the count overflows a `u64`.
    ///
    /// # Example
    /// ```
    /// use startrace::{pattern::Pattern, token::Token};
    ///
    /// let pattern = Pattern::new(vec![Token::list(["a", "b"]).unwrap(),
    ///                                 Token::range(0, 9, 1).unwrap()]);
    /// assert_eq!(pattern.positions(), Some(20));
    /// ```
    #[must_use]
    pub fn positions(&self) -> Option<u64> {
        self.tokens
            .iter()
            .try_fold(1_u64, |acc, token| acc.checked_mul(token.positions()?))
    }

    /// Renders, then advances, `count` times.
    ///
    /// # Errors
    /// The first `EvalError` raised while rendering.
    pub fn renderings(&mut self, count: usize) -> EvalResult<Vec<String>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.render()?);
            self.advance();
        }
        Ok(out)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for Pattern {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for Pattern {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// `pattern += n` is `pattern.shift(n)`.
impl AddAssign<i64> for Pattern {
    fn add_assign(&mut self, n: i64) {
        self.shift(n);
    }
}

/// `pattern -= n` is `pattern.shift(-n)`, including for `i64::MIN`.
impl SubAssign<i64> for Pattern {
    fn sub_assign(&mut self, n: i64) {
        self.walk(n.unsigned_abs(), n < 0);
    }
}

impl TryFrom<&PatternDescriptor> for Pattern {
    type Error = BuildError;

    fn try_from(descriptor: &PatternDescriptor) -> Result<Self, Self::Error> {
        Self::from_descriptor(descriptor)
    }
}
