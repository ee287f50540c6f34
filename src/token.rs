use crate::{
    descriptor::TokenDescriptor,
    error::BuildError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Bindings, Value},
    },
    token::{
        constant::ConstToken,
        link::{LinkOptions, LinkToken},
        list::ListToken,
        range::RangeToken,
        time::{TimeMode, TimeToken},
    },
};

/// Fixed text.
pub mod constant;
/// Expression over caller-supplied bindings, evaluated on every render.
pub mod link;
/// Steps through an enumerated list of values.
pub mod list;
/// Counts through an integer or real range.
pub mod range;
/// Renders the wall clock.
pub mod time;

/// One segment of a [`Pattern`](crate::pattern::Pattern).
///
/// Every variant renders to text and answers `advance` / `retreat`. Only
/// lists and ranges have a position; the other variants never move and
/// always report `false`.
///
/// # Example
/// ```
/// use startrace::token::Token;
///
/// let mut token = Token::list(["A", "B", "C"]).unwrap();
/// assert_eq!(token.render().unwrap(), "A");
/// assert!(token.advance());
/// assert_eq!(token.render().unwrap(), "B");
/// assert_eq!(token.describe(), r#"ListToken(["A", "B", "C"])"#);
///
/// let mut constant = Token::constant("file_").unwrap();
/// assert!(!constant.advance());
/// assert_eq!(constant.render().unwrap(), "file_");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Constant(ConstToken),
    List(ListToken),
    Range(RangeToken),
    Time(TimeToken),
    Link(LinkToken),
}

impl Token {
    /// Builds a [`ConstToken`].
    ///
    /// # Errors
    /// `BuildError::Unstringifiable` if the value has no string form.
    pub fn constant(value: impl Into<Value>) -> Result<Self, BuildError> {
        ConstToken::new(value).map(Self::Constant)
    }

    /// Builds a [`ListToken`].
    ///
    /// # Errors
    /// `BuildError::EmptyList`, or `BuildError::Unstringifiable` for an
    /// element with no string form.
    pub fn list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Result<Self, BuildError> {
        ListToken::new(values).map(Self::List)
    }

    /// Builds an integer [`RangeToken`] positioned at `start`.
    ///
    /// # Errors
    /// Any bound violation: zero step, equal bounds, or bounds that disagree
    /// with the step direction.
    pub fn range(start: i64, end: i64, step: i64) -> Result<Self, BuildError> {
        RangeToken::integer(start, end, step).map(Self::Range)
    }

    /// Builds a real [`RangeToken`] positioned at `start`.
    ///
    /// # Errors
    /// Same as [`Token::range`], plus `BuildError::NonFinite`.
    pub fn real_range(start: f64, end: f64, step: f64) -> Result<Self, BuildError> {
        RangeToken::real(start, end, step).map(Self::Range)
    }

    /// Builds a [`TimeToken`].
    ///
    /// # Errors
    /// See [`TimeToken::new`].
    pub fn timestamp(mode: TimeMode, fmt: Option<&str>) -> Result<Self, BuildError> {
        TimeToken::new(mode, fmt).map(Self::Time)
    }

    /// Builds a [`LinkToken`].
    ///
    /// # Errors
    /// See [`LinkToken::new`].
    pub fn link(link: &str, bindings: Bindings, options: LinkOptions) -> Result<Self, BuildError> {
        LinkToken::new(link, bindings, options).map(Self::Link)
    }

    /// Builds a token from its descriptor, dispatching on the variant.
    ///
    /// A link descriptor without `context` gets empty bindings, and one
    /// without `eval_allowed` is refused.
    ///
    /// # Errors
    /// Whatever the selected constructor returns.
    ///
    /// # Example
    /// ```
    /// use startrace::{descriptor::TokenDescriptor, interpreter::value::core::Value, token::Token};
    ///
    /// let descriptor = TokenDescriptor::Range { start: Value::Integer(1),
    ///                                           end:   Value::Integer(3),
    ///                                           step:  Value::Integer(1), };
    /// let token = Token::from_descriptor(&descriptor).unwrap();
    /// assert_eq!(token.to_descriptor(), descriptor);
    /// ```
    pub fn from_descriptor(descriptor: &TokenDescriptor) -> Result<Self, BuildError> {
        match descriptor {
            TokenDescriptor::Const { value } => Self::constant(value.clone()),
            TokenDescriptor::List { values } => Self::list(values.iter().cloned()),
            TokenDescriptor::Range { start, end, step } => {
                RangeToken::from_values(start, end, step).map(Self::Range)
            },
            TokenDescriptor::Time { mode, fmt } => {
                TimeToken::from_name(mode, fmt.as_deref()).map(Self::Time)
            },
            TokenDescriptor::Link { link,
                                    context,
                                    eval_allowed,
                                    validate, } => {
                let options = LinkOptions { eval_allowed: eval_allowed.unwrap_or(false),
                                            validate:     *validate, };
                Self::link(link, context.clone().unwrap_or_default(), options)
            },
        }
    }

    /// Produces the descriptor that rebuilds this token.
    ///
    /// Link bindings are copied, so later changes to the token's map are
    /// not seen by the descriptor. Cells in the map stay shared.
    #[must_use]
    pub fn to_descriptor(&self) -> TokenDescriptor {
        match self {
            Self::Constant(t) => t.to_descriptor(),
            Self::List(t) => t.to_descriptor(),
            Self::Range(t) => t.to_descriptor(),
            Self::Time(t) => t.to_descriptor(),
            Self::Link(t) => t.to_descriptor(),
        }
    }

    /// Renders the token's current value.
    ///
    /// # Errors
    /// Only time and link tokens, and list elements holding cells, can fail
    /// here; see `EvalError`.
    pub fn render(&self) -> EvalResult<String> {
        match self {
            Self::Constant(t) => Ok(t.value().to_string()),
            Self::List(t) => t.render(),
            Self::Range(t) => Ok(t.render()),
            Self::Time(t) => t.render(),
            Self::Link(t) => t.render(),
        }
    }

    /// Moves one position forward.
    ///
    /// Returns `false` when the token wrapped to its start or has no
    /// position at all.
    pub fn advance(&mut self) -> bool {
        match self {
            Self::List(t) => t.advance(),
            Self::Range(t) => t.advance(),
            Self::Constant(_) | Self::Time(_) | Self::Link(_) => false,
        }
    }

    /// Moves one position back.
    ///
    /// Returns `false` when the token wrapped to its last position or has
    /// no position at all.
    pub fn retreat(&mut self) -> bool {
        match self {
            Self::List(t) => t.retreat(),
            Self::Range(t) => t.retreat(),
            Self::Constant(_) | Self::Time(_) | Self::Link(_) => false,
        }
    }

    /// Moves a list or range back to its start.
    pub fn reset(&mut self) {
        match self {
            Self::List(t) => t.reset(),
            Self::Range(t) => t.reset(),
            Self::Constant(_) | Self::Time(_) | Self::Link(_) => {},
        }
    }

    /// Number of distinct positions; `1` for tokens that never move.
    ///
    /// `None` if a range is too long to count in a `u64`.
    #[must_use]
    pub fn positions(&self) -> Option<u64> {
        match self {
            Self::List(t) => Some(t.positions()),
            Self::Range(t) => t.positions(),
            Self::Constant(_) | Self::Time(_) | Self::Link(_) => Some(1),
        }
    }

    /// The constructor-call form of the token, e.g. `RangeToken(1, 3, 1)`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Constant(t) => t.describe(),
            Self::List(t) => t.describe(),
            Self::Range(t) => t.describe(),
            Self::Time(t) => t.describe(),
            Self::Link(t) => t.describe(),
        }
    }
}

impl From<ConstToken> for Token {
    fn from(token: ConstToken) -> Self {
        Self::Constant(token)
    }
}

impl From<ListToken> for Token {
    fn from(token: ListToken) -> Self {
        Self::List(token)
    }
}

impl From<RangeToken> for Token {
    fn from(token: RangeToken) -> Self {
        Self::Range(token)
    }
}

impl From<TimeToken> for Token {
    fn from(token: TimeToken) -> Self {
        Self::Time(token)
    }
}

impl From<LinkToken> for Token {
    fn from(token: LinkToken) -> Self {
        Self::Link(token)
    }
}

impl TryFrom<&TokenDescriptor> for Token {
    type Error = BuildError;

    fn try_from(descriptor: &TokenDescriptor) -> Result<Self, Self::Error> {
        Self::from_descriptor(descriptor)
    }
}
