use crate::{
    counter::BoundedCounter, descriptor::TokenDescriptor, error::BuildError,
    interpreter::value::core::Value,
};

/// The counter behind a [`RangeToken`], integer or real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeCounter {
    Integer(BoundedCounter<i64>),
    Real(BoundedCounter<f64>),
}

/// A token that counts from `start` toward `end` by `step`.
///
/// # Example
/// ```
/// use startrace::token::range::RangeToken;
///
/// let mut token = RangeToken::integer(3, 1, -1).unwrap();
/// assert_eq!(token.render(), "3");
/// assert!(token.advance());
/// assert_eq!(token.render(), "2");
/// assert!(token.retreat());
/// assert!(!token.retreat());
/// assert_eq!(token.render(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeToken {
    counter: RangeCounter,
}

impl RangeToken {
    /// Creates an integer range positioned at `start`.
    ///
    /// # Errors
    /// Any bound violation reported by [`BoundedCounter::new`].
    pub fn integer(start: i64, end: i64, step: i64) -> Result<Self, BuildError> {
        Ok(Self { counter: RangeCounter::Integer(BoundedCounter::starting(start, end, step)?) })
    }

    /// Creates a real range positioned at `start`.
    ///
    /// # Errors
    /// Any bound violation reported by [`BoundedCounter::new`], including
    /// non-finite fields.
    pub fn real(start: f64, end: f64, step: f64) -> Result<Self, BuildError> {
        Ok(Self { counter: RangeCounter::Real(BoundedCounter::starting(start, end, step)?) })
    }

    /// Creates a range from three numeric values of the same kind.
    ///
    /// # Errors
    /// - `BuildError::NotNumeric` naming the first non-numeric field.
    /// - `BuildError::MixedNumericTypes` if integers and reals are mixed.
    /// - Any bound violation.
    pub fn from_values(start: &Value, end: &Value, step: &Value) -> Result<Self, BuildError> {
        for (field, v) in [("start", start), ("end", end), ("step", step)] {
            if !v.is_numeric() {
                return Err(BuildError::NotNumeric { field,
                                                    found: v.type_name() });
            }
        }

        match (start, end, step) {
            (Value::Integer(s), Value::Integer(e), Value::Integer(st)) => Self::integer(*s, *e, *st),
            (Value::Real(s), Value::Real(e), Value::Real(st)) => Self::real(*s, *e, *st),
            _ => Err(BuildError::MixedNumericTypes),
        }
    }

    /// The underlying counter.
    #[must_use]
    pub const fn counter(&self) -> &RangeCounter {
        &self.counter
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> Value {
        match self.counter {
            RangeCounter::Integer(c) => Value::Integer(c.value()),
            RangeCounter::Real(c) => Value::Real(c.value()),
        }
    }

    /// Renders the current value: integers in decimal, reals always with a
    /// fractional part.
    #[must_use]
    pub fn render(&self) -> String {
        match self.counter {
            RangeCounter::Integer(c) => c.value().to_string(),
            RangeCounter::Real(c) => format!("{:?}", c.value()),
        }
    }

    pub fn advance(&mut self) -> bool {
        match &mut self.counter {
            RangeCounter::Integer(c) => c.advance(),
            RangeCounter::Real(c) => c.advance(),
        }
    }

    pub fn retreat(&mut self) -> bool {
        match &mut self.counter {
            RangeCounter::Integer(c) => c.retreat(),
            RangeCounter::Real(c) => c.retreat(),
        }
    }

    pub fn reset(&mut self) {
        match &mut self.counter {
            RangeCounter::Integer(c) => c.reset(),
            RangeCounter::Real(c) => c.reset(),
        }
    }

    /// Number of values in one cycle, `None` if it does not fit in a `u64`.
    #[must_use]
    pub fn positions(&self) -> Option<u64> {
        match self.counter {
            RangeCounter::Integer(c) => c.positions(),
            RangeCounter::Real(c) => c.positions(),
        }
    }

    pub(crate) fn describe(&self) -> String {
        let (start, end, step) = self.bounds();
        format!("RangeToken({}, {}, {})", start.describe(), end.describe(), step.describe())
    }

    pub(crate) fn to_descriptor(&self) -> TokenDescriptor {
        let (start, end, step) = self.bounds();
        TokenDescriptor::Range { start, end, step }
    }

    fn bounds(&self) -> (Value, Value, Value) {
        match self.counter {
            RangeCounter::Integer(c) => (c.start().into(), c.end().into(), c.step().into()),
            RangeCounter::Real(c) => (c.start().into(), c.end().into(), c.step().into()),
        }
    }
}
