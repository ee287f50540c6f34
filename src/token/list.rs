use std::rc::Rc;

use crate::{
    counter::BoundedCounter,
    descriptor::TokenDescriptor,
    error::BuildError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A token that steps through a fixed list of values.
///
/// A single-element list has nowhere to move: it never advances and never
/// retreats.
#[derive(Debug, Clone, PartialEq)]
pub struct ListToken {
    values:  Rc<Vec<Value>>,
    /// `None` when the list holds a single value.
    counter: Option<BoundedCounter<i64>>,
}

impl ListToken {
    /// Creates a list token positioned at its first element.
    ///
    /// # Errors
    /// - `BuildError::EmptyList` if `values` is empty.
    /// - `BuildError::Unstringifiable` if an element has no string form.
    ///
    /// # Example
    /// ```
    /// use startrace::token::list::ListToken;
    ///
    /// let mut token = ListToken::new(["A", "B"]).unwrap();
    /// assert_eq!(token.render().unwrap(), "A");
    /// assert!(token.advance());
    /// assert_eq!(token.render().unwrap(), "B");
    /// assert!(!token.advance());
    /// assert_eq!(token.render().unwrap(), "A");
    /// ```
    pub fn new<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Result<Self, BuildError> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(BuildError::EmptyList);
        }
        if let Some(bad) = values.iter().find(|v| v.render().is_err()) {
            return Err(BuildError::Unstringifiable { token: "ListToken",
                                                     found: bad.type_name() });
        }

        let last = i64::try_from(values.len() - 1).map_err(|_| BuildError::InvalidBounds { details: "list is too long to index".to_string() })?;
        let counter = if last == 0 { None } else { Some(BoundedCounter::starting(0, last, 1)?) };

        Ok(Self { values: Rc::new(values),
                  counter })
    }

    /// The values stepped through.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Index of the current element.
    #[must_use]
    pub fn index(&self) -> usize {
        self.counter
            .and_then(|c| usize::try_from(c.value()).ok())
            .unwrap_or(0)
    }

    /// Renders the current element.
    ///
    /// # Errors
    /// Only fails for an element whose cell or function fails when read.
    pub fn render(&self) -> EvalResult<String> {
        self.values
            .get(self.index())
            .map_or_else(|| Ok(String::new()), Value::render)
    }

    /// Moves to the next element, wrapping to the first.
    pub fn advance(&mut self) -> bool {
        self.counter.as_mut().is_some_and(BoundedCounter::advance)
    }

    /// Moves to the previous element, wrapping to the last.
    pub fn retreat(&mut self) -> bool {
        self.counter.as_mut().is_some_and(BoundedCounter::retreat)
    }

    /// Moves back to the first element.
    pub fn reset(&mut self) {
        if let Some(counter) = self.counter.as_mut() {
            counter.reset();
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn positions(&self) -> u64 {
        u64::try_from(self.values.len()).unwrap_or(u64::MAX)
    }

    pub(crate) fn describe(&self) -> String {
        format!("ListToken({})", Value::Array(Rc::clone(&self.values)).describe())
    }

    pub(crate) fn to_descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::List { values: self.values.to_vec() }
    }
}
