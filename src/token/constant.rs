use crate::{
    descriptor::TokenDescriptor, error::BuildError, interpreter::value::core::Value,
};

/// A token that always renders the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstToken {
    value: String,
}

impl ConstToken {
    /// Creates a constant from anything with a string form.
    ///
    /// The value is rendered once, here, and the text is kept.
    ///
    /// # Errors
    /// `BuildError::Unstringifiable` if the value has no string form, e.g. a
    /// bare function.
    ///
    /// # Example
    /// ```
    /// use startrace::{interpreter::value::core::Value, token::constant::ConstToken};
    ///
    /// let token = ConstToken::new(Value::Integer(7)).unwrap();
    /// assert_eq!(token.value(), "7");
    /// ```
    pub fn new(value: impl Into<Value>) -> Result<Self, BuildError> {
        let value = value.into();
        let value = value.render()
                         .map_err(|_| BuildError::Unstringifiable { token: "ConstToken",
                                                                    found: value.type_name(), })?;
        Ok(Self { value })
    }

    /// The text this token renders.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of characters in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns `true` if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn describe(&self) -> String {
        format!("ConstToken({})", self.value)
    }

    pub(crate) fn to_descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::Const { value: Value::Str(self.value.clone()) }
    }
}
