use tracing::debug;

use crate::{
    ast::Expr,
    descriptor::TokenDescriptor,
    error::BuildError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        parser::core::parse,
        value::core::{Bindings, write_map_description},
    },
};

/// Construction options for a [`LinkToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    /// Must be `true`; a link cannot be built without opting in to
    /// expression evaluation.
    pub eval_allowed: bool,
    /// Evaluate the expression once at construction and fail early if it
    /// does not render. Turn off when bindings are filled in later.
    pub validate:     bool,
}

impl LinkOptions {
    /// Evaluation allowed, validated at construction.
    #[must_use]
    pub const fn allowed() -> Self {
        Self { eval_allowed: true,
               validate:     true, }
    }

    /// Same options with construction-time validation switched off.
    #[must_use]
    pub const fn without_validation(self) -> Self {
        Self { validate: false,
               ..self }
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self { eval_allowed: false,
               validate:     true, }
    }
}

/// A token whose text is the value of an expression over its bindings.
///
/// The expression is parsed once, at construction, and evaluated on every
/// render against the token's own copy of the bindings. The copy shares any
/// [`DynamicContext`](crate::context::DynamicContext) cells with the caller,
/// so setting a cell changes what the next render produces. Links never
/// advance.
///
/// Only names present in the bindings can be reached, and only functions
/// placed there can be called.
///
/// # Example
/// ```
/// use startrace::{
///     interpreter::value::core::{Bindings, Value},
///     token::link::{LinkOptions, LinkToken},
/// };
///
/// let mut bindings = Bindings::new();
/// bindings.insert("name".to_string(), Value::from("sensor"));
///
/// let token = LinkToken::new("name + '_7'", bindings, LinkOptions::allowed()).unwrap();
/// assert_eq!(token.render().unwrap(), "sensor_7");
///
/// assert!(LinkToken::new("name", Bindings::new(), LinkOptions::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinkToken {
    link:     String,
    expr:     Expr,
    bindings: Bindings,
    validate: bool,
}

impl LinkToken {
    /// Creates a link token.
    ///
    /// # Errors
    /// - `BuildError::EvalNotAllowed` unless `options.eval_allowed` is set.
    /// - `BuildError::EmptyLink` for a blank expression.
    /// - `BuildError::InvalidLink` if the expression does not parse.
    /// - `BuildError::LinkValidation` if validation is on and the first
    ///   evaluation fails or does not render.
    pub fn new(link: &str, bindings: Bindings, options: LinkOptions) -> Result<Self, BuildError> {
        if !options.eval_allowed {
            return Err(BuildError::EvalNotAllowed);
        }
        if link.trim().is_empty() {
            return Err(BuildError::EmptyLink);
        }

        let expr = parse(link).map_err(|source| BuildError::InvalidLink { link: link.to_string(),
                                                                          source })?;
        let token = Self { link: link.to_string(),
                           expr,
                           bindings,
                           validate: options.validate };

        if options.validate {
            debug!(link, bindings = token.bindings.len(), "validating link");
            token.render()
                 .map_err(|source| BuildError::LinkValidation { link: token.link.clone(),
                                                                source })?;
        }
        Ok(token)
    }

    /// The expression source.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// The names visible to the expression.
    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Evaluates the expression and renders the result.
    ///
    /// # Errors
    /// Any `EvalError`: an unbound name, a failing host function, a type
    /// mismatch, or a result with no string form.
    pub fn render(&self) -> EvalResult<String> {
        Evaluator::new(&self.bindings).eval_to_string(&self.expr)
    }

    pub(crate) fn describe(&self) -> String {
        let mut context = String::new();
        write_map_description(&self.bindings, &mut context);
        format!("LinkToken({}, {context})", self.link)
    }

    /// Snapshots the bindings by value. Cells inside them stay shared.
    pub(crate) fn to_descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::Link { link:         self.link.clone(),
                                context:      Some(self.bindings.clone()),
                                eval_allowed: Some(true),
                                validate:     self.validate, }
    }
}
