use std::{collections::BTreeMap, rc::Rc};

use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

use crate::{
    context::MAX_CELL_DEPTH,
    error::DescriptorError,
    interpreter::value::core::{Bindings, Value},
};

/// Plain-data description of one token.
///
/// The JSON form is an object with a `type` tag (`const`, `list`, `range`,
/// `time` or `link`) and the fields of that variant:
///
/// ```json
/// {"type": "range", "start": 0, "end": 9, "step": 1}
/// ```
///
/// Build the live token with
/// [`Token::from_descriptor`](crate::token::Token::from_descriptor).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TokenDescriptor {
    Const {
        value: Value,
    },
    List {
        values: Vec<Value>,
    },
    Range {
        start: Value,
        end:   Value,
        step:  Value,
    },
    Time {
        mode: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fmt:  Option<String>,
    },
    Link {
        link:         String,
        /// Bindings for this token; `None` leaves them to the pattern.
        #[serde(skip_serializing_if = "Option::is_none")]
        context:      Option<Bindings>,
        /// `None` leaves the choice to the pattern.
        #[serde(skip_serializing_if = "Option::is_none")]
        eval_allowed: Option<bool>,
        #[serde(skip_serializing_if = "is_true")]
        validate:     bool,
    },
}

/// Plain-data description of a pattern.
///
/// ```json
/// {
///   "tokens": [{"type": "link", "link": "y(x)"}, {"type": "const", "value": "_"}],
///   "global_context": {"x": 10},
///   "eval_allowed": true
/// }
/// ```
///
/// `global_context` and `eval_allowed` are defaults for the link tokens; both
/// may be omitted from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PatternDescriptor {
    pub tokens:         Vec<TokenDescriptor>,
    pub global_context: Bindings,
    pub eval_allowed:   bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_true(b: &bool) -> bool {
    *b
}

impl TokenDescriptor {
    /// A link descriptor that takes its bindings and permission from the
    /// pattern.
    #[must_use]
    pub fn link(link: &str) -> Self {
        Self::Link { link:         link.to_string(),
                     context:      None,
                     eval_allowed: None,
                     validate:     true, }
    }

    /// The `type` tag of this descriptor.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Const { .. } => "const",
            Self::List { .. } => "list",
            Self::Range { .. } => "range",
            Self::Time { .. } => "time",
            Self::Link { .. } => "link",
        }
    }

    /// Reads a descriptor from a JSON object.
    ///
    /// # Errors
    /// - `DescriptorError::MissingType` / `UnknownType` for a bad tag.
    /// - `DescriptorError::MissingField` naming a required field that is
    ///   absent.
    /// - `DescriptorError::InvalidField` naming a field of the wrong shape.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use startrace::{descriptor::TokenDescriptor, interpreter::value::core::Value};
    ///
    /// let d = TokenDescriptor::from_json(&json!({"type": "list", "values": [1, "b"]})).unwrap();
    /// assert_eq!(d,
    ///            TokenDescriptor::List { values: vec![Value::Integer(1), Value::from("b")] });
    ///
    /// let err = TokenDescriptor::from_json(&json!({"type": "range", "start": 0, "end": 3}));
    /// assert_eq!(err.unwrap_err().to_string(),
    ///            "Descriptor of type 'range' is missing required field 'step'.");
    /// ```
    pub fn from_json(json: &Json) -> Result<Self, DescriptorError> {
        let object = json.as_object()
                         .ok_or_else(|| DescriptorError::InvalidField { field:    "token".to_string(),
                                                                        expected: "an object", })?;
        let kind = match object.get("type") {
            None => return Err(DescriptorError::MissingType),
            Some(Json::String(kind)) => kind.as_str(),
            Some(_) => {
                return Err(DescriptorError::InvalidField { field:    "type".to_string(),
                                                           expected: "a string", });
            },
        };

        let fields = Fields { kind: kind_name(kind)?,
                              object };
        match fields.kind {
            "const" => Ok(Self::Const { value: fields.value("value")? }),
            "list" => {
                let values = match fields.required("values")? {
                    Json::Array(items) => items.iter()
                                               .enumerate()
                                               .map(|(i, item)| value_from_json(item, &format!("values[{i}]")))
                                               .collect::<Result<_, _>>()?,
                    _ => {
                        return Err(DescriptorError::InvalidField { field:    "values".to_string(),
                                                                   expected: "an array", });
                    },
                };
                Ok(Self::List { values })
            },
            "range" => Ok(Self::Range { start: fields.value("start")?,
                                        end:   fields.value("end")?,
                                        step:  fields.value("step")?, }),
            "time" => Ok(Self::Time { mode: fields.string("mode")?,
                                      fmt:  fields.optional_string("fmt")?, }),
            _ => Ok(Self::Link { link:         fields.string("link")?,
                                 context:      fields.optional_bindings("context")?,
                                 eval_allowed: fields.optional_bool("eval_allowed")?,
                                 validate:     fields.optional_bool("validate")?.unwrap_or(true), }),
        }
    }

    /// Parses a descriptor from JSON text.
    ///
    /// # Errors
    /// `DescriptorError::Json` for malformed text, then anything
    /// [`TokenDescriptor::from_json`] returns.
    pub fn from_json_str(text: &str) -> Result<Self, DescriptorError> {
        Self::from_json(&serde_json::from_str(text)?)
    }

    /// Writes the descriptor as a JSON object.
    ///
    /// Cells are written as the value they hold right now.
    ///
    /// # Errors
    /// `DescriptorError::Unserializable` naming the first field that holds a
    /// function.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use startrace::token::Token;
    ///
    /// let token = Token::range(0, 9, 3).unwrap();
    /// assert_eq!(token.to_descriptor().to_json().unwrap(),
    ///            json!({"type": "range", "start": 0, "end": 9, "step": 3}));
    /// ```
    pub fn to_json(&self) -> Result<Json, DescriptorError> {
        self.check_serializable()?;
        Ok(serde_json::to_value(self)?)
    }

    fn check_serializable(&self) -> Result<(), DescriptorError> {
        match self {
            Self::Const { value } => check_value(value, "value"),
            Self::List { values } => values.iter()
                                           .enumerate()
                                           .try_for_each(|(i, v)| check_value(v, &format!("values[{i}]"))),
            Self::Range { start, end, step } => {
                check_value(start, "start")?;
                check_value(end, "end")?;
                check_value(step, "step")
            },
            Self::Time { .. } => Ok(()),
            Self::Link { context, .. } => check_bindings(context.iter().flatten(), "context"),
        }
    }
}

impl PatternDescriptor {
    /// Replaces the pattern-level bindings.
    #[must_use]
    pub fn with_global_context(self, global_context: Bindings) -> Self {
        Self { global_context,
               ..self }
    }

    /// Replaces the pattern-level evaluation permission.
    #[must_use]
    pub fn with_eval_allowed(self, eval_allowed: bool) -> Self {
        Self { eval_allowed,
               ..self }
    }

    /// Applies the pattern defaults to one token descriptor.
    ///
    /// Non-link descriptors are returned unchanged. A link gets
    /// `global_context` overlaid with its own `context` (its own entries
    /// win) and, if it has none of its own, the pattern's `eval_allowed`.
    ///
    /// # Example
    /// ```
    /// use startrace::{
    ///     descriptor::{PatternDescriptor, TokenDescriptor},
    ///     interpreter::value::core::{Bindings, Value},
    /// };
    ///
    /// let mut global = Bindings::new();
    /// global.insert("x".to_string(), Value::Integer(1));
    /// global.insert("y".to_string(), Value::Integer(2));
    /// let mut own = Bindings::new();
    /// own.insert("y".to_string(), Value::Integer(3));
    ///
    /// let pattern = PatternDescriptor::default().with_global_context(global)
    ///                                           .with_eval_allowed(true);
    /// let link = TokenDescriptor::Link { link:         "x + y".to_string(),
    ///                                    context:      Some(own),
    ///                                    eval_allowed: None,
    ///                                    validate:     true, };
    ///
    /// let TokenDescriptor::Link { context, eval_allowed, .. } = pattern.resolve(&link) else {
    ///     unreachable!()
    /// };
    /// let context = context.unwrap();
    /// assert_eq!(context["x"], Value::Integer(1));
    /// assert_eq!(context["y"], Value::Integer(3));
    /// assert_eq!(eval_allowed, Some(true));
    /// ```
    #[must_use]
    pub fn resolve(&self, token: &TokenDescriptor) -> TokenDescriptor {
        let TokenDescriptor::Link { link,
                                    context,
                                    eval_allowed,
                                    validate, } = token
        else {
            return token.clone();
        };

        let mut bindings = self.global_context.clone();
        bindings.extend(context.iter().flatten().map(|(k, v)| (k.clone(), v.clone())));

        TokenDescriptor::Link { link:         link.clone(),
                                context:      Some(bindings),
                                eval_allowed: Some(eval_allowed.unwrap_or(self.eval_allowed)),
                                validate:     *validate, }
    }

    /// Reads a pattern descriptor from a JSON object.
    ///
    /// `global_context` defaults to empty and `eval_allowed` to `false`.
    ///
    /// # Errors
    /// `DescriptorError` naming the offending field; token errors name the
    /// token's own field.
    pub fn from_json(json: &Json) -> Result<Self, DescriptorError> {
        let object = json.as_object()
                         .ok_or_else(|| DescriptorError::InvalidField { field:    "pattern".to_string(),
                                                                        expected: "an object", })?;
        let fields = Fields { kind: "pattern",
                              object };

        let tokens = match fields.required("tokens")? {
            Json::Array(items) => items.iter()
                                       .map(TokenDescriptor::from_json)
                                       .collect::<Result<_, _>>()?,
            _ => {
                return Err(DescriptorError::InvalidField { field:    "tokens".to_string(),
                                                           expected: "an array", });
            },
        };

        Ok(Self { tokens,
                  global_context: fields.optional_bindings("global_context")?.unwrap_or_default(),
                  eval_allowed: fields.optional_bool("eval_allowed")?.unwrap_or(false) })
    }

    /// Parses a pattern descriptor from JSON text.
    ///
    /// # Errors
    /// `DescriptorError::Json` for malformed text, then anything
    /// [`PatternDescriptor::from_json`] returns.
    ///
    /// # Example
    /// ```
    /// use startrace::descriptor::PatternDescriptor;
    ///
    /// let d = PatternDescriptor::from_json_str(r#"{"tokens": [{"type": "const", "value": "a"}]}"#)
    ///             .unwrap();
    /// assert_eq!(d.tokens.len(), 1);
    /// assert!(!d.eval_allowed);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, DescriptorError> {
        Self::from_json(&serde_json::from_str(text)?)
    }

    /// Writes the pattern descriptor as a JSON object.
    ///
    /// # Errors
    /// `DescriptorError::Unserializable` naming the first field that holds a
    /// function.
    pub fn to_json(&self) -> Result<Json, DescriptorError> {
        for token in &self.tokens {
            token.check_serializable()?;
        }
        check_bindings(self.global_context.iter(), "global_context")?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Field access on one JSON object, with errors that name the field.
struct Fields<'a> {
    kind:   &'static str,
    object: &'a Map<String, Json>,
}

impl<'a> Fields<'a> {
    fn required(&self, field: &'static str) -> Result<&'a Json, DescriptorError> {
        self.object
            .get(field)
            .ok_or(DescriptorError::MissingField { kind: self.kind,
                                                   field })
    }

    fn value(&self, field: &'static str) -> Result<Value, DescriptorError> {
        value_from_json(self.required(field)?, field)
    }

    fn string(&self, field: &'static str) -> Result<String, DescriptorError> {
        match self.required(field)? {
            Json::String(s) => Ok(s.clone()),
            _ => Err(DescriptorError::InvalidField { field:    field.to_string(),
                                                     expected: "a string", }),
        }
    }

    fn optional_string(&self, field: &'static str) -> Result<Option<String>, DescriptorError> {
        match self.object.get(field) {
            None | Some(Json::Null) => Ok(None),
            Some(Json::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(DescriptorError::InvalidField { field:    field.to_string(),
                                                           expected: "a string", }),
        }
    }

    fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, DescriptorError> {
        match self.object.get(field) {
            None | Some(Json::Null) => Ok(None),
            Some(Json::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(DescriptorError::InvalidField { field:    field.to_string(),
                                                           expected: "a boolean", }),
        }
    }

    fn optional_bindings(&self, field: &'static str) -> Result<Option<Bindings>, DescriptorError> {
        match self.object.get(field) {
            None | Some(Json::Null) => Ok(None),
            Some(Json::Object(entries)) => entries.iter()
                                                  .map(|(k, v)| {
                                                      Ok((k.clone(), value_from_json(v, &format!("{field}.{k}"))?))
                                                  })
                                                  .collect::<Result<_, _>>()
                                                  .map(Some),
            Some(_) => Err(DescriptorError::InvalidField { field:    field.to_string(),
                                                           expected: "an object", }),
        }
    }
}

fn kind_name(kind: &str) -> Result<&'static str, DescriptorError> {
    ["const", "list", "range", "time", "link"].into_iter()
                                               .find(|k| *k == kind)
                                               .ok_or_else(|| DescriptorError::UnknownType { name: kind.to_string() })
}

/// Converts plain JSON data into a [`Value`].
///
/// Integers that fit in `i64` stay integers; other numbers become reals.
///
/// # Errors
/// `DescriptorError::InvalidField` for `null`, which has no value form.
///
/// # Example
/// ```
/// use serde_json::json;
/// use startrace::{descriptor::value_from_json, interpreter::value::core::Value};
///
/// assert_eq!(value_from_json(&json!(2.5), "x").unwrap(), Value::Real(2.5));
/// assert_eq!(value_from_json(&json!([1]), "x").unwrap(), Value::array([1]));
/// assert!(value_from_json(&json!(null), "x").is_err());
/// ```
pub fn value_from_json(json: &Json, field: &str) -> Result<Value, DescriptorError> {
    Ok(match json {
        Json::Null => {
            return Err(DescriptorError::InvalidField { field:    field.to_string(),
                                                       expected: "a value other than null", });
        },
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number_from_json(n, field)?,
        Json::String(s) => Value::Str(s.clone()),
        Json::Array(items) => Value::Array(Rc::new(items.iter()
                                                        .enumerate()
                                                        .map(|(i, item)| value_from_json(item, &format!("{field}[{i}]")))
                                                        .collect::<Result<_, _>>()?)),
        Json::Object(entries) => {
            let map = entries.iter()
                             .map(|(k, v)| Ok((k.clone(), value_from_json(v, &format!("{field}.{k}"))?)))
                             .collect::<Result<BTreeMap<_, _>, DescriptorError>>()?;
            Value::Map(Rc::new(map))
        },
    })
}

fn number_from_json(n: &Number, field: &str) -> Result<Value, DescriptorError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Integer(i));
    }
    n.as_f64()
     .map(Value::Real)
     .ok_or_else(|| DescriptorError::InvalidField { field:    field.to_string(),
                                                    expected: "a representable number", })
}

/// Fails on the first function found in `value`, reading through cells.
fn check_value(value: &Value, field: &str) -> Result<(), DescriptorError> {
    check_nested(value, field, 0)
}

/// `depth` counts the cells already passed through.
fn check_nested(value: &Value, field: &str, depth: usize) -> Result<(), DescriptorError> {
    match value {
        Value::Function(_) => Err(DescriptorError::Unserializable { field: field.to_string(),
                                                                    found: "function", }),
        Value::Cell(_) if depth >= MAX_CELL_DEPTH => {
            Err(DescriptorError::Unserializable { field: field.to_string(),
                                                  found: "cell", })
        },
        Value::Cell(cell) => check_nested(&cell.get(), field, depth + 1),
        Value::Array(items) => items.iter()
                                    .enumerate()
                                    .try_for_each(|(i, v)| check_nested(v, &format!("{field}[{i}]"), depth)),
        Value::Map(entries) => entries.iter()
                                      .try_for_each(|(k, v)| check_nested(v, &format!("{field}.{k}"), depth)),
        Value::Integer(_) | Value::Real(_) | Value::Bool(_) | Value::Str(_) => Ok(()),
    }
}

fn check_bindings<'a>(entries: impl IntoIterator<Item = (&'a String, &'a Value)>,
                      field: &str)
                      -> Result<(), DescriptorError> {
    entries.into_iter()
           .try_for_each(|(k, v)| check_value(v, &format!("{field}.{k}")))
}
