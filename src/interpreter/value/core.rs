use std::{collections::BTreeMap, fmt::Write as _, rc::Rc};

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{
    context::{DynamicContext, MAX_CELL_DEPTH, cells_too_deep},
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
};

/// Names and values visible to a link expression.
///
/// Ordered so that descriptors serialize deterministically.
pub type Bindings = BTreeMap<String, Value>;

/// Represents a value that can be rendered, bound or produced by an
/// expression.
///
/// List elements, range bounds, binding entries and expression results are
/// all `Value`s. Containers are reference counted so cloning a binding map is
/// cheap and shares its contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A text value.
    Str(String),
    /// An ordered sequence of values.
    Array(Rc<Vec<Self>>),
    /// A string-keyed table of values.
    Map(Rc<BTreeMap<String, Self>>),
    /// A host function, callable from an expression.
    Function(Function),
    /// A shared mutable cell whose contents are read at evaluation time.
    Cell(DynamicContext),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(v: BTreeMap<String, Self>) -> Self {
        Self::Map(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Self::Function(v)
    }
}

impl From<DynamicContext> for Value {
    fn from(v: DynamicContext) -> Self {
        Self::Cell(v)
    }
}

impl Value {
    /// Builds an array value from anything convertible to values.
    ///
    /// # Example
    /// ```
    /// use startrace::interpreter::value::core::Value;
    ///
    /// let v = Value::array([1, 2, 3]);
    /// assert_eq!(v.render().unwrap(), "[1, 2, 3]");
    /// ```
    pub fn array<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Returns the name of this value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Function(_) => "function",
            Self::Cell(_) => "cell",
        }
    }

    /// Returns `true` if the value is [`Value::Integer`] or [`Value::Real`].
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Reads through any cells to the value they currently hold.
    ///
    /// Non-cell values are returned unchanged. Held functions are not
    /// invoked.
    ///
    /// # Errors
    /// Returns `EvalError::TypeError` if cells are nested too deeply, which
    /// only happens when a cell ends up holding itself.
    pub fn deref_cells(&self) -> EvalResult<Self> {
        DynamicContext::peel(self.clone())
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(EvalError::TypeError { details: format!("expected bool, found {}",
                                                                 other.type_name()) }),
        }
    }

    /// Renders the value as the text a token contributes to a pattern.
    ///
    /// - integers in decimal, reals in shortest round-trip form with a
    ///   fractional part (`2.0`, `0.5`),
    /// - booleans as `true` / `false`, strings verbatim,
    /// - arrays as `[a, b]` and maps as `{"k": v}`, with nested strings
    ///   quoted,
    /// - cells by resolving them: a held function is invoked with no
    ///   arguments and its result rendered.
    ///
    /// # Errors
    /// - `EvalError::Unstringifiable` for a bare function.
    /// - Any error raised while resolving a cell.
    ///
    /// # Example
    /// ```
    /// use startrace::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(2.0).render().unwrap(), "2.0");
    /// assert_eq!(Value::from("a").render().unwrap(), "a");
    /// assert_eq!(Value::array(["a", "b"]).render().unwrap(), r#"["a", "b"]"#);
    /// ```
    pub fn render(&self) -> EvalResult<String> {
        match self {
            Self::Str(s) => Ok(s.clone()),
            Self::Cell(cell) => cell.render(),
            _ => {
                let mut out = String::new();
                self.write_nested(&mut out, 0)?;
                Ok(out)
            },
        }
    }

    /// Formats the value for display in a token description.
    ///
    /// Unlike [`Value::render`] this never fails and never invokes anything:
    /// strings are quoted, functions show as `<function>` and cells as
    /// `Cell(held)`.
    ///
    /// # Example
    /// ```
    /// use startrace::{context::DynamicContext, interpreter::value::core::Value};
    ///
    /// let cell = Value::Cell(DynamicContext::new(3));
    /// assert_eq!(Value::array([Value::from("a"), cell]).describe(),
    ///            r#"["a", Cell(3)]"#);
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.write_description(&mut out, 0);
        out
    }

    /// `depth` counts the cells already passed through; past the limit a
    /// cell shows as `Cell(...)`.
    fn write_description(&self, out: &mut String, depth: usize) {
        match self {
            Self::Array(items) => {
                out.push('[');
                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    value.write_description(out, depth);
                }
                out.push(']');
            },
            Self::Map(entries) => write_entries_description(entries, out, depth),
            Self::Function(_) => out.push_str("<function>"),
            Self::Cell(_) if depth >= MAX_CELL_DEPTH => out.push_str("Cell(...)"),
            Self::Cell(cell) => {
                out.push_str("Cell(");
                cell.get().write_description(out, depth + 1);
                out.push(')');
            },
            scalar => {
                let _ = scalar.write_nested(out, depth);
            },
        }
    }

    /// Writes the value into `out`, quoting strings.
    ///
    /// `depth` counts the cells already passed through.
    fn write_nested(&self, out: &mut String, depth: usize) -> EvalResult<()> {
        match self {
            Self::Integer(n) => {
                let _ = write!(out, "{n}");
            },
            Self::Real(r) => {
                let _ = write!(out, "{r:?}");
            },
            Self::Bool(b) => {
                let _ = write!(out, "{b}");
            },
            Self::Str(s) => {
                let _ = write!(out, "{s:?}");
            },
            Self::Array(items) => {
                out.push('[');
                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    value.write_nested(out, depth)?;
                }
                out.push(']');
            },
            Self::Map(entries) => {
                out.push('{');
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{key:?}: ");
                    value.write_nested(out, depth)?;
                }
                out.push('}');
            },
            Self::Function(_) => return Err(EvalError::Unstringifiable { found: "function" }),
            Self::Cell(_) if depth >= MAX_CELL_DEPTH => return Err(cells_too_deep()),
            Self::Cell(cell) => cell.resolve()?.write_nested(out, depth + 1)?,
        }
        Ok(())
    }
}

/// Writes `{"key": value, ...}` using value descriptions.
pub(crate) fn write_map_description(entries: &BTreeMap<String, Value>, out: &mut String) {
    write_entries_description(entries, out, 0);
}

fn write_entries_description(entries: &BTreeMap<String, Value>, out: &mut String, depth: usize) {
    out.push('{');
    for (index, (key, value)) in entries.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{key:?}: ");
        value.write_description(out, depth);
    }
    out.push('}');
}

/// Serializes plain data; cells are serialized as the value they hold.
///
/// Functions have no data form and fail to serialize, as do cells nested
/// past the read limit.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Nested { value: self,
                 depth: 0, }.serialize(serializer)
    }
}

/// A value being serialized below `depth` cells.
struct Nested<'a> {
    value: &'a Value,
    depth: usize,
}

impl Nested<'_> {
    const fn child<'b>(&self, value: &'b Value) -> Nested<'b> {
        Nested { value,
                 depth: self.depth }
    }
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            },
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries.iter() {
                    map.serialize_entry(key, &self.child(value))?;
                }
                map.end()
            },
            Value::Function(_) => Err(S::Error::custom("function values cannot be serialized")),
            Value::Cell(_) if self.depth >= MAX_CELL_DEPTH => Err(S::Error::custom(cells_too_deep())),
            Value::Cell(cell) => {
                let held = cell.get();
                Nested { value: &held,
                         depth: self.depth + 1, }.serialize(serializer)
            },
        }
    }
}
