/// Represents a literal value in a link expression.
///
/// `LiteralValue` covers the constant values that can appear directly in an
/// expression: numbers, booleans and quoted strings.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A single- or double-quoted string literal, escapes already resolved.
    Str(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing a link expression.
///
/// The expression language is deliberately small: literals, names looked up
/// in the caller's bindings, arithmetic, comparison and logic operators,
/// calls, indexing and array literals. There are no statements, no
/// assignments and no built-in functions.
///
/// Every node records the byte offset it starts at, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal {
        value:    LiteralValue,
        position: usize,
    },
    /// A name resolved against the bindings at evaluation time.
    Variable {
        name:     String,
        position: usize,
    },
    /// A prefix operator applied to an operand.
    UnaryOp {
        op:       UnaryOperator,
        expr:     Box<Self>,
        position: usize,
    },
    /// An infix operator applied to two operands.
    BinaryOp {
        left:     Box<Self>,
        op:       BinaryOperator,
        right:    Box<Self>,
        position: usize,
    },
    /// A call of any callable expression, e.g. `f(x)` or `table[0](x)`.
    Call {
        callee:    Box<Self>,
        arguments: Vec<Self>,
        position:  usize,
    },
    /// An index into an array, string or map, e.g. `a[0]` or `m["k"]`.
    Index {
        target:   Box<Self>,
        index:    Box<Self>,
        position: usize,
    },
    /// An array literal, e.g. `[1, x, "a"]`.
    ArrayLiteral {
        elements: Vec<Self>,
        position: usize,
    },
}

impl Expr {
    /// Returns the byte offset where this node starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Call { position, .. }
            | Self::Index { position, .. }
            | Self::ArrayLiteral { position, .. } => *position,
        }
    }

    /// Returns the number of nodes on the longest path from this node down
    /// to a leaf. A lone literal has height 1.
    ///
    /// The walk keeps its own stack, so a tree of any shape can be measured.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];

        while let Some((expr, level)) = pending.pop() {
            deepest = deepest.max(level);
            match expr {
                Self::Literal { .. } | Self::Variable { .. } => {},
                Self::UnaryOp { expr, .. } => pending.push((&**expr, level + 1)),
                Self::BinaryOp { left, right, .. } => {
                    pending.push((&**left, level + 1));
                    pending.push((&**right, level + 1));
                },
                Self::Call { callee, arguments, .. } => {
                    pending.push((&**callee, level + 1));
                    pending.extend(arguments.iter().map(|arg| (arg, level + 1)));
                },
                Self::Index { target, index, .. } => {
                    pending.push((&**target, level + 1));
                    pending.push((&**index, level + 1));
                },
                Self::ArrayLiteral { elements, .. } => {
                    pending.extend(elements.iter().map(|el| (el, level + 1)));
                },
            }
        }

        deepest
    }
}

/// Infix operators, grouped by precedence in the parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

/// Prefix operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not"),
        }
    }
}
