//! Function argument values.
//!
//! Arguments bind a [`crate::function::Function`] to its operands at parse
//! time: the property it tests, the literal it compares against, or a
//! selector/list reference. They are plain values, immutable once built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single argument bound to a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Argument {
    /// A reference to a logical property (e.g. `cm:name`). Resolved to a
    /// backend field name through the function context during lowering.
    Property(String),
    /// A literal value.
    Literal(Value),
    /// A reference to a named selector in the query's source.
    Selector(String),
    /// An ordered list of arguments (e.g. the right-hand side of `IN`).
    List(Vec<Argument>),
}

impl Argument {
    /// Shorthand for a property argument.
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(name.into())
    }

    /// Shorthand for a string literal argument.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Value::Str(value.into()))
    }

    /// Shorthand for an integer literal argument.
    pub fn int(value: i64) -> Self {
        Self::Literal(Value::Int(value))
    }

    /// Shorthand for a boolean literal argument.
    pub fn bool(value: bool) -> Self {
        Self::Literal(Value::Bool(value))
    }
}

/// A literal value carried by an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A string literal.
    Str(String),
    /// A signed integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A boolean literal.
    Bool(bool),
}

impl Value {
    /// A short name for the value's type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }

    /// Returns the string contents if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean contents if this is a boolean literal.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
