//! Query functions and their argument bindings.
//!
//! A [`Function`] is a named, pure mapping from a property reference (and
//! possibly further arguments) to a predicate or a computed column. The
//! predicate members lower to backend query fragments; [`Function::PropertyAccessor`]
//! and [`Function::Score`] are the two members sort resolution recognises and
//! are the only ones with no query lowering of their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::argument::{Argument, Value};

/// Argument key naming the property a function operates on.
pub const ARG_PROPERTY: &str = "property";

/// Argument key naming the comparison value.
pub const ARG_VALUE: &str = "value";

/// Argument key carrying a boolean "negate this predicate" flag.
pub const ARG_NOT: &str = "not";

/// The closed set of functions the query model understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    /// Identity access to a property. Used in columns and ORDER BY; carries
    /// no predicate semantics of its own.
    PropertyAccessor,
    /// The relevance score pseudo-column. Like [`Self::PropertyAccessor`],
    /// only meaningful in columns and ORDER BY.
    Score,
    /// `property = value`.
    Equals,
    /// `property <> value`.
    NotEquals,
    /// `property < value`.
    LessThan,
    /// `property <= value`.
    LessThanOrEquals,
    /// `property > value`.
    GreaterThan,
    /// `property >= value`.
    GreaterThanOrEquals,
    /// The property has a value on the node.
    Exists,
    /// SQL `LIKE` pattern match against the property.
    Like,
    /// A full-text term or phrase, optionally scoped to a property.
    FtsTerm,
}

impl Function {
    /// The function's name as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::PropertyAccessor => "PropertyAccessor",
            Self::Score => "Score",
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::LessThan => "LessThan",
            Self::LessThanOrEquals => "LessThanOrEquals",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEquals => "GreaterThanOrEquals",
            Self::Exists => "Exists",
            Self::Like => "Like",
            Self::FtsTerm => "FtsTerm",
        }
    }
}

/// Name-keyed argument bindings attached to a function at parse time.
///
/// Keys are the `ARG_*` constants in this module. The map is ordered so that
/// serialized queries and error output are deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Arguments(BTreeMap<String, Argument>);

impl Arguments {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, replacing any existing one under the same key.
    pub fn with(mut self, name: impl Into<String>, argument: Argument) -> Self {
        self.0.insert(name.into(), argument);
        self
    }

    /// Looks up a binding by key.
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    /// Returns the property name bound under `name`, if the binding exists
    /// and is a property reference.
    pub fn property(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Argument::Property(property)) => Some(property),
            _ => None,
        }
    }

    /// Returns the literal bound under `name`, if the binding exists and is
    /// a literal.
    pub fn literal(&self, name: &str) -> Option<&Value> {
        match self.0.get(name) {
            Some(Argument::Literal(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether no bindings are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookups_filter_by_argument_kind() {
        let args = Arguments::new()
            .with(ARG_PROPERTY, Argument::property("cm:name"))
            .with(ARG_VALUE, Argument::string("report.txt"));

        assert_eq!(args.property(ARG_PROPERTY), Some("cm:name"));
        assert_eq!(args.property(ARG_VALUE), None);
        assert_eq!(
            args.literal(ARG_VALUE),
            Some(&Value::Str("report.txt".into()))
        );
        assert_eq!(args.literal(ARG_PROPERTY), None);
    }

    #[test]
    fn with_replaces_existing_binding() {
        let args = Arguments::new()
            .with(ARG_VALUE, Argument::int(1))
            .with(ARG_VALUE, Argument::int(2));
        assert_eq!(args.literal(ARG_VALUE), Some(&Value::Int(2)));
    }

    #[test]
    fn missing_binding_is_none() {
        let args = Arguments::new();
        assert!(args.is_empty());
        assert_eq!(args.get(ARG_PROPERTY), None);
    }
}
