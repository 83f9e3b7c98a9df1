//! Columns, orderings, and resolved sort definitions.
//!
//! An [`Ordering`] pairs a [`Column`] with a direction. Sort resolution turns
//! a list of orderings into [`SortDefinition`]s: backend-neutral (kind,
//! field, direction) triples the search execution layer consumes.

use serde::{Deserialize, Serialize};

use crate::function::{Arguments, Function};

/// A projected or sorted-on column: a function plus its argument bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// The function computing the column.
    pub function: Function,
    /// The function's argument bindings.
    pub arguments: Arguments,
    /// The alias the column is exposed under.
    pub alias: String,
}

impl Column {
    /// Creates a column.
    pub fn new(function: Function, arguments: Arguments, alias: impl Into<String>) -> Self {
        Self {
            function,
            arguments,
            alias: alias.into(),
        }
    }
}

/// Sort direction for one ordering entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest (or least relevant) first.
    Ascending,
    /// Largest (or most relevant) first.
    Descending,
}

impl SortDirection {
    /// Whether this is an ascending sort.
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// One ORDER BY entry. List position defines precedence: the first ordering
/// is the primary sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ordering {
    /// The column being sorted on.
    pub column: Column,
    /// The direction to sort in.
    pub direction: SortDirection,
}

impl Ordering {
    /// Creates an ordering.
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// What a resolved sort key sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKind {
    /// Sort on a backend field's values.
    Field,
    /// Sort on the relevance score.
    Score,
}

/// A resolved, backend-neutral sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDefinition {
    /// What the key sorts by.
    pub kind: SortKind,
    /// The backend field name for [`SortKind::Field`] keys; `None` for
    /// score sorts.
    pub field: Option<String>,
    /// Whether the key sorts ascending.
    pub ascending: bool,
}

impl SortDefinition {
    /// Creates a field sort key.
    pub fn field(field: impl Into<String>, ascending: bool) -> Self {
        Self {
            kind: SortKind::Field,
            field: Some(field.into()),
            ascending,
        }
    }

    /// Creates a score sort key.
    pub fn score(ascending: bool) -> Self {
        Self {
            kind: SortKind::Score,
            field: None,
            ascending,
        }
    }
}
