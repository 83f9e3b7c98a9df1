//! Query sources and selectors.
//!
//! A [`Selector`] names one "table" in the FROM-equivalent clause of the
//! query model: an alias plus the node type it selects. A [`Source`] is the
//! ordered collection of selectors a query draws from. Both are built once by
//! the parser and read-only during compilation.

use serde::{Deserialize, Serialize};

use crate::{constraint::Constraint, ordering::Column, ordering::Ordering};

/// A named reference to a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// The alias the query refers to this selector by.
    pub alias: String,
    /// The node type this selector filters to. An empty type means the
    /// selector places no restriction and lowers to no fragment.
    pub node_type: String,
}

impl Selector {
    /// Creates a selector.
    pub fn new(alias: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            node_type: node_type.into(),
        }
    }
}

/// The ordered set of selectors a query draws from.
///
/// Iteration order is the order selectors were declared in, which keeps
/// compiled output deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Source {
    /// Selectors in declaration order.
    selectors: Vec<Selector>,
}

impl Source {
    /// Creates a source over the given selectors.
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// The selectors in declaration order.
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Looks a selector up by alias.
    pub fn selector(&self, alias: &str) -> Option<&Selector> {
        self.selectors.iter().find(|s| s.alias == alias)
    }
}

/// A complete parsed query: sources, an optional root constraint, orderings,
/// and the projected columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The FROM-equivalent clause.
    pub source: Source,
    /// The WHERE-equivalent constraint tree, if any.
    pub constraint: Option<Constraint>,
    /// ORDER BY entries, primary key first.
    pub orderings: Vec<Ordering>,
    /// Projected columns. Not consumed by compilation; carried for the
    /// result-assembly layer.
    pub columns: Vec<Column>,
}

impl Query {
    /// Creates a query over a source with no constraint, orderings, or
    /// columns.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            constraint: None,
            orderings: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Sets the root constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Sets the orderings.
    pub fn with_orderings(mut self, orderings: Vec<Ordering>) -> Self {
        self.orderings = orderings;
        self
    }
}
