//! Boolean constraint trees.
//!
//! A [`Constraint`] is one node in the boolean expression tree produced by a
//! query parser (CMIS SQL, FTS). Each node carries an occurrence tag and a
//! boost multiplier alongside its actual shape, so `NOT cm:name:'x'` and
//! `cm:name:'x'` share a [`ConstraintKind`] and differ only in [`Occur`].

use serde::{Deserialize, Serialize};

use crate::{
    function::{Arguments, Function},
    source::Selector,
};

/// Neutral boost applied when a constraint carries no explicit weighting.
pub const DEFAULT_BOOST: f32 = 1.0;

/// How a constraint participates in its enclosing boolean group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occur {
    /// No explicit tag was given; treated exactly like [`Occur::Mandatory`].
    Default,
    /// The constraint must match.
    Mandatory,
    /// The constraint may match; it contributes to scoring only.
    Optional,
    /// The constraint must not match.
    Exclude,
}

impl Occur {
    /// Whether this tag means "must match".
    pub fn is_mandatory(self) -> bool {
        matches!(self, Self::Default | Self::Mandatory)
    }
}

/// One node in a boolean constraint tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// How this node combines into its parent group.
    pub occur: Occur,
    /// Relevance multiplier for this node's fragment. Must be positive.
    pub boost: f32,
    /// The shape of the node.
    pub kind: ConstraintKind,
}

/// The shape of a constraint node.
///
/// This is the closed set of things the compiler knows how to lower. Child
/// order inside the boolean variants is preserved for deterministic output;
/// it carries no semantic weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// AND of all children.
    Conjunction(Vec<Constraint>),
    /// OR of all children.
    Disjunction(Vec<Constraint>),
    /// A predicate function applied to its parse-time argument bindings.
    Functional {
        /// The wrapped function.
        function: Function,
        /// The bindings the parser attached to this constraint. These, not
        /// any caller-supplied map, are what the function is evaluated with.
        arguments: Arguments,
    },
    /// A FROM-clause selector used directly as a filter conjunct.
    Selector(Selector),
}

impl Constraint {
    /// Wraps a kind with the default occurrence and a neutral boost.
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            occur: Occur::Default,
            boost: DEFAULT_BOOST,
            kind,
        }
    }

    /// Builds a conjunction node over `children`.
    pub fn conjunction(children: Vec<Self>) -> Self {
        Self::new(ConstraintKind::Conjunction(children))
    }

    /// Builds a disjunction node over `children`.
    pub fn disjunction(children: Vec<Self>) -> Self {
        Self::new(ConstraintKind::Disjunction(children))
    }

    /// Builds a functional constraint from a function and its bindings.
    pub fn functional(function: Function, arguments: Arguments) -> Self {
        Self::new(ConstraintKind::Functional {
            function,
            arguments,
        })
    }

    /// Builds a selector-backed constraint.
    pub fn selector(selector: Selector) -> Self {
        Self::new(ConstraintKind::Selector(selector))
    }

    /// Sets the occurrence tag.
    pub fn with_occur(mut self, occur: Occur) -> Self {
        self.occur = occur;
        self
    }

    /// Sets the boost multiplier. Values must be greater than zero; a boost
    /// of [`DEFAULT_BOOST`] leaves scoring untouched.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}
