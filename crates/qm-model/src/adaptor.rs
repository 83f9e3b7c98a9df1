//! Backend adaptor traits.
//!
//! The compiler never touches a search engine directly. It drives a
//! [`SearchAdaptor`], which hands out fresh [`ExpressionAdaptor`] accumulators
//! (one per boolean grouping scope) and builds the leaf fragments predicates
//! lower to. Fragments are opaque to the compiler: it only ever passes them
//! back into adaptors.

use crate::{argument::Value, ordering::SortDefinition, source::Selector};

/// A scoped accumulator combining fragments into one boolean group.
///
/// One adaptor backs exactly one conjunction, disjunction, or top-level
/// query scope. [`ExpressionAdaptor::into_query`] consumes the adaptor, so a
/// drained scope cannot be reused or drained twice.
pub trait ExpressionAdaptor {
    /// The backend's fragment type.
    type Fragment;

    /// Adds a fragment that must match.
    fn add_required(&mut self, fragment: Self::Fragment, boost: f32);

    /// Adds a fragment that may match.
    fn add_optional(&mut self, fragment: Self::Fragment, boost: f32);

    /// Adds a fragment that must not match.
    fn add_excluded(&mut self, fragment: Self::Fragment, boost: f32);

    /// Drains the accumulated state into one combined fragment.
    ///
    /// An adaptor that received no fragments yields the backend's
    /// match-nothing query.
    fn into_query(self) -> Self::Fragment;
}

/// A search backend, as seen by the query compiler.
///
/// The associated `Error` type is how backend failures cross the compiler
/// without translation: every lowering call that reaches the backend
/// surfaces them verbatim inside the compiler's `Backend` error variant.
pub trait SearchAdaptor {
    /// Opaque backend query fragment.
    type Fragment;
    /// Backend-native sort object.
    type Sort;
    /// Backend failure type, propagated verbatim.
    type Error: std::error::Error;
    /// The accumulator this backend hands out.
    type Expr: ExpressionAdaptor<Fragment = Self::Fragment>;

    /// Creates a fresh accumulator for one boolean grouping scope.
    fn expression_adaptor(&self) -> Self::Expr;

    /// The fragment matching every node. Used to anchor pure-negative
    /// groups ("everything except X").
    fn match_all(&self) -> Self::Fragment;

    /// Builds an exact-match fragment for `field = value`.
    ///
    /// `Ok(None)` means the predicate needs no query (it matches through
    /// other means or trivially contributes nothing); it is not an error.
    fn term_query(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Option<Self::Fragment>, Self::Error>;

    /// Builds a range fragment over `field`. At least one bound is given.
    fn range_query(
        &self,
        field: &str,
        lower: Option<&Value>,
        upper: Option<&Value>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Result<Option<Self::Fragment>, Self::Error>;

    /// Builds a fragment matching nodes that carry any value for `field`.
    fn exists_query(&self, field: &str) -> Result<Option<Self::Fragment>, Self::Error>;

    /// Builds a fragment for a SQL `LIKE` pattern over `field`.
    fn like_query(&self, field: &str, pattern: &str)
    -> Result<Option<Self::Fragment>, Self::Error>;

    /// Builds a full-text fragment for `text` over `field`, applying the
    /// backend's analysis. Text that analyses to nothing yields `Ok(None)`.
    fn text_query(&self, field: &str, text: &str)
    -> Result<Option<Self::Fragment>, Self::Error>;

    /// Lowers a selector to its filter fragment, typically a type filter.
    /// Selectors placing no restriction yield `Ok(None)`.
    fn selector_query(&self, selector: &Selector)
    -> Result<Option<Self::Fragment>, Self::Error>;

    /// Builds a backend-native sort object from resolved sort keys.
    ///
    /// The compiler resolves property names through the function context
    /// before delegating, so `definitions` carry backend field names
    /// already.
    fn build_sort(
        &self,
        definitions: &[SortDefinition],
    ) -> Result<Option<Self::Sort>, Self::Error>;
}
