//! Test helpers shared across qm-model unit tests.
//!
//! Kept behind `cfg(test)` to avoid leaking into the public API surface.
//! The mock backend produces structurally inspectable fragments so tests can
//! assert exactly which accumulator calls the compiler made.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    adaptor::{ExpressionAdaptor, SearchAdaptor},
    argument::Value,
    context::{FieldError, FunctionContext},
    ordering::SortDefinition,
    source::Selector,
};

/// Failure type for the mock backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("mock backend refused field {0:?}")]
pub struct MockError(pub String);

/// A structurally inspectable stand-in for a backend query fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum MockFragment {
    /// The match-all-nodes sentinel.
    MatchAll,
    /// A leaf predicate, rendered as text.
    Leaf(String),
    /// One drained boolean grouping scope. Within each category, clause
    /// order is the order of accumulator calls.
    Bool {
        /// `add_required` calls, with boosts.
        required: Vec<(MockFragment, f32)>,
        /// `add_optional` calls, with boosts.
        optional: Vec<(MockFragment, f32)>,
        /// `add_excluded` calls, with boosts.
        excluded: Vec<(MockFragment, f32)>,
    },
    /// A drained scope that received no fragments.
    Empty,
}

impl MockFragment {
    /// Shorthand for a leaf fragment.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }
}

/// Accumulator for one mock boolean scope.
#[derive(Debug, Default)]
pub struct MockExpression {
    /// Required clauses in call order.
    required: Vec<(MockFragment, f32)>,
    /// Optional clauses in call order.
    optional: Vec<(MockFragment, f32)>,
    /// Excluded clauses in call order.
    excluded: Vec<(MockFragment, f32)>,
}

impl ExpressionAdaptor for MockExpression {
    type Fragment = MockFragment;

    fn add_required(&mut self, fragment: MockFragment, boost: f32) {
        self.required.push((fragment, boost));
    }

    fn add_optional(&mut self, fragment: MockFragment, boost: f32) {
        self.optional.push((fragment, boost));
    }

    fn add_excluded(&mut self, fragment: MockFragment, boost: f32) {
        self.excluded.push((fragment, boost));
    }

    fn into_query(self) -> MockFragment {
        if self.required.is_empty() && self.optional.is_empty() && self.excluded.is_empty() {
            MockFragment::Empty
        } else {
            MockFragment::Bool {
                required: self.required,
                optional: self.optional,
                excluded: self.excluded,
            }
        }
    }
}

/// A native sort object for the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSort(pub Vec<SortDefinition>);

/// The mock search backend.
///
/// Leaf builders render predicates as text leaves. A term query against an
/// empty string value lowers to `None` (a predicate contributing nothing),
/// and any query against [`MockAdaptor::fail_field`] raises [`MockError`],
/// so tests can exercise both benign emptiness and backend failure.
#[derive(Debug, Default)]
pub struct MockAdaptor {
    /// Field name every leaf builder refuses with a [`MockError`].
    pub fail_field: Option<String>,
}

impl MockAdaptor {
    /// A backend that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that fails every leaf query against `field`.
    pub fn failing_on(field: impl Into<String>) -> Self {
        Self {
            fail_field: Some(field.into()),
        }
    }

    /// Raises the configured failure for `field`, if any.
    fn check(&self, field: &str) -> Result<(), MockError> {
        match &self.fail_field {
            Some(fail) if fail == field => Err(MockError(field.to_string())),
            _ => Ok(()),
        }
    }
}

impl SearchAdaptor for MockAdaptor {
    type Fragment = MockFragment;
    type Sort = MockSort;
    type Error = MockError;
    type Expr = MockExpression;

    fn expression_adaptor(&self) -> MockExpression {
        MockExpression::default()
    }

    fn match_all(&self) -> MockFragment {
        MockFragment::MatchAll
    }

    fn term_query(&self, field: &str, value: &Value) -> Result<Option<MockFragment>, MockError> {
        self.check(field)?;
        if value.as_str() == Some("") {
            return Ok(None);
        }
        Ok(Some(MockFragment::leaf(format!("term({field}={value})"))))
    }

    fn range_query(
        &self,
        field: &str,
        lower: Option<&Value>,
        upper: Option<&Value>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Result<Option<MockFragment>, MockError> {
        self.check(field)?;
        let low = lower.map_or("*".to_string(), ToString::to_string);
        let high = upper.map_or("*".to_string(), ToString::to_string);
        let open = if lower_inclusive { '[' } else { '(' };
        let close = if upper_inclusive { ']' } else { ')' };
        Ok(Some(MockFragment::leaf(format!(
            "range({field}:{open}{low},{high}{close})"
        ))))
    }

    fn exists_query(&self, field: &str) -> Result<Option<MockFragment>, MockError> {
        self.check(field)?;
        Ok(Some(MockFragment::leaf(format!("exists({field})"))))
    }

    fn like_query(&self, field: &str, pattern: &str) -> Result<Option<MockFragment>, MockError> {
        self.check(field)?;
        Ok(Some(MockFragment::leaf(format!("like({field}~{pattern})"))))
    }

    fn text_query(&self, field: &str, text: &str) -> Result<Option<MockFragment>, MockError> {
        self.check(field)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(MockFragment::leaf(format!("text({field}:{text})"))))
    }

    fn selector_query(&self, selector: &Selector) -> Result<Option<MockFragment>, MockError> {
        if selector.node_type.is_empty() {
            return Ok(None);
        }
        Ok(Some(MockFragment::leaf(format!(
            "type({})",
            selector.node_type
        ))))
    }

    fn build_sort(&self, definitions: &[SortDefinition]) -> Result<Option<MockSort>, MockError> {
        if definitions.is_empty() {
            return Ok(None);
        }
        Ok(Some(MockSort(definitions.to_vec())))
    }
}

/// A function context over a fixed property-to-field table.
#[derive(Debug, Default)]
pub struct MockContext {
    /// Property name to field name.
    fields: BTreeMap<String, String>,
    /// Field searched by unscoped full-text terms.
    default_field: String,
}

impl MockContext {
    /// A context with a `content` default field and no mappings.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            default_field: "content".to_string(),
        }
    }

    /// Adds a property-to-field mapping.
    pub fn with_field(mut self, property: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.insert(property.into(), field.into());
        self
    }
}

impl FunctionContext for MockContext {
    fn field_name(&self, property: &str) -> Result<String, FieldError> {
        self.fields
            .get(property)
            .cloned()
            .ok_or_else(|| FieldError::UnknownProperty(property.to_string()))
    }

    fn default_field_name(&self) -> &str {
        &self.default_field
    }
}
