//! Tantivy search adaptor.
//!
//! Implements the qm-model backend traits over Tantivy: boolean scopes
//! accumulate `(Occur, query)` clauses and drain into a `BooleanQuery`, and
//! leaf predicates lower to term, range, regex, exists, and phrase queries.

use std::ops::Bound;

use qm_model::{
    DEFAULT_BOOST, ExpressionAdaptor, SearchAdaptor, Selector, SortDefinition, SortKind, Value,
};
use tantivy::{
    Term,
    query::{
        AllQuery, BooleanQuery, BoostQuery, EmptyQuery, ExistsQuery, Occur, PhraseQuery, Query,
        RangeQuery, RegexQuery, TermQuery,
    },
    schema::{Field, FieldType, IndexRecordOption, Schema},
    tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer, TokenStream},
};

use crate::{
    error::TantivyQueryError,
    like::like_to_regex,
    sort::{TantivySort, TantivySortKey},
};

/// Accumulator for one boolean grouping scope.
///
/// Draining consumes the adaptor, so a scope cannot be reused once its
/// combined query has been taken.
#[derive(Default)]
pub struct TantivyExpressionAdaptor {
    /// Accumulated clauses in call order.
    clauses: Vec<(Occur, Box<dyn Query>)>,
}

impl ExpressionAdaptor for TantivyExpressionAdaptor {
    type Fragment = Box<dyn Query>;

    fn add_required(&mut self, fragment: Box<dyn Query>, boost: f32) {
        self.clauses.push((Occur::Must, boosted(fragment, boost)));
    }

    fn add_optional(&mut self, fragment: Box<dyn Query>, boost: f32) {
        self.clauses.push((Occur::Should, boosted(fragment, boost)));
    }

    fn add_excluded(&mut self, fragment: Box<dyn Query>, boost: f32) {
        self.clauses.push((Occur::MustNot, boosted(fragment, boost)));
    }

    fn into_query(self) -> Box<dyn Query> {
        if self.clauses.is_empty() {
            Box::new(EmptyQuery)
        } else {
            Box::new(BooleanQuery::new(self.clauses))
        }
    }
}

/// Wraps a fragment in a `BoostQuery` unless the boost is neutral.
fn boosted(fragment: Box<dyn Query>, boost: f32) -> Box<dyn Query> {
    if (boost - DEFAULT_BOOST).abs() < f32::EPSILON {
        fragment
    } else {
        Box::new(BoostQuery::new(fragment, boost))
    }
}

/// The Tantivy backend for the query compiler.
///
/// Holds the index schema so leaf builders can resolve and type-check
/// fields, plus the name of the field selectors filter on.
#[derive(Debug, Clone)]
pub struct TantivyAdaptor {
    /// The index schema.
    schema: Schema,
    /// The raw field carrying each node's type, used by selector filters.
    type_field: String,
}

impl TantivyAdaptor {
    /// Creates an adaptor over a schema. `type_field` names the field
    /// selector filters match against; it should be a raw (untokenized)
    /// field.
    pub fn new(schema: Schema, type_field: impl Into<String>) -> Self {
        Self {
            schema,
            type_field: type_field.into(),
        }
    }

    /// Resolves a field name against the schema.
    fn field(&self, name: &str) -> Result<Field, TantivyQueryError> {
        self.schema
            .get_field(name)
            .map_err(|_| TantivyQueryError::UnknownField(name.to_string()))
    }

    /// Builds a term of the field's value type from a literal.
    fn typed_term(&self, field: Field, value: &Value) -> Result<Term, TantivyQueryError> {
        let entry = self.schema.get_field_entry(field);
        match (entry.field_type(), value) {
            (FieldType::Str(_), Value::Str(text)) => Ok(Term::from_field_text(field, text)),
            (FieldType::I64(_), Value::Int(i)) => Ok(Term::from_field_i64(field, *i)),
            (FieldType::U64(_), Value::Int(i)) if *i >= 0 => {
                Ok(Term::from_field_u64(field, *i as u64))
            }
            (FieldType::F64(_), Value::Float(x)) => Ok(Term::from_field_f64(field, *x)),
            (FieldType::F64(_), Value::Int(i)) => Ok(Term::from_field_f64(field, *i as f64)),
            (FieldType::Bool(_), Value::Bool(b)) => Ok(Term::from_field_bool(field, *b)),
            (_, value) => Err(TantivyQueryError::ValueMismatch {
                field: entry.name().to_string(),
                value_kind: value.kind(),
            }),
        }
    }

    /// Turns an optional literal into a range bound.
    fn bound(
        &self,
        field: Field,
        value: Option<&Value>,
        inclusive: bool,
    ) -> Result<Bound<Term>, TantivyQueryError> {
        match value {
            None => Ok(Bound::Unbounded),
            Some(value) => {
                let term = self.typed_term(field, value)?;
                Ok(if inclusive {
                    Bound::Included(term)
                } else {
                    Bound::Excluded(term)
                })
            }
        }
    }

    /// Splits text into lowercased tokens the way the index's default
    /// analyzer would.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while let Some(token) = stream.next() {
            tokens.push(token.text.clone());
        }
        tokens
    }
}

impl SearchAdaptor for TantivyAdaptor {
    type Fragment = Box<dyn Query>;
    type Sort = TantivySort;
    type Error = TantivyQueryError;
    type Expr = TantivyExpressionAdaptor;

    fn expression_adaptor(&self) -> TantivyExpressionAdaptor {
        TantivyExpressionAdaptor::default()
    }

    fn match_all(&self) -> Box<dyn Query> {
        Box::new(AllQuery)
    }

    fn term_query(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        let field = self.field(field)?;
        let term = self.typed_term(field, value)?;
        Ok(Some(Box::new(TermQuery::new(
            term,
            IndexRecordOption::Basic,
        ))))
    }

    fn range_query(
        &self,
        field: &str,
        lower: Option<&Value>,
        upper: Option<&Value>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        if lower.is_none() && upper.is_none() {
            return Err(TantivyQueryError::UnboundedRange(field.to_string()));
        }
        let handle = self.field(field)?;
        let lower = self.bound(handle, lower, lower_inclusive)?;
        let upper = self.bound(handle, upper, upper_inclusive)?;
        Ok(Some(Box::new(RangeQuery::new(lower, upper))))
    }

    fn exists_query(&self, field: &str) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        // Validate the name even though ExistsQuery takes a string; a typo
        // should fail compilation, not execution.
        self.field(field)?;
        Ok(Some(Box::new(ExistsQuery::new_exists_query(
            field.to_string(),
        ))))
    }

    fn like_query(
        &self,
        field: &str,
        pattern: &str,
    ) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        let handle = self.field(field)?;
        let regex = like_to_regex(pattern);
        let query = RegexQuery::from_pattern(&regex, handle).map_err(|err| {
            TantivyQueryError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Some(Box::new(query)))
    }

    fn text_query(
        &self,
        field: &str,
        text: &str,
    ) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        let handle = self.field(field)?;
        let tokens = self.tokenize(text);
        match tokens.as_slice() {
            [] => Ok(None),
            [token] => Ok(Some(Box::new(TermQuery::new(
                Term::from_field_text(handle, token),
                IndexRecordOption::WithFreqs,
            )))),
            // Multi-token text becomes a phrase; the field needs positions.
            tokens => {
                let terms: Vec<Term> = tokens
                    .iter()
                    .map(|t| Term::from_field_text(handle, t))
                    .collect();
                Ok(Some(Box::new(PhraseQuery::new(terms))))
            }
        }
    }

    fn selector_query(
        &self,
        selector: &Selector,
    ) -> Result<Option<Box<dyn Query>>, TantivyQueryError> {
        if selector.node_type.is_empty() {
            return Ok(None);
        }
        let field = self.field(&self.type_field)?;
        let term = Term::from_field_text(field, &selector.node_type);
        Ok(Some(Box::new(TermQuery::new(
            term,
            IndexRecordOption::Basic,
        ))))
    }

    fn build_sort(
        &self,
        definitions: &[SortDefinition],
    ) -> Result<Option<TantivySort>, TantivyQueryError> {
        if definitions.is_empty() {
            return Ok(None);
        }
        let mut keys = Vec::with_capacity(definitions.len());
        for definition in definitions {
            match definition.kind {
                SortKind::Field => {
                    let name = definition.field.as_deref().unwrap_or_default();
                    keys.push(TantivySortKey::Field {
                        field: self.field(name)?,
                        name: name.to_string(),
                        ascending: definition.ascending,
                    });
                }
                SortKind::Score => keys.push(TantivySortKey::Score {
                    ascending: definition.ascending,
                }),
            }
        }
        Ok(Some(TantivySort::new(keys)))
    }
}
