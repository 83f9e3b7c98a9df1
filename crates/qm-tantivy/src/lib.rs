//! Tantivy backend for the qm-model query compiler.
//!
//! [`TantivyAdaptor`] lowers the backend-agnostic query model onto Tantivy
//! queries: boolean scopes become [`tantivy::query::BooleanQuery`], leaf
//! predicates become term, range, regex, exists, and phrase queries, and
//! orderings resolve to a [`TantivySort`] the execution layer maps onto its
//! collector. [`SchemaFieldContext`] resolves logical property names against
//! the index schema.
//!
//! # Example
//!
//! ```ignore
//! use qm_model::QueryCompiler;
//! use qm_tantivy::{SchemaFieldContext, TantivyAdaptor};
//!
//! let adaptor = TantivyAdaptor::new(schema.clone(), "node_type");
//! let context = SchemaFieldContext::new(schema, "content")
//!     .with_property("cm:name", "name");
//! let compiler = QueryCompiler::new(&adaptor, &context);
//! let query = compiler.build_query(&model)?;
//! let hits = searcher.search(&*query, &TopDocs::with_limit(10))?;
//! ```

#![warn(missing_docs)]

mod adaptor;
mod context;
mod error;
mod like;
mod sort;

pub use adaptor::{TantivyAdaptor, TantivyExpressionAdaptor};
pub use context::SchemaFieldContext;
pub use error::TantivyQueryError;
pub use sort::{TantivySort, TantivySortKey};
