//! Backend-agnostic query model and compiler for content search.
//!
//! This crate is the middle layer between query parsers (CMIS SQL, FTS) and
//! a full-text search backend. Parsers produce a [`Query`]: selectors, a
//! boolean [`Constraint`] tree, and orderings. The [`QueryCompiler`] lowers
//! that model through a [`SearchAdaptor`] into one opaque backend query
//! fragment, and independently resolves orderings into a sort specification.
//!
//! The compiler owns the boolean composition rules:
//!
//! - conjunctions respect each child's [`Occur`] tag
//!   (must/should/must-not);
//! - disjunctions fold every positive child to "should" and isolate
//!   exclusions inside nested "everything except X" scopes;
//! - groups consisting purely of exclusions are anchored with the backend's
//!   match-all query so "NOT X" means "everything except X".
//!
//! # Example
//!
//! ```ignore
//! use qm_model::{Query, QueryCompiler, Selector, Source};
//!
//! let query = Query::new(Source::new(vec![Selector::new("d", "cm:document")]));
//! let compiler = QueryCompiler::new(&adaptor, &context);
//! let fragment = compiler.build_query(&query)?;
//! let sorts = compiler.build_sort_definitions(&query.orderings)?;
//! ```

#![warn(missing_docs)]

mod adaptor;
mod argument;
mod compile;
mod constraint;
mod context;
mod error;
mod function;
mod ordering;
mod source;
#[cfg(test)]
pub(crate) mod test_support;

pub use adaptor::{ExpressionAdaptor, SearchAdaptor};
pub use argument::{Argument, Value};
pub use compile::QueryCompiler;
pub use constraint::{Constraint, ConstraintKind, DEFAULT_BOOST, Occur};
pub use context::{FieldError, FunctionContext};
pub use error::CompileError;
pub use function::{ARG_NOT, ARG_PROPERTY, ARG_VALUE, Arguments, Function};
pub use ordering::{Column, Ordering, SortDefinition, SortDirection, SortKind};
pub use source::{Query, Selector, Source};
