//! Error types for the qm-tantivy crate.

use thiserror::Error;

/// Errors raised while building Tantivy query fragments.
///
/// These surface to callers wrapped in the compiler's backend error variant,
/// untranslated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TantivyQueryError {
    /// The index schema has no field under this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A literal's type does not fit the field it is compared against.
    #[error("field {field} cannot hold {value_kind} values")]
    ValueMismatch {
        /// The field name.
        field: String,
        /// The literal's type name.
        value_kind: &'static str,
    },

    /// A LIKE pattern translated to a regex Tantivy rejected.
    #[error("invalid LIKE pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The original LIKE pattern.
        pattern: String,
        /// Tantivy's rejection message.
        message: String,
    },

    /// A range fragment was requested with neither bound.
    #[error("range over field {0} needs at least one bound")]
    UnboundedRange(String),
}
