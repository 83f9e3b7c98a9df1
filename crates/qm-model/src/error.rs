//! Error types for query compilation.

use thiserror::Error;

use crate::context::FieldError;

/// Errors raised while lowering a query model to a backend query.
///
/// Modeling errors (every variant except [`CompileError::Backend`]) indicate
/// a parser/builder mismatch: they are raised synchronously, are never
/// recoverable, and leave no partial query behind. Backend errors are
/// whatever the search adaptor raised, wrapped without translation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError<E> {
    /// A function was used in a position it cannot be lowered from, e.g. a
    /// property accessor standing alone as a predicate.
    #[error("function {function} cannot be lowered to a query fragment")]
    NotLowerable {
        /// The offending function's name.
        function: &'static str,
    },

    /// A function is missing an argument binding it requires.
    #[error("function {function} is missing its {argument:?} argument")]
    MissingArgument {
        /// The function's name.
        function: &'static str,
        /// The missing argument key.
        argument: &'static str,
    },

    /// A property could not be resolved to a backend field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The search backend failed. Propagated verbatim.
    #[error("search backend error: {0}")]
    Backend(E),
}
