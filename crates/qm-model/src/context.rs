//! Function evaluation context.
//!
//! The context is the compiler's window onto the deployment's data model: it
//! maps logical property names (as they appear in parsed queries) to the
//! backend field names the index actually carries.

use thiserror::Error;

/// Errors raised while resolving properties to backend fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The property has no backend field mapped for it.
    #[error("no backend field is mapped for property {0:?}")]
    UnknownProperty(String),
}

/// Maps logical property names to backend field names.
///
/// Implementations are expected to be pure: the same property resolves to
/// the same field for the lifetime of a compilation.
pub trait FunctionContext {
    /// Resolves a logical property name to a backend field name.
    fn field_name(&self, property: &str) -> Result<String, FieldError>;

    /// The field an unscoped full-text term searches.
    fn default_field_name(&self) -> &str;
}
