//! Schema-backed function context.
//!
//! Maps logical property names (`cm:name`, `cm:created`, ...) onto the
//! fields of a Tantivy schema. Properties with an explicit mapping resolve
//! through it; a property that already names a schema field passes through
//! unchanged; anything else fails resolution.

use std::collections::BTreeMap;

use qm_model::{FieldError, FunctionContext};
use tantivy::schema::Schema;

/// A [`FunctionContext`] over a Tantivy schema plus a property mapping.
#[derive(Debug, Clone)]
pub struct SchemaFieldContext {
    /// The index schema fields are validated against.
    schema: Schema,
    /// Explicit property-to-field mappings.
    properties: BTreeMap<String, String>,
    /// Field searched by unscoped full-text terms.
    default_field: String,
}

impl SchemaFieldContext {
    /// Creates a context with no explicit mappings.
    pub fn new(schema: Schema, default_field: impl Into<String>) -> Self {
        Self {
            schema,
            properties: BTreeMap::new(),
            default_field: default_field.into(),
        }
    }

    /// Adds an explicit property-to-field mapping.
    pub fn with_property(mut self, property: impl Into<String>, field: impl Into<String>) -> Self {
        self.properties.insert(property.into(), field.into());
        self
    }
}

impl FunctionContext for SchemaFieldContext {
    fn field_name(&self, property: &str) -> Result<String, FieldError> {
        if let Some(field) = self.properties.get(property) {
            return Ok(field.clone());
        }
        if self.schema.get_field(property).is_ok() {
            return Ok(property.to_string());
        }
        Err(FieldError::UnknownProperty(property.to_string()))
    }

    fn default_field_name(&self) -> &str {
        &self.default_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::schema::{STRING, TEXT};

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field("name", STRING);
        builder.add_text_field("content", TEXT);
        builder.build()
    }

    #[test]
    fn explicit_mappings_win() {
        let context = SchemaFieldContext::new(schema(), "content")
            .with_property("cm:name", "name");
        assert_eq!(context.field_name("cm:name").unwrap(), "name");
    }

    #[test]
    fn schema_fields_pass_through() {
        let context = SchemaFieldContext::new(schema(), "content");
        assert_eq!(context.field_name("content").unwrap(), "content");
    }

    #[test]
    fn unmapped_properties_fail() {
        let context = SchemaFieldContext::new(schema(), "content");
        assert_eq!(
            context.field_name("cm:missing"),
            Err(FieldError::UnknownProperty("cm:missing".to_string()))
        );
    }

    #[test]
    fn default_field_is_exposed() {
        let context = SchemaFieldContext::new(schema(), "content");
        assert_eq!(context.default_field_name(), "content");
    }
}
