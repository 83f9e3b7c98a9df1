//! Native sort objects for the Tantivy backend.
//!
//! Tantivy has no freestanding `Sort` value the way Lucene does; ordering is
//! chosen when a collector is built. [`TantivySort`] is the bridge: sort
//! keys with their field handles already resolved against the index schema,
//! in precedence order, ready for the execution layer to map onto its
//! collector.

use tantivy::schema::Field;

/// A resolved, schema-validated sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TantivySort {
    /// Sort keys, primary first.
    keys: Vec<TantivySortKey>,
}

impl TantivySort {
    /// Wraps resolved sort keys.
    pub(crate) fn new(keys: Vec<TantivySortKey>) -> Self {
        Self { keys }
    }

    /// The sort keys in precedence order.
    pub fn keys(&self) -> &[TantivySortKey] {
        &self.keys
    }

    /// The primary sort key.
    pub fn primary(&self) -> Option<&TantivySortKey> {
        self.keys.first()
    }
}

/// One resolved sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TantivySortKey {
    /// Sort on a field's values. The field must be a fast field for the
    /// execution layer to order by it.
    Field {
        /// The resolved field handle.
        field: Field,
        /// The field's schema name.
        name: String,
        /// Whether to sort ascending.
        ascending: bool,
    },
    /// Sort on the relevance score.
    Score {
        /// Whether to sort ascending (least relevant first).
        ascending: bool,
    },
}
