//! Single-key dynamic sorting.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use docgate_core::types::{SortDirection, SortSpec};

use crate::schema::{Field, Schema};

/// A resolved sort key: one field plus a direction.
pub struct SortKey<T> {
    field: Field<T>,
    direction: SortDirection,
}

impl<T> SortKey<T> {
    /// Resolve a sort spec against a schema.
    ///
    /// Returns `None` when no field is named or the name is unknown; callers
    /// then keep the data source's order.
    pub fn resolve(schema: &Schema<T>, spec: &SortSpec) -> Option<Self> {
        if spec.is_unset() {
            return None;
        }
        let Some(field) = schema.resolve(&spec.field) else {
            tracing::debug!(
                entity = schema.entity(),
                field = %spec.field,
                "Ignoring sort on unknown field"
            );
            return None;
        };
        Some(Self {
            field: *field,
            direction: spec.direction,
        })
    }

    /// Name of the sorted field.
    pub fn field_name(&self) -> &'static str {
        self.field.name()
    }

    /// Sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Order two records by this key.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ord = self.field.read(a).sort_cmp(&self.field.read(b));
        if self.direction.is_descending() {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Stable in-place sort. Ties keep their relative order.
    pub fn apply<R: Borrow<T>>(&self, records: &mut [R]) {
        records.sort_by(|a, b| {
            self.compare(<R as Borrow<T>>::borrow(a), <R as Borrow<T>>::borrow(b))
        });
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            direction: self.direction,
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("field", &self.field.name())
            .field("direction", &self.direction)
            .finish()
    }
}

impl<T> fmt::Display for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.name(), self.direction)
    }
}
