//! Errors raised while compiling a filter against a schema.
//!
//! Parsing never fails; every variant here comes from the compile step and
//! maps to a client-facing validation error.

use docgate_core::error::{AppError, ErrorKind};
use docgate_core::types::FilterOperator;
use thiserror::Error;

use crate::schema::FieldKind;

/// Compile-time query errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The property does not exist on the target schema.
    #[error("Property '{property}' not found on {entity}")]
    UnknownProperty {
        /// Property name as written in the filter.
        property: String,
        /// Name of the entity the schema describes.
        entity: &'static str,
    },

    /// The operator cannot be applied to the field's kind.
    #[error("Operator '{operator}' cannot be used with {kind} property '{property}'")]
    TypeMismatch {
        /// Property name as written in the filter.
        property: String,
        /// The rejected operator.
        operator: FilterOperator,
        /// Declared kind of the resolved field.
        kind: FieldKind,
    },

    /// The literal could not be converted to the field's kind.
    #[error("Invalid value in filter `{criterion}`: {reason}")]
    Format {
        /// The offending criterion, rendered back to filter syntax.
        criterion: String,
        /// Why the conversion failed.
        reason: String,
    },
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::with_source(ErrorKind::Validation, err.to_string(), err)
    }
}
