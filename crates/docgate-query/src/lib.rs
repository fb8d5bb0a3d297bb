//! # docgate-query
//!
//! Runtime filter-query engine shared by every searchable entity.
//!
//! A textual filter such as `filename contains 'test' and status eq 'RECEIVED'`
//! goes through three stages:
//!
//! 1. [`parser::parse`] turns it into ordered [`FilterCriterion`] values,
//!    dropping terms it does not recognize.
//! 2. [`compiler::compile`] resolves each property against a [`Schema`],
//!    coerces literals, and folds the criteria left to right into a
//!    [`Predicate`].
//! 3. A [`Query`] pairs the predicate with a [`SortKey`] and is handed to a
//!    [`DataSource`], either directly or through [`paginate`].
//!
//! [`FilterCriterion`]: docgate_core::types::FilterCriterion

pub mod coerce;
pub mod compiler;
pub mod error;
pub mod operator;
pub mod paginate;
pub mod parser;
pub mod schema;
pub mod sort;
pub mod source;
pub mod value;

pub use compiler::{Expr, Predicate, compile};
pub use error::QueryError;
pub use paginate::paginate;
pub use parser::parse;
pub use schema::{Field, FieldKind, FieldValue, Schema, Searchable};
pub use sort::SortKey;
pub use source::{DataSource, MemorySource, Query, Window};
