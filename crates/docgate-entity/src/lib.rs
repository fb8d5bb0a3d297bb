//! # docgate-entity
//!
//! Domain entity models for DocGate. Every struct in this crate is either a
//! stored record or a value object returned to callers. Stored records also
//! implement [`docgate_query::Searchable`] so the query engine can filter and
//! sort them by name.

pub mod document;
