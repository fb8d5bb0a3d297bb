//! # docgate-core
//!
//! Core crate for DocGate. Contains configuration schemas, the shared
//! filter/sort/pagination types used by every searchable entity, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other DocGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
