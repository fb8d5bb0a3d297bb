//! # docgate-service
//!
//! Application use cases for DocGate. Services take their collaborators at
//! construction time as `Arc` references and expose async methods that
//! return [`docgate_core::AppResult`].

pub mod document;

pub use document::{
    DocumentRepository, DocumentSearch, DocumentSearchService, MemoryDocumentRepository,
};
