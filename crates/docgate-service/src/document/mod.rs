//! Document storage seam and search use cases.

pub mod repository;
pub mod search;

pub use repository::{DocumentRepository, MemoryDocumentRepository};
pub use search::{DocumentSearch, DocumentSearchService};
