//! Document domain entities.

pub mod asset;
pub mod kind;
pub mod model;
pub mod schema;
pub mod status;

pub use asset::DocumentAsset;
pub use kind::{Channel, DocumentType};
pub use model::{CreateDocument, Document};
pub use status::DocumentStatus;
