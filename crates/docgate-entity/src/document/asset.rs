//! Public projection of a document returned by searches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{Channel, DocumentType};
use super::model::Document;
use super::status::DocumentStatus;

/// Document metadata as exposed to callers. Audit fields are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAsset {
    /// Document identifier, as text.
    pub id: String,
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Business category.
    pub document_type: DocumentType,
    /// Intake channel.
    pub channel: Channel,
    /// Owning customer.
    pub customer_id: Option<String>,
    /// Delivery status.
    pub status: DocumentStatus,
    /// Published location.
    pub url: Option<String>,
    /// Content size in bytes.
    pub size: i64,
    /// When the upload was accepted.
    pub upload_date: DateTime<Utc>,
    /// Correlation identifier.
    pub correlation_id: Option<String>,
}

impl From<&Document> for DocumentAsset {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            filename: doc.filename.clone(),
            content_type: doc.content_type.clone(),
            document_type: doc.document_type,
            channel: doc.channel,
            customer_id: doc.customer_id.clone(),
            status: doc.status,
            url: doc.url.clone(),
            size: doc.size,
            upload_date: doc.upload_date,
            correlation_id: doc.correlation_id.clone(),
        }
    }
}

impl From<Document> for DocumentAsset {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id.to_string(),
            filename: doc.filename,
            content_type: doc.content_type,
            document_type: doc.document_type,
            channel: doc.channel,
            customer_id: doc.customer_id,
            status: doc.status,
            url: doc.url,
            size: doc.size,
            upload_date: doc.upload_date,
            correlation_id: doc.correlation_id,
        }
    }
}
