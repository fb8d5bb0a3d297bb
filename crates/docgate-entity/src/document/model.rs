//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::{Channel, DocumentType};
use super::status::DocumentStatus;

/// A document received by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Original file name (including extension).
    pub filename: String,
    /// MIME type declared at upload.
    pub content_type: String,
    /// Business category.
    pub document_type: DocumentType,
    /// Channel the upload came through.
    pub channel: Channel,
    /// Customer the document belongs to, if known.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Delivery status.
    #[serde(default)]
    pub status: DocumentStatus,
    /// Location of the stored content, once published.
    #[serde(default)]
    pub url: Option<String>,
    /// Content size in bytes.
    pub size: i64,
    /// When the upload was accepted.
    pub upload_date: DateTime<Utc>,
    /// Caller-supplied correlation identifier.
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// When the record was created.
    pub created: DateTime<Utc>,
    /// Who created the record.
    #[serde(default)]
    pub created_by: Option<String>,
    /// When the record was last updated.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Who last updated the record.
    #[serde(default)]
    pub updated_by: Option<String>,
    /// When the record was soft-deleted.
    #[serde(default)]
    pub deleted: Option<DateTime<Utc>>,
    /// Who soft-deleted the record.
    #[serde(default)]
    pub deleted_by: Option<String>,
}

impl Document {
    /// Build a freshly received document from upload data.
    pub fn new(input: CreateDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            filename: input.filename,
            content_type: input.content_type,
            document_type: input.document_type,
            channel: input.channel,
            customer_id: input.customer_id,
            status: DocumentStatus::Received,
            url: None,
            size: input.size,
            upload_date: now,
            correlation_id: input.correlation_id,
            created: now,
            created_by: input.created_by,
            updated: None,
            updated_by: None,
            deleted: None,
            deleted_by: None,
        }
    }

    /// Check if the document has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}

/// Data required to register an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Business category.
    pub document_type: DocumentType,
    /// Intake channel.
    pub channel: Channel,
    /// Owning customer.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Content size in bytes.
    pub size: i64,
    /// Correlation identifier.
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Creating principal.
    #[serde(default)]
    pub created_by: Option<String>,
}
