//! Structured document search by typed fields.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;

use super::search::{cancel_on_interrupt, open_service};
use crate::output::{self, OutputFormat};
use docgate_core::config::AppConfig;
use docgate_core::error::AppError;
use docgate_entity::document::{Channel, DocumentStatus, DocumentType};
use docgate_service::DocumentSearch;

/// Arguments for the find command
#[derive(Debug, Args)]
pub struct FindArgs {
    /// JSON file holding an array of documents
    #[arg(short, long)]
    pub data: PathBuf,

    /// Earliest upload time, e.g. 2024-01-01T00:00:00Z
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// Latest upload time, e.g. 2024-01-31T23:59:59Z
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    /// Substring of the file name
    #[arg(long)]
    pub filename: Option<String>,

    /// Exact MIME type
    #[arg(long)]
    pub content_type: Option<String>,

    /// Document type (KYC, CONTRACT, FORM, SUPPORTING_DOCUMENT, OTHER)
    #[arg(long)]
    pub document_type: Option<DocumentType>,

    /// Delivery status (RECEIVED, SENT, FAILED)
    #[arg(long)]
    pub status: Option<DocumentStatus>,

    /// Owning customer
    #[arg(long)]
    pub customer_id: Option<String>,

    /// Intake channel (BRANCH, DIGITAL, BACKOFFICE, OTHER)
    #[arg(long)]
    pub channel: Option<Channel>,

    /// Sort field (defaults to search.default_sort_field)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (defaults to search.default_sort_direction)
    #[arg(long)]
    pub direction: Option<String>,
}

impl FindArgs {
    fn to_search(&self) -> DocumentSearch {
        DocumentSearch {
            upload_date_start: self.from,
            upload_date_end: self.to,
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            document_type: self.document_type,
            status: self.status,
            customer_id: self.customer_id.clone(),
            channel: self.channel,
            sort_by: self.sort_by.clone(),
            sort_direction: self.direction.clone(),
        }
    }
}

/// Execute the find command
pub async fn execute(
    args: &FindArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = open_service(&args.data, config).await?;
    let cancel = cancel_on_interrupt();

    let search = args.to_search();
    tracing::debug!(filter = ?search.to_filter(), "Structured search");

    let assets = service.search(search, &cancel).await?;
    output::print_documents(&assets, format);
    Ok(())
}
