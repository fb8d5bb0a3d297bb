//! Document search use cases: paged filter-string search and structured search.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use docgate_core::config::search::SearchConfig;
use docgate_core::result::AppResult;
use docgate_core::types::{PageRequest, PageResult, SortDirection, SortSpec};
use docgate_entity::document::{Channel, Document, DocumentAsset, DocumentStatus, DocumentType};
use docgate_query::{DataSource, Query, Searchable, paginate};

use super::repository::DocumentRepository;

/// Timestamp layout used when rendering date bounds into a filter.
const FILTER_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Typed search parameters, rendered into a filter string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSearch {
    /// Earliest upload time (inclusive).
    pub upload_date_start: Option<DateTime<Utc>>,
    /// Latest upload time (inclusive).
    pub upload_date_end: Option<DateTime<Utc>>,
    /// Substring of the file name.
    pub filename: Option<String>,
    /// Exact MIME type.
    pub content_type: Option<String>,
    /// Document category.
    pub document_type: Option<DocumentType>,
    /// Delivery status.
    pub status: Option<DocumentStatus>,
    /// Owning customer.
    pub customer_id: Option<String>,
    /// Intake channel.
    pub channel: Option<Channel>,
    /// Sort field; the configured default applies when blank.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Sort direction; the configured default applies when blank.
    #[serde(default)]
    pub sort_direction: Option<String>,
}

impl DocumentSearch {
    /// Render the set fields as `and`-joined filter terms.
    ///
    /// Returns `None` when no field is set.
    pub fn to_filter(&self) -> Option<String> {
        let mut terms = Vec::new();

        if let Some(start) = self.upload_date_start {
            terms.push(format!("uploadDate ge '{}'", start.format(FILTER_DATE_FORMAT)));
        }
        if let Some(end) = self.upload_date_end {
            terms.push(format!("uploadDate le '{}'", end.format(FILTER_DATE_FORMAT)));
        }
        if let Some(filename) = non_blank(&self.filename) {
            terms.push(format!("filename contains '{filename}'"));
        }
        if let Some(content_type) = non_blank(&self.content_type) {
            terms.push(format!("contentType eq '{content_type}'"));
        }
        if let Some(document_type) = self.document_type {
            terms.push(format!("documentType eq '{document_type}'"));
        }
        if let Some(status) = self.status {
            terms.push(format!("status eq '{status}'"));
        }
        if let Some(customer_id) = non_blank(&self.customer_id) {
            terms.push(format!("customerId eq '{customer_id}'"));
        }
        if let Some(channel) = self.channel {
            terms.push(format!("channel eq '{channel}'"));
        }

        (!terms.is_empty()).then(|| terms.join(" and "))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Searches stored documents through the query engine.
#[derive(Clone)]
pub struct DocumentSearchService {
    /// Document repository.
    repository: Arc<dyn DocumentRepository>,
    /// Paging limits and default ordering.
    config: SearchConfig,
}

impl std::fmt::Debug for DocumentSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentSearchService {
    /// Creates a new search service.
    pub fn new(repository: Arc<dyn DocumentRepository>, config: SearchConfig) -> Self {
        Self { repository, config }
    }

    /// Filter, sort, and page documents.
    ///
    /// The page and page size are clamped to the configured limits. Without
    /// a sort field the repository order is kept.
    pub async fn search_paged(
        &self,
        request: PageRequest,
        cancel: &CancellationToken,
    ) -> AppResult<PageResult<DocumentAsset>> {
        let request = request.normalized(self.config.max_page_size);
        let query = Query::build(Document::schema(), request.filter.as_deref(), &request.sort)?;

        let page = paginate(self.repository.as_ref(), &query, &request, cancel).await?;

        info!(
            found = page.items.len(),
            total = page.total,
            page = request.page,
            "Paged document search completed"
        );

        Ok(page.map(DocumentAsset::from))
    }

    /// Search by typed fields and return every match.
    ///
    /// The sort defaults to the configured field and direction when the
    /// request leaves them blank.
    pub async fn search(
        &self,
        search: DocumentSearch,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<DocumentAsset>> {
        let filter = search.to_filter();
        let sort = self.sort_or_default(&search);
        let query = Query::build(Document::schema(), filter.as_deref(), &sort)?;

        let documents = self.repository.fetch(&query, None, cancel).await?;

        info!(found = documents.len(), "Document search completed");

        Ok(documents.into_iter().map(DocumentAsset::from).collect())
    }

    /// Compile and run a raw filter without paging, as the `search --all` path does.
    pub async fn search_all(
        &self,
        filter: Option<&str>,
        sort: &SortSpec,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<DocumentAsset>> {
        let query = Query::build(Document::schema(), filter, sort)?;
        let documents = self.repository.fetch(&query, None, cancel).await?;

        info!(found = documents.len(), "Unpaged document search completed");

        Ok(documents.into_iter().map(DocumentAsset::from).collect())
    }

    fn sort_or_default(&self, search: &DocumentSearch) -> SortSpec {
        let field = non_blank(&search.sort_by)
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_sort_field.clone());
        let direction = non_blank(&search.sort_direction)
            .map(SortDirection::from)
            .unwrap_or(self.config.default_sort_direction);
        SortSpec::new(field, direction)
    }
}
