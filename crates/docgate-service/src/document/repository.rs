//! Document repository trait and its in-memory implementation.

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use docgate_core::error::AppError;
use docgate_core::result::AppResult;
use docgate_entity::document::Document;
use docgate_query::{DataSource, MemorySource, Query, Window};

/// Storage for documents.
///
/// Implementors are also a [`DataSource`] so search use cases can count and
/// fetch through the query engine. Soft-deleted documents are invisible to
/// every read.
#[async_trait]
pub trait DocumentRepository: DataSource<Document> {
    /// Insert a new document.
    async fn create(&self, document: Document) -> AppResult<Document>;

    /// Replace an existing document, stamping its update time.
    async fn update(&self, document: Document) -> AppResult<Document>;

    /// Find a live document by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;
}

/// Document repository backed by an in-memory source scoped to live documents.
#[derive(Debug)]
pub struct MemoryDocumentRepository {
    documents: MemorySource<Document>,
}

impl Default for MemoryDocumentRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn is_live(document: &Document) -> bool {
    !document.is_deleted()
}

impl MemoryDocumentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Create a repository holding `documents` in the given order.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: MemorySource::scoped(documents, is_live),
        }
    }

    /// Load documents from a JSON array.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        debug!(count = documents.len(), "Loaded documents from JSON");
        Ok(Self::with_documents(documents))
    }
}

#[async_trait]
impl DataSource<Document> for MemoryDocumentRepository {
    async fn count(&self, query: &Query<Document>, cancel: &CancellationToken) -> AppResult<u64> {
        self.documents.count(query, cancel).await
    }

    async fn fetch(
        &self,
        query: &Query<Document>,
        window: Option<Window>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Document>> {
        self.documents.fetch(query, window, cancel).await
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn create(&self, document: Document) -> AppResult<Document> {
        let id = document.id;
        if !self.documents.insert_unless(|d| d.id == id, document.clone()).await {
            return Err(AppError::conflict(format!("Document {id} already exists")));
        }
        debug!(id = %id, "Document created");
        Ok(document)
    }

    async fn update(&self, mut document: Document) -> AppResult<Document> {
        let id = document.id;
        document.updated = Some(Utc::now());
        if !self.documents.update_first(|d| d.id == id, document.clone()).await {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        debug!(id = %id, "Document updated");
        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.documents.find(|d| d.id == id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgate_core::error::ErrorKind;
    use docgate_core::types::SortSpec;
    use docgate_entity::document::{Channel, CreateDocument, DocumentStatus, DocumentType};
    use docgate_query::Searchable;

    fn doc(filename: &str) -> Document {
        Document::new(CreateDocument {
            filename: filename.into(),
            content_type: "application/pdf".into(),
            document_type: DocumentType::Other,
            channel: Channel::Other,
            customer_id: None,
            size: 1,
            correlation_id: None,
            created_by: None,
        })
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryDocumentRepository::new();
        let created = repo.create(doc("a.pdf")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.map(|d| d.filename), Some("a.pdf".to_string()));
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repo = MemoryDocumentRepository::new();
        let document = repo.create(doc("a.pdf")).await.unwrap();
        let err = repo.create(document).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_stamps_time() {
        let repo = MemoryDocumentRepository::new();
        let mut document = repo.create(doc("a.pdf")).await.unwrap();
        document.status = DocumentStatus::Failed;
        document.updated = None;

        let saved = repo.update(document).await.unwrap();
        assert!(saved.updated.is_some());
        assert_eq!(
            repo.find_by_id(saved.id).await.unwrap().map(|d| d.status),
            Some(DocumentStatus::Failed)
        );

        let err = repo.update(doc("missing.pdf")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_deleted_documents_are_hidden() {
        let mut gone = doc("gone.pdf");
        gone.deleted = Some(Utc::now());
        let repo = MemoryDocumentRepository::with_documents(vec![doc("kept.pdf"), gone.clone()]);
        let cancel = CancellationToken::new();

        let query = Query::build(Document::schema(), None, &SortSpec::default()).unwrap();
        assert_eq!(repo.count(&query, &cancel).await.unwrap(), 1);
        let all = repo.fetch(&query, None, &cancel).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].filename, "kept.pdf");
        assert!(repo.find_by_id(gone.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_documents_cannot_be_updated_or_reused() {
        let mut gone = doc("gone.pdf");
        gone.deleted = Some(Utc::now());
        let repo = MemoryDocumentRepository::with_documents(vec![gone.clone()]);

        let err = repo.update(gone.clone()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = repo.create(gone).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_from_json_rejects_malformed_input() {
        let err = MemoryDocumentRepository::from_json("{not json").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);

        let repo = MemoryDocumentRepository::from_json("[]").unwrap();
        let query = Query::new();
        assert_eq!(repo.count(&query, &CancellationToken::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_fetch() {
        let repo = MemoryDocumentRepository::with_documents(vec![doc("a.pdf")]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = repo.fetch(&Query::new(), None, &cancel).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }
}
