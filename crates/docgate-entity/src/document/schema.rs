//! Searchable fields of [`Document`].

use std::sync::LazyLock;

use docgate_query::{FieldKind, FieldValue, Schema, Searchable};

use super::kind::{Channel, DocumentType};
use super::model::Document;
use super::status::DocumentStatus;

static DOCUMENT_SCHEMA: LazyLock<Schema<Document>> = LazyLock::new(|| {
    Schema::<Document>::new("Document")
        .field("id", FieldKind::Guid, |d| d.id.into())
        .field("filename", FieldKind::String, |d| d.filename.clone().into())
        .field("contentType", FieldKind::String, |d| d.content_type.clone().into())
        .enumeration("documentType", DocumentType::NAMES, |d| {
            FieldValue::Enum(d.document_type.ordinal())
        })
        .enumeration("channel", Channel::NAMES, |d| FieldValue::Enum(d.channel.ordinal()))
        .nullable("customerId", FieldKind::String, |d| d.customer_id.clone().into())
        .enumeration("status", DocumentStatus::NAMES, |d| FieldValue::Enum(d.status.ordinal()))
        .nullable("url", FieldKind::String, |d| d.url.clone().into())
        .field("size", FieldKind::Numeric, |d| d.size.into())
        .field("uploadDate", FieldKind::DateTime, |d| d.upload_date.into())
        .nullable("correlationId", FieldKind::String, |d| d.correlation_id.clone().into())
        .field("created", FieldKind::DateTime, |d| d.created.into())
        .nullable("updated", FieldKind::DateTime, |d| d.updated.into())
});

impl Searchable for Document {
    fn schema() -> &'static Schema<Self> {
        &DOCUMENT_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CreateDocument;
    use docgate_core::types::SortSpec;
    use docgate_query::{QueryError, SortKey, compile, parse};

    fn doc(filename: &str, status: DocumentStatus, size: i64) -> Document {
        let mut doc = Document::new(CreateDocument {
            filename: filename.into(),
            content_type: "application/pdf".into(),
            document_type: DocumentType::Form,
            channel: Channel::Branch,
            customer_id: None,
            size,
            correlation_id: None,
            created_by: None,
        });
        doc.status = status;
        doc
    }

    #[test]
    fn test_every_field_resolves_ignoring_case() {
        let schema = Document::schema();
        for name in [
            "id", "FILENAME", "contenttype", "DocumentType", "channel", "customerId", "status",
            "url", "size", "uploaddate", "correlationId", "created", "updated",
        ] {
            assert!(schema.resolve(name).is_some(), "missing field {name}");
        }
        assert_eq!(schema.fields().len(), 13);
    }

    #[test]
    fn test_filename_and_status_filter() {
        let criteria = parse("filename contains 'test' and status eq 'RECEIVED'");
        let predicate = compile(Document::schema(), &criteria).unwrap();
        assert!(predicate.matches(&doc("test.pdf", DocumentStatus::Received, 1)));
        assert!(!predicate.matches(&doc("test.pdf", DocumentStatus::Sent, 1)));
        assert!(!predicate.matches(&doc("other.pdf", DocumentStatus::Received, 1)));
    }

    #[test]
    fn test_upload_date_range() {
        let mut early = doc("a", DocumentStatus::Received, 1);
        early.upload_date = "2024-01-10T00:00:00Z".parse().unwrap();
        let mut late = doc("b", DocumentStatus::Received, 1);
        late.upload_date = "2024-03-01T00:00:00Z".parse().unwrap();

        let criteria =
            parse("uploadDate ge '2024-01-01T00:00:00' and uploadDate le '2024-01-31T23:59:59'");
        let predicate = compile(Document::schema(), &criteria).unwrap();
        assert!(predicate.matches(&early));
        assert!(!predicate.matches(&late));
    }

    #[test]
    fn test_channel_in_list() {
        let predicate =
            compile(Document::schema(), &parse("channel in ('DIGITAL', 'branch')")).unwrap();
        assert!(predicate.matches(&doc("a", DocumentStatus::Sent, 1)));
    }

    #[test]
    fn test_unknown_property_names_entity() {
        let err = compile(Document::schema(), &parse("owner eq 'x'")).unwrap_err();
        assert!(matches!(err, QueryError::UnknownProperty { entity: "Document", .. }));
        assert_eq!(err.to_string(), "Property 'owner' not found on Document");
    }

    #[test]
    fn test_sort_by_size_desc() {
        let mut docs = vec![
            doc("a", DocumentStatus::Sent, 5),
            doc("b", DocumentStatus::Sent, 50),
            doc("c", DocumentStatus::Sent, 20),
        ];
        SortKey::resolve(Document::schema(), &SortSpec::desc("SIZE"))
            .unwrap()
            .apply(&mut docs);
        let names: Vec<_> = docs.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }
}
