//! Result records and their materialization from stored fields

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::ReservedFields;
use super::errors::MaterializeError;
use super::searcher::{DocId, StoredDocument, StoredFields};

/// A single materialized hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Content id, read from the id field (or its fallback)
    pub id: i64,
    /// Relevance score at this sort order
    pub score: f32,
    /// User-visible stored fields
    pub fields: BTreeMap<String, String>,
}

impl SearchResult {
    /// Fetches `doc` and converts it into a result record.
    ///
    /// Fails for this document only; nothing else is affected.
    pub fn materialize<F>(
        doc: DocId,
        score: f32,
        fetch: &F,
        reserved: &ReservedFields,
    ) -> Result<Self, MaterializeError>
    where
        F: StoredFields + ?Sized,
    {
        let stored = fetch.stored_fields(doc)?;
        Self::from_document(&stored, score, reserved)
    }

    /// Converts already-fetched stored fields into a result record
    pub fn from_document(
        stored: &StoredDocument,
        score: f32,
        reserved: &ReservedFields,
    ) -> Result<Self, MaterializeError> {
        let id = Self::resolve_id(stored, reserved)?;

        let mut fields = BTreeMap::new();
        for field in stored.fields() {
            if reserved.is_hidden(&field.name) {
                continue;
            }
            fields
                .entry(field.name.clone())
                .or_insert_with(|| field.value.clone());
        }

        Ok(Self { id, score, fields })
    }

    /// Primary id field first, node id field only if the primary is absent or empty.
    fn resolve_id(stored: &StoredDocument, reserved: &ReservedFields) -> Result<i64, MaterializeError> {
        let raw = stored
            .get(&reserved.id_field)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| stored.get(&reserved.node_id_field))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| MaterializeError::MissingId {
                primary: reserved.id_field.clone(),
                fallback: reserved.node_id_field.clone(),
            })?;

        raw.trim()
            .parse::<i64>()
            .map_err(|_| MaterializeError::UnparseableId(raw.to_string()))
    }

    /// Returns a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::errors::IndexError;

    fn reserved() -> ReservedFields {
        ReservedFields::default()
    }

    #[test]
    fn test_primary_id() {
        let doc = StoredDocument::new()
            .with("id", "1042")
            .with("title", "Home");
        let result = SearchResult::from_document(&doc, 1.5, &reserved()).unwrap();
        assert_eq!(result.id, 1042);
        assert_eq!(result.score, 1.5);
        assert_eq!(result.get("title"), Some("Home"));
    }

    #[test]
    fn test_fallback_when_primary_empty() {
        let doc = StoredDocument::new()
            .with("id", "")
            .with("__NodeId", "77");
        let result = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap();
        assert_eq!(result.id, 77);
    }

    #[test]
    fn test_fallback_when_primary_absent() {
        let doc = StoredDocument::new().with("__NodeId", " 12 ");
        let result = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap();
        assert_eq!(result.id, 12);
    }

    #[test]
    fn test_unparseable_primary_does_not_fall_back() {
        let doc = StoredDocument::new()
            .with("id", "abc")
            .with("__NodeId", "5");
        let err = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap_err();
        assert!(matches!(err, MaterializeError::UnparseableId(ref v) if v == "abc"));
    }

    #[test]
    fn test_missing_id() {
        let doc = StoredDocument::new().with("title", "orphan");
        let err = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap_err();
        assert!(matches!(err, MaterializeError::MissingId { .. }));
    }

    #[test]
    fn test_reserved_fields_excluded() {
        let doc = StoredDocument::new()
            .with("__NodeId", "3")
            .with("__IndexType", "content")
            .with("title", "About")
            .with("nodeName", "about-us");
        let result = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap();

        assert!(!result.fields.contains_key("__NodeId"));
        assert!(!result.fields.contains_key("__IndexType"));
        assert_eq!(result.fields.len(), 2);
    }

    #[test]
    fn test_duplicate_field_keeps_first_value() {
        let doc = StoredDocument::new()
            .with("id", "1")
            .with("tag", "news")
            .with("tag", "archive");
        let result = SearchResult::from_document(&doc, 0.0, &reserved()).unwrap();
        assert_eq!(result.get("tag"), Some("news"));
    }

    #[test]
    fn test_custom_reserved_names() {
        let reserved = ReservedFields {
            id_field: "key".into(),
            node_id_field: "_node".into(),
            type_field: "_kind".into(),
        };
        let doc = StoredDocument::new()
            .with("_node", "9")
            .with("_kind", "media")
            .with("__NodeId", "visible");
        let result = SearchResult::from_document(&doc, 0.0, &reserved).unwrap();
        assert_eq!(result.id, 9);
        assert_eq!(result.get("__NodeId"), Some("visible"));
        assert_eq!(result.get("_kind"), None);
    }

    struct FailingFetch;

    impl StoredFields for FailingFetch {
        fn stored_fields(&self, doc: DocId) -> Result<StoredDocument, IndexError> {
            Err(IndexError::DocumentNotFound(doc))
        }
    }

    #[test]
    fn test_fetch_failure() {
        let err = SearchResult::materialize(3, 0.0, &FailingFetch, &reserved()).unwrap_err();
        assert!(matches!(
            err,
            MaterializeError::Fetch(IndexError::DocumentNotFound(3))
        ));
    }
}
