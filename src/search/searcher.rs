//! Capabilities consumed from the underlying index
//!
//! The result set never talks to an index directly. It needs exactly two
//! things: a way to run a query once ([`Searcher`]) and a way to read back
//! the stored fields of one document ([`StoredFields`]).

use serde::{Deserialize, Serialize};

use super::errors::IndexError;
use super::query::Query;
use super::sort::Sort;

/// Index-internal document identifier
pub type DocId = u32;

/// One hit: a document and the score it received for this query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDoc {
    /// Document id within the searched index snapshot
    pub doc: DocId,
    /// Relevance score (NaN when scores were not tracked)
    pub score: f32,
}

impl ScoreDoc {
    pub fn new(doc: DocId, score: f32) -> Self {
        Self { doc, score }
    }
}

/// Ordered hits returned by one search call.
#[derive(Debug, Clone, Default)]
pub struct TopDocs {
    /// Number of documents that matched, regardless of `max_hits`
    pub total_hits: usize,
    /// Hits in sort order
    pub score_docs: Vec<ScoreDoc>,
}

/// A single stored field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredField {
    pub name: String,
    pub value: String,
}

impl StoredField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Stored fields of one document, in the order they were indexed.
///
/// A name may appear more than once; lookups return the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredDocument {
    fields: Vec<StoredField>,
}

impl StoredDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(StoredField::new(name, value));
    }

    /// Builder form of [`StoredDocument::add`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Returns the first value stored under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Returns all fields in indexing order
    pub fn fields(&self) -> &[StoredField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StoredDocument {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut doc = StoredDocument::new();
        for (name, value) in iter {
            doc.add(name, value);
        }
        doc
    }
}

/// Executes queries against one index snapshot.
pub trait Searcher {
    /// Upper bound on document ids in the snapshot.
    ///
    /// Requesting this many hits returns every matching document.
    fn max_doc(&self) -> usize;

    /// Runs `query` in `sort` order and returns up to `max_hits` hits.
    fn search(&self, query: &Query, sort: &Sort, max_hits: usize) -> Result<TopDocs, IndexError>;
}

/// Reads stored field values for a document.
pub trait StoredFields {
    /// Returns every stored field of `doc`, reserved ones included.
    fn stored_fields(&self, doc: DocId) -> Result<StoredDocument, IndexError>;
}

impl<T: Searcher + ?Sized> Searcher for &T {
    fn max_doc(&self) -> usize {
        (**self).max_doc()
    }

    fn search(&self, query: &Query, sort: &Sort, max_hits: usize) -> Result<TopDocs, IndexError> {
        (**self).search(query, sort, max_hits)
    }
}

impl<T: StoredFields + ?Sized> StoredFields for &T {
    fn stored_fields(&self, doc: DocId) -> Result<StoredDocument, IndexError> {
        (**self).stored_fields(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_document_first_value_wins() {
        let doc = StoredDocument::new()
            .with("tag", "first")
            .with("tag", "second");
        assert_eq!(doc.get("tag"), Some("first"));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_stored_document_missing_field() {
        let doc: StoredDocument = [("title", "A")].into_iter().collect();
        assert_eq!(doc.get("body"), None);
        assert!(!doc.is_empty());
    }
}
