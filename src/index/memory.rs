//! In-memory inverted index
//!
//! Documents are held as stored fields. Every stored value is also
//! tokenized into per-field postings so term and match queries can be
//! scored with BM25. Document ids are insertion order.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use super::scorer::{bm25, FieldStats};
use super::sorter::{sort_by_fields, sort_by_relevance};
use super::tokenizer::{normalize_term, tokenize};
use crate::search::{
    DocId, IndexError, Query, ScoreDoc, Searcher, Sort, StoredDocument, StoredFields, TopDocs,
};

/// Matching documents and their accumulated scores
type Matches = BTreeMap<DocId, f32>;

#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: DocId,
    tf: u32,
}

/// Postings and length statistics for one field
#[derive(Debug, Default)]
struct FieldIndex {
    terms: HashMap<String, Vec<Posting>>,
    lengths: HashMap<DocId, u32>,
    total_length: u64,
}

impl FieldIndex {
    fn stats(&self) -> FieldStats {
        let doc_count = self.lengths.len() as u32;
        let avg_length = if doc_count == 0 {
            0.0
        } else {
            self.total_length as f32 / doc_count as f32
        };
        FieldStats {
            doc_count,
            avg_length,
        }
    }

    fn score_term(&self, term: &str) -> Matches {
        let postings = match self.terms.get(term) {
            Some(postings) => postings,
            None => return Matches::new(),
        };
        let stats = self.stats();
        let df = postings.len() as u32;
        postings
            .iter()
            .map(|p| {
                let length = self.lengths.get(&p.doc).copied().unwrap_or(0);
                (p.doc, bm25(p.tf, df, length, stats))
            })
            .collect()
    }
}

/// A searchable, fully in-memory document collection
#[derive(Debug, Default)]
pub struct MemoryIndex {
    docs: Vec<StoredDocument>,
    fields: HashMap<String, FieldIndex>,
}

impl MemoryIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON array of flat objects from `path`
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let file = File::open(path)?;
        let objects: Vec<Map<String, Value>> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_objects(objects))
    }

    /// Builds an index from a JSON array value
    pub fn from_json_value(value: Value) -> Result<Self, IndexError> {
        let objects: Vec<Map<String, Value>> = serde_json::from_value(value)?;
        Ok(Self::from_objects(objects))
    }

    fn from_objects(objects: Vec<Map<String, Value>>) -> Self {
        let mut index = Self::new();
        for object in objects {
            index.add_document(document_from_object(object));
        }
        index
    }

    /// Adds a document and returns its id
    pub fn add_document(&mut self, doc: StoredDocument) -> DocId {
        let id = self.docs.len() as DocId;

        let mut counts: HashMap<&str, HashMap<String, u32>> = HashMap::new();
        for field in doc.fields() {
            let terms = counts.entry(field.name.as_str()).or_default();
            for token in tokenize(&field.value) {
                *terms.entry(token).or_insert(0) += 1;
            }
        }

        for (name, terms) in counts {
            let field = self.fields.entry(name.to_string()).or_default();
            let length: u32 = terms.values().sum();
            field.lengths.insert(id, length);
            field.total_length += u64::from(length);
            for (term, tf) in terms {
                field.terms.entry(term).or_default().push(Posting { doc: id, tf });
            }
        }

        self.docs.push(doc);
        id
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns true if any document stores `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names known to the index, sorted
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn evaluate(&self, query: &Query) -> Result<Matches, IndexError> {
        match query {
            Query::All => Ok((0..self.docs.len() as DocId).map(|d| (d, 1.0)).collect()),
            Query::Term { field, term } => {
                require_field(field)?;
                let term = normalize_term(term);
                if term.is_empty() {
                    return Err(IndexError::InvalidQuery(format!(
                        "empty term for field '{}'",
                        field
                    )));
                }
                Ok(self
                    .fields
                    .get(field)
                    .map(|f| f.score_term(&term))
                    .unwrap_or_default())
            }
            Query::Match { field, text } => {
                require_field(field)?;
                let index = match self.fields.get(field) {
                    Some(index) => index,
                    None => return Ok(Matches::new()),
                };
                let tokens: BTreeSet<String> = tokenize(text).into_iter().collect();
                let mut matches = Matches::new();
                for token in &tokens {
                    union_into(&mut matches, index.score_term(token));
                }
                Ok(matches)
            }
            Query::Bool {
                must,
                should,
                must_not,
            } => self.evaluate_bool(must, should, must_not),
        }
    }

    fn evaluate_bool(
        &self,
        must: &[Query],
        should: &[Query],
        must_not: &[Query],
    ) -> Result<Matches, IndexError> {
        let mut required: Option<Matches> = None;
        for clause in must {
            let clause = self.evaluate(clause)?;
            required = Some(match required {
                None => clause,
                Some(acc) => intersect(acc, &clause),
            });
        }

        let optional = should
            .iter()
            .map(|clause| self.evaluate(clause))
            .collect::<Result<Vec<_>, _>>()?;

        let mut matches = match required {
            Some(mut acc) => {
                // should clauses only add score once must clauses are present
                for clause in &optional {
                    for (doc, score) in clause {
                        if let Some(total) = acc.get_mut(doc) {
                            *total += score;
                        }
                    }
                }
                acc
            }
            None => {
                let mut acc = Matches::new();
                for clause in optional {
                    union_into(&mut acc, clause);
                }
                acc
            }
        };

        for clause in must_not {
            let excluded = self.evaluate(clause)?;
            matches.retain(|doc, _| !excluded.contains_key(doc));
        }

        Ok(matches)
    }
}

impl Searcher for MemoryIndex {
    fn max_doc(&self) -> usize {
        self.docs.len()
    }

    fn search(&self, query: &Query, sort: &Sort, max_hits: usize) -> Result<TopDocs, IndexError> {
        let matches = self.evaluate(query)?;
        let total_hits = matches.len();
        let mut hits: Vec<ScoreDoc> = matches
            .into_iter()
            .map(|(doc, score)| ScoreDoc::new(doc, score))
            .collect();

        if sort.is_relevance() {
            sort_by_relevance(&mut hits);
        } else {
            for field in &sort.fields {
                if let Some(name) = &field.field {
                    if field.kind.needs_field() && !self.has_field(name) {
                        return Err(IndexError::UnknownSortField(name.clone()));
                    }
                }
            }
            hits = sort_by_fields(hits, &sort.fields, |doc| self.docs.get(doc as usize))?;
        }

        if !sort.needs_scores() {
            for hit in &mut hits {
                hit.score = f32::NAN;
            }
        }

        hits.truncate(max_hits);
        Ok(TopDocs {
            total_hits,
            score_docs: hits,
        })
    }
}

impl StoredFields for MemoryIndex {
    fn stored_fields(&self, doc: DocId) -> Result<StoredDocument, IndexError> {
        self.docs
            .get(doc as usize)
            .cloned()
            .ok_or(IndexError::DocumentNotFound(doc))
    }
}

fn require_field(field: &str) -> Result<(), IndexError> {
    if field.trim().is_empty() {
        return Err(IndexError::InvalidQuery("field name is empty".to_string()));
    }
    Ok(())
}

/// Adds every match into `acc`, summing scores of shared documents
fn union_into(acc: &mut Matches, other: Matches) {
    for (doc, score) in other {
        *acc.entry(doc).or_insert(0.0) += score;
    }
}

/// Keeps documents present in both, summing their scores
fn intersect(acc: Matches, other: &Matches) -> Matches {
    acc.into_iter()
        .filter_map(|(doc, score)| other.get(&doc).map(|s| (doc, score + s)))
        .collect()
}

/// Flattens a JSON object into stored fields.
///
/// Arrays become repeated fields, nulls are dropped and nested objects are
/// stored as their JSON text.
fn document_from_object(object: Map<String, Value>) -> StoredDocument {
    let mut doc = StoredDocument::new();
    for (name, value) in object {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        doc.add(name.as_str(), text);
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    doc.add(name, text);
                }
            }
        }
    }
    doc
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
