//! Ordered hit list produced by one query execution

use super::searcher::{DocId, ScoreDoc};

/// Every hit of one query execution, in sort order.
///
/// Ordinal positions never change once the list is built.
#[derive(Debug, Clone, Default)]
pub struct HitList {
    hits: Vec<ScoreDoc>,
}

impl HitList {
    /// Creates a hit list from hits already in sort order
    pub fn new(hits: Vec<ScoreDoc>) -> Self {
        Self { hits }
    }

    /// Creates an empty hit list
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of hits, which is also the total item count
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns the hit at `position`
    pub fn get(&self, position: usize) -> Option<ScoreDoc> {
        self.hits.get(position).copied()
    }

    /// Returns the document id at `position`
    pub fn doc_id(&self, position: usize) -> Option<DocId> {
        self.hits.get(position).map(|h| h.doc)
    }

    /// Returns the score at `position`
    pub fn score(&self, position: usize) -> Option<f32> {
        self.hits.get(position).map(|h| h.score)
    }

    /// Highest tracked score, ignoring NaN
    pub fn max_score(&self) -> Option<f32> {
        self.hits
            .iter()
            .map(|h| h.score)
            .filter(|s| !s.is_nan())
            .fold(None, |max, s| match max {
                Some(m) if m >= s => Some(m),
                _ => Some(s),
            })
    }

    /// Returns an iterator over the hits
    pub fn iter(&self) -> impl Iterator<Item = &ScoreDoc> {
        self.hits.iter()
    }
}
