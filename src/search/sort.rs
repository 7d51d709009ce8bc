//! Sort specifications
//!
//! An empty field list means natural relevance order. Otherwise fields are
//! applied in sequence; later fields only break ties left by earlier ones.

use serde::{Deserialize, Serialize};

/// How a sort field's values are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    /// Relevance score, best first
    Score,
    /// Index order
    Doc,
    /// Stored value, lexicographic
    String,
    /// Stored value parsed as a signed integer
    Int,
    /// Stored value parsed as a float
    Float,
}

impl SortKind {
    /// Returns true if this kind reads a stored field
    pub fn needs_field(&self) -> bool {
        matches!(self, SortKind::String | SortKind::Int | SortKind::Float)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKind::Score => "score",
            SortKind::Doc => "doc",
            SortKind::String => "string",
            SortKind::Int => "int",
            SortKind::Float => "float",
        }
    }
}

/// One sort criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field to read; unused for score and doc order
    #[serde(default)]
    pub field: Option<String>,
    /// Comparison type
    pub kind: SortKind,
    /// Inverts the natural order of `kind`
    #[serde(default)]
    pub reverse: bool,
}

impl SortField {
    /// Sort by relevance
    pub fn score() -> Self {
        Self {
            field: None,
            kind: SortKind::Score,
            reverse: false,
        }
    }

    /// Sort by index order
    pub fn doc() -> Self {
        Self {
            field: None,
            kind: SortKind::Doc,
            reverse: false,
        }
    }

    /// Sort by a stored string value
    pub fn string(field: impl Into<String>) -> Self {
        Self::typed(field, SortKind::String)
    }

    /// Sort by a stored integer value
    pub fn int(field: impl Into<String>) -> Self {
        Self::typed(field, SortKind::Int)
    }

    /// Sort by a stored float value
    pub fn float(field: impl Into<String>) -> Self {
        Self::typed(field, SortKind::Float)
    }

    fn typed(field: impl Into<String>, kind: SortKind) -> Self {
        Self {
            field: Some(field.into()),
            kind,
            reverse: false,
        }
    }

    /// Returns this criterion with its direction inverted
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Short description for log output, e.g. `title:string:desc`
    pub fn describe(&self) -> String {
        let direction = if self.reverse { "desc" } else { "asc" };
        match &self.field {
            Some(field) => format!("{}:{}:{}", field, self.kind.as_str(), direction),
            None => format!("{}:{}", self.kind.as_str(), direction),
        }
    }
}

/// Sort order handed to a searcher
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    /// Criteria in priority order; empty means relevance
    pub fields: Vec<SortField>,
    /// Compute scores even when sorting by fields
    pub track_scores: bool,
}

impl Sort {
    /// Natural relevance ordering
    pub fn relevance() -> Self {
        Self {
            fields: Vec::new(),
            track_scores: true,
        }
    }

    /// Composite ordering over `fields`
    pub fn by(fields: Vec<SortField>) -> Self {
        Self {
            fields,
            track_scores: true,
        }
    }

    /// Sets whether scores are computed under field sorts
    pub fn with_track_scores(mut self, track_scores: bool) -> Self {
        self.track_scores = track_scores;
        self
    }

    /// Returns true if this is natural relevance ordering
    pub fn is_relevance(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if hits must carry real scores
    pub fn needs_scores(&self) -> bool {
        self.track_scores
            || self.is_relevance()
            || self.fields.iter().any(|f| f.kind == SortKind::Score)
    }
}
