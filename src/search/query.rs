//! Query object model
//!
//! The result set treats queries as opaque and hands them to the searcher
//! unchanged. The model is serde-tagged so requests can arrive as JSON.

use serde::{Deserialize, Serialize};

/// A full-text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Matches every document
    All,
    /// Exact (already analyzed) term in one field
    Term { field: String, term: String },
    /// Analyzed text in one field; any token may match
    Match { field: String, text: String },
    /// Boolean combination of clauses
    Bool {
        #[serde(default)]
        must: Vec<Query>,
        #[serde(default)]
        should: Vec<Query>,
        #[serde(default)]
        must_not: Vec<Query>,
    },
}

impl Query {
    /// Create a match-all query
    pub fn all() -> Self {
        Query::All
    }

    /// Create a term query
    pub fn term(field: impl Into<String>, term: impl Into<String>) -> Self {
        Query::Term {
            field: field.into(),
            term: term.into(),
        }
    }

    /// Create a match query
    pub fn matching(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Create a conjunction of clauses
    pub fn must(clauses: Vec<Query>) -> Self {
        Query::Bool {
            must: clauses,
            should: Vec::new(),
            must_not: Vec::new(),
        }
    }

    /// Create a disjunction of clauses
    pub fn should(clauses: Vec<Query>) -> Self {
        Query::Bool {
            must: Vec::new(),
            should: clauses,
            must_not: Vec::new(),
        }
    }

    /// Returns the query kind for log output
    pub fn kind(&self) -> &'static str {
        match self {
            Query::All => "all",
            Query::Term { .. } => "term",
            Query::Match { .. } => "match",
            Query::Bool { .. } => "bool",
        }
    }
}
