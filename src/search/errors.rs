//! Search error types
//!
//! Error codes:
//! - EXAMINE_SEARCH_EXECUTION_FAILED (query could not run, result set not built)
//! - EXAMINE_MALFORMED_RESULT (one matched document is unusable)
//! - EXAMINE_INVALID_CONFIG
//!
//! Capability errors raised by a searcher or stored-fields implementation
//! are reported as [`IndexError`].

use std::io;

use thiserror::Error;

use super::searcher::DocId;

/// Result type for search operations
pub type ExamineResult<T> = Result<T, ExamineError>;

/// Errors raised by the index capabilities (searcher, stored fields).
#[derive(Debug, Error)]
pub enum IndexError {
    /// Query is structurally invalid
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Sort references a field the index does not know
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Stored value cannot be read as the requested sort type
    #[error("Invalid value '{value}' for sort field '{field}'")]
    InvalidSortValue { field: String, value: String },

    /// No document stored under this id
    #[error("Document not found: {0}")]
    DocumentNotFound(DocId),

    /// Reading the index failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index contents could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single document could not be turned into a result record.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// Neither the primary nor the fallback id field holds a value
    #[error("document has no '{primary}' or '{fallback}' field")]
    MissingId { primary: String, fallback: String },

    /// The resolved id is not an integer
    #[error("id value '{0}' is not an integer")]
    UnparseableId(String),

    /// Stored fields could not be fetched
    #[error("stored fields unavailable: {0}")]
    Fetch(#[from] IndexError),
}

/// Top-level error for result-set construction and enumeration.
#[derive(Debug, Error)]
pub enum ExamineError {
    /// The searcher failed; no result set was built
    #[error("Search execution failed: {0}")]
    SearchExecutionFailure(#[source] IndexError),

    /// The document at this position could not be materialized
    #[error("Malformed result at position {position} (doc {doc}): {source}")]
    MalformedResult {
        position: usize,
        doc: DocId,
        #[source]
        source: MaterializeError,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExamineError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExamineError::SearchExecutionFailure(_) => "EXAMINE_SEARCH_EXECUTION_FAILED",
            ExamineError::MalformedResult { .. } => "EXAMINE_MALFORMED_RESULT",
            ExamineError::InvalidConfig(_) => "EXAMINE_INVALID_CONFIG",
        }
    }

    /// Returns true if the error only concerns one ordinal position.
    ///
    /// Position-scoped errors leave the rest of the result set usable.
    pub fn is_position_scoped(&self) -> bool {
        matches!(self, ExamineError::MalformedResult { .. })
    }

    /// Returns the failing position for position-scoped errors
    pub fn position(&self) -> Option<usize> {
        match self {
            ExamineError::MalformedResult { position, .. } => Some(*position),
            _ => None,
        }
    }
}
