//! Search subsystem
//!
//! Pipeline: [`QueryExecutor`] → [`SearchResults`].
//!
//! 1. The executor runs the query once and keeps every hit in sort order
//! 2. The result set materializes a hit into a [`SearchResult`] the first
//!    time its position is reached, and caches it by position
//!
//! The index itself is reached only through the [`Searcher`] and
//! [`StoredFields`] capabilities.

mod config;
mod errors;
mod executor;
mod hits;
mod query;
mod result;
mod results;
mod searcher;
mod sort;

pub use config::{ReservedFields, SearchConfig};
pub use errors::{ExamineError, ExamineResult, IndexError, MaterializeError};
pub use executor::QueryExecutor;
pub use hits::HitList;
pub use query::Query;
pub use result::SearchResult;
pub use results::{SearchResults, Skip};
pub use searcher::{DocId, ScoreDoc, Searcher, StoredDocument, StoredField, StoredFields, TopDocs};
pub use sort::{Sort, SortField, SortKind};
