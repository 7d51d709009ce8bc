//! examine - Lazily materialized search result sets
//!
//! A query runs once against an index searcher; matched documents are only
//! turned into result records when a consumer actually reaches them.

pub mod cli;
pub mod index;
pub mod observability;
pub mod search;
