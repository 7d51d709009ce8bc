//! Memory Index Tests
//!
//! Tests for the in-memory index behind the result set:
//! - Relevance and field ordering are deterministic
//! - Scores are NaN when not tracked under field sorts
//! - Index errors surface as search execution failures

use std::io::Write;

use examine::index::MemoryIndex;
use examine::search::{
    ExamineError, IndexError, Query, QueryExecutor, SearchConfig, SearchResults, Searcher, Sort,
    SortField,
};
use serde_json::json;
use tempfile::NamedTempFile;

// =============================================================================
// Helper Functions
// =============================================================================

fn catalog() -> MemoryIndex {
    MemoryIndex::from_json_value(json!([
        {"id": 100, "title": "Rust Programming", "price": 39.5, "year": 2021},
        {"id": 101, "title": "Rust Rust Rust", "price": 12.0, "year": 2019},
        {"id": 102, "title": "Learning Python", "price": 39.5, "year": 2020},
        {"id": 103, "title": "Go in Practice", "year": 2018},
        {"__NodeId": 104, "__IndexType": "media", "title": "Rust logo"}
    ]))
    .unwrap()
}

fn ids(results: &SearchResults<'_, MemoryIndex>) -> Vec<i64> {
    results.iter().map(|r| r.unwrap().id).collect()
}

// =============================================================================
// Loading
// =============================================================================

/// Documents load from a JSON file on disk.
#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"id": 1, "title": "one"}}, {{"id": 2, "title": "two"}}]"#).unwrap();

    let index = MemoryIndex::load(file.path()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.max_doc(), 2);
    assert!(index.has_field("title"));
}

/// A missing file is an I/O error.
#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MemoryIndex::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IndexError::Io(_)));
}

// =============================================================================
// Ordering
// =============================================================================

/// Relevance order is stable across executions.
#[test]
fn test_relevance_order_deterministic() {
    let index = catalog();
    let config = SearchConfig::default();
    let query = Query::term("title", "rust");

    let first = SearchResults::new(&query, &[], &index, &config).unwrap();
    let second = SearchResults::new(&query, &[], &index, &config).unwrap();

    assert_eq!(first.total_item_count(), 3);
    assert_eq!(ids(&first), ids(&second));
    // higher term frequency wins
    assert_eq!(ids(&first)[0], 101);
}

/// Scores under relevance order are non-increasing.
#[test]
fn test_relevance_scores_non_increasing() {
    let index = catalog();
    let results = SearchResults::new(
        &Query::matching("title", "rust python"),
        &[],
        &index,
        &SearchConfig::default(),
    )
    .unwrap();

    let scores: Vec<f32> = results.iter().map(|r| r.unwrap().score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(results.max_score(), scores.first().copied());
}

/// Float ties fall through to the next criterion.
#[test]
fn test_composite_sort() {
    let index = catalog();
    let results = SearchResults::new(
        &Query::all(),
        &[
            SortField::float("price").reversed(),
            SortField::int("year"),
        ],
        &index,
        &SearchConfig::default(),
    )
    .unwrap();

    // equal prices ordered by year, missing prices last when descending
    assert_eq!(ids(&results), vec![102, 100, 101, 104, 103]);
}

/// Without score tracking, field sorts carry NaN scores.
#[test]
fn test_untracked_scores_are_nan() {
    let index = catalog();
    let config = SearchConfig {
        track_scores: false,
        ..SearchConfig::default()
    };
    let results =
        SearchResults::new(&Query::all(), &[SortField::int("year")], &index, &config).unwrap();

    assert!(results.iter().all(|r| r.unwrap().score.is_nan()));
    assert_eq!(results.max_score(), None);
}

/// Tracked scores stay real under field sorts.
#[test]
fn test_tracked_scores_under_field_sort() {
    let index = catalog();
    let results = SearchResults::new(
        &Query::term("title", "rust"),
        &[SortField::int("year")],
        &index,
        &SearchConfig::default(),
    )
    .unwrap();

    assert!(results.iter().all(|r| r.unwrap().score > 0.0));
}

// =============================================================================
// Boolean Queries
// =============================================================================

/// must_not removes matches from the must set.
#[test]
fn test_bool_exclusion() {
    let index = catalog();
    let query = Query::Bool {
        must: vec![Query::term("title", "rust")],
        should: vec![],
        must_not: vec![Query::term("title", "logo")],
    };
    let results = SearchResults::new(
        &query,
        &[SortField::doc()],
        &index,
        &SearchConfig::default(),
    )
    .unwrap();

    assert_eq!(ids(&results), vec![100, 101]);
}

// =============================================================================
// Errors
// =============================================================================

/// Unknown sort fields fail the search.
#[test]
fn test_unknown_sort_field() {
    let index = catalog();
    let err = SearchResults::new(
        &Query::all(),
        &[SortField::string("author")],
        &index,
        &SearchConfig::default(),
    )
    .unwrap_err();

    match err {
        ExamineError::SearchExecutionFailure(IndexError::UnknownSortField(field)) => {
            assert_eq!(field, "author");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Non-numeric values under an int sort fail the search.
#[test]
fn test_invalid_sort_value() {
    let index = catalog();
    let err = SearchResults::new(
        &Query::all(),
        &[SortField::int("title")],
        &index,
        &SearchConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ExamineError::SearchExecutionFailure(IndexError::InvalidSortValue { .. })
    ));
}

/// Failures are counted by the executor.
#[test]
fn test_executor_counts_failures() {
    let index = catalog();
    let executor = QueryExecutor::default();

    assert!(executor
        .execute(&Query::term("", "x"), &[], &index)
        .is_err());
    executor.execute(&Query::all(), &[], &index).unwrap();

    let snapshot = executor.metrics().snapshot();
    assert_eq!(snapshot.queries_failed, 1);
    assert_eq!(snapshot.queries_executed, 1);
    assert_eq!(snapshot.hits_collected, 5);
}

/// The searcher is asked for every document.
#[test]
fn test_requests_all_hits() {
    let index = catalog();
    let top = index
        .search(&Query::all(), &Sort::relevance(), index.max_doc())
        .unwrap();
    assert_eq!(top.score_docs.len(), top.total_hits);
}
