//! Query executor
//!
//! Runs a query exactly once and keeps the full ordered hit list.
//!
//! Every matching document is requested (`max_doc` hits), not a top-K
//! slice: the result set pages lazily from arbitrary offsets and its total
//! count must equal the number of matches. Very large result sets pay for
//! the full hit list up front.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry, ObservationScope};

use super::errors::{ExamineError, ExamineResult};
use super::hits::HitList;
use super::query::Query;
use super::searcher::Searcher;
use super::sort::{Sort, SortField};

/// Executes queries against a searcher and collects all hits
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    track_scores: bool,
    metrics: Arc<MetricsRegistry>,
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl QueryExecutor {
    /// Creates an executor with its own metrics registry
    pub fn new(track_scores: bool) -> Self {
        Self {
            track_scores,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Shares an existing metrics registry
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the metrics registry
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Builds the sort handed to the searcher.
    ///
    /// No sort fields means the index's natural relevance order.
    pub fn sort_for(&self, sort_fields: &[SortField]) -> Sort {
        if sort_fields.is_empty() {
            Sort::relevance()
        } else {
            Sort::by(sort_fields.to_vec()).with_track_scores(self.track_scores)
        }
    }

    /// Executes `query` once and returns every hit in sort order.
    ///
    /// Searcher failures are not retried.
    pub fn execute<S>(
        &self,
        query: &Query,
        sort_fields: &[SortField],
        searcher: &S,
    ) -> ExamineResult<HitList>
    where
        S: Searcher + ?Sized,
    {
        let sort = self.sort_for(sort_fields);
        let sort_desc = if sort.is_relevance() {
            "relevance".to_string()
        } else {
            sort.fields
                .iter()
                .map(SortField::describe)
                .collect::<Vec<_>>()
                .join(",")
        };

        let scope = ObservationScope::with_fields(
            "QUERY_EXECUTE",
            &[("query", query.kind()), ("sort", sort_desc.as_str())],
        );

        let max_hits = searcher.max_doc();
        let top_docs = match searcher.search(query, &sort, max_hits) {
            Ok(top_docs) => top_docs,
            Err(e) => {
                self.metrics.increment_queries_failed();
                scope.fail(&e.to_string());
                return Err(ExamineError::SearchExecutionFailure(e));
            }
        };

        if top_docs.total_hits != top_docs.score_docs.len() {
            let returned = top_docs.score_docs.len().to_string();
            let total = top_docs.total_hits.to_string();
            log_event_with_fields(
                Event::HitsTruncated,
                &[("returned", returned.as_str()), ("total_hits", total.as_str())],
            );
        }

        let hits = HitList::new(top_docs.score_docs);
        self.metrics.record_query(hits.len() as u64);

        let count = hits.len().to_string();
        log_event_with_fields(Event::HitsCollected, &[("hits", count.as_str())]);
        scope.complete_with_fields(&[("hits", count.as_str())]);

        Ok(hits)
    }
}
