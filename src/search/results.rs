//! Lazy, memoized result set
//!
//! The hit list is collected eagerly; result records are not. Position `i`
//! is materialized the first time any iterator (or `get`) reaches it and is
//! served from the cache afterwards, so paging forward, backward or
//! revisiting never fetches the same document twice.
//!
//! # Invariants
//!
//! - `total_item_count() == hits.len()`, fixed at construction
//! - The cache only grows; an entry is never overwritten
//! - Each `skip_to` iterator yields positions in increasing order
//! - A failing position affects only itself

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry, Severity};

use super::config::{ReservedFields, SearchConfig};
use super::errors::{ExamineError, ExamineResult};
use super::executor::QueryExecutor;
use super::hits::HitList;
use super::query::Query;
use super::result::SearchResult;
use super::searcher::{DocId, Searcher, StoredFields};
use super::sort::SortField;

type ResultCache = HashMap<usize, Arc<SearchResult>>;

/// Results of one query execution, materialized on demand
pub struct SearchResults<'s, F: ?Sized> {
    fetch: &'s F,
    hits: HitList,
    cache: Mutex<ResultCache>,
    reserved: ReservedFields,
    metrics: Arc<MetricsRegistry>,
    execution_id: Uuid,
    executed_at: DateTime<Utc>,
}

impl<'s, S> SearchResults<'s, S>
where
    S: Searcher + StoredFields + ?Sized,
{
    /// Runs `query` against `searcher` and wraps the hits.
    ///
    /// Fails with `SearchExecutionFailure` if the searcher rejects the
    /// query; no result set exists in that case.
    pub fn new(
        query: &Query,
        sort_fields: &[SortField],
        searcher: &'s S,
        config: &SearchConfig,
    ) -> ExamineResult<Self> {
        let executor = QueryExecutor::new(config.track_scores);
        Self::execute(&executor, query, sort_fields, searcher, config.reserved())
    }

    /// Like [`SearchResults::new`], sharing `executor`'s metrics
    pub fn execute(
        executor: &QueryExecutor,
        query: &Query,
        sort_fields: &[SortField],
        searcher: &'s S,
        reserved: ReservedFields,
    ) -> ExamineResult<Self> {
        let hits = executor.execute(query, sort_fields, searcher)?;
        Ok(Self::from_hits(hits, searcher, reserved).with_metrics(Arc::clone(executor.metrics())))
    }
}

impl<'s, F> SearchResults<'s, F>
where
    F: StoredFields + ?Sized,
{
    /// Wraps an already collected hit list
    pub fn from_hits(hits: HitList, fetch: &'s F, reserved: ReservedFields) -> Self {
        Self {
            fetch,
            hits,
            cache: Mutex::new(HashMap::new()),
            reserved,
            metrics: Arc::new(MetricsRegistry::new()),
            execution_id: Uuid::new_v4(),
            executed_at: Utc::now(),
        }
    }

    /// Reports into a shared metrics registry
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Total number of matched documents
    pub fn total_item_count(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The underlying hit list
    pub fn hits(&self) -> &HitList {
        &self.hits
    }

    /// Highest tracked score among all hits
    pub fn max_score(&self) -> Option<f32> {
        self.hits.max_score()
    }

    /// Identifier used to correlate log lines for this execution
    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    /// When the query was executed
    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Number of positions materialized so far
    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    /// Returns true if `position` has already been materialized
    pub fn is_cached(&self, position: usize) -> bool {
        self.lock_cache().contains_key(&position)
    }

    /// Iterates from `offset` to the end of the result set.
    ///
    /// Offsets that are negative or not below `total_item_count()` give
    /// an empty iterator.
    pub fn skip_to<O>(&self, offset: O) -> Skip<'_, 's, F>
    where
        O: TryInto<usize>,
    {
        let end = self.total_item_count();
        let start = offset.try_into().map_or(end, |o| o.min(end));
        Skip {
            results: self,
            position: start,
            end,
            failed: false,
        }
    }

    /// Iterates over the whole result set; same as `skip_to(0)`
    pub fn iter(&self) -> Skip<'_, 's, F> {
        self.skip_to(0usize)
    }

    /// Returns the record at `position`, materializing it if needed.
    ///
    /// `None` if `position` is out of range.
    pub fn get(&self, position: usize) -> Option<ExamineResult<Arc<SearchResult>>> {
        self.load(position)
    }

    /// Collects up to `size` records starting at `offset`.
    ///
    /// Stops at the first position that fails to materialize.
    pub fn page<O>(&self, offset: O, size: usize) -> ExamineResult<Vec<Arc<SearchResult>>>
    where
        O: TryInto<usize>,
    {
        self.skip_to(offset).take(size).collect()
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        // Inserts are single operations, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self, position: usize) -> Option<ExamineResult<Arc<SearchResult>>> {
        let hit = self.hits.get(position)?;

        let cached = self.lock_cache().get(&position).cloned();
        if let Some(result) = cached {
            self.metrics.increment_cache_hits();
            self.trace(Event::ResultCacheHit, position, hit.doc);
            return Some(Ok(result));
        }

        // Materialize outside the lock; a racing iterator may do the same
        // work, but whichever record lands first is the one everyone sees.
        match SearchResult::materialize(hit.doc, hit.score, self.fetch, &self.reserved) {
            Ok(result) => {
                self.metrics.increment_materializations();
                self.trace(Event::ResultMaterialized, position, hit.doc);
                let mut cache = self.lock_cache();
                let entry = cache.entry(position).or_insert_with(|| Arc::new(result));
                Some(Ok(Arc::clone(entry)))
            }
            Err(source) => {
                self.metrics.increment_malformed();
                let execution_id = self.execution_id.to_string();
                let position_str = position.to_string();
                let doc = hit.doc.to_string();
                let reason = source.to_string();
                log_event_with_fields(
                    Event::ResultMalformed,
                    &[
                        ("execution_id", execution_id.as_str()),
                        ("position", position_str.as_str()),
                        ("doc", doc.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
                Some(Err(ExamineError::MalformedResult {
                    position,
                    doc: hit.doc,
                    source,
                }))
            }
        }
    }

    fn trace(&self, event: Event, position: usize, doc: DocId) {
        if !Logger::enabled(Severity::Trace) {
            return;
        }
        let execution_id = self.execution_id.to_string();
        let position = position.to_string();
        let doc = doc.to_string();
        log_event_with_fields(
            event,
            &[
                ("execution_id", execution_id.as_str()),
                ("position", position.as_str()),
                ("doc", doc.as_str()),
            ],
        );
    }
}

impl<F: ?Sized> fmt::Debug for SearchResults<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("SearchResults")
            .field("execution_id", &self.execution_id)
            .field("total_item_count", &self.hits.len())
            .field("cached", &cached)
            .finish()
    }
}

impl<'r, 's, F> IntoIterator for &'r SearchResults<'s, F>
where
    F: StoredFields + ?Sized,
{
    type Item = ExamineResult<Arc<SearchResult>>;
    type IntoIter = Skip<'r, 's, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over a result set, starting at some offset.
///
/// Yields positions in increasing order. After a position fails to
/// materialize the error is yielded once and the iterator ends; start a new
/// one with `skip_to` past the failing position to continue.
pub struct Skip<'r, 's, F: ?Sized> {
    results: &'r SearchResults<'s, F>,
    position: usize,
    end: usize,
    failed: bool,
}

impl<F: ?Sized> Skip<'_, '_, F> {
    /// Next position this iterator will yield
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'r, 's, F> Iterator for Skip<'r, 's, F>
where
    F: StoredFields + ?Sized,
{
    type Item = ExamineResult<Arc<SearchResult>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.end {
            return None;
        }
        let item = self.results.load(self.position)?;
        self.position += 1;
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.end.saturating_sub(self.position)))
    }
}

impl<F> FusedIterator for Skip<'_, '_, F> where F: StoredFields + ?Sized {}
