//! CLI command implementations
//!
//! `search` follows a fixed sequence: load configuration, load the document
//! set, read the request, execute once, then materialize a single page.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::index::MemoryIndex;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::search::{
    Query, SearchConfig, SearchResult, SearchResults, Searcher, SortField, StoredFields,
};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_request, write_error, write_response};

/// Search request read from stdin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Query,
    /// Empty means relevance order
    #[serde(default)]
    pub sort: Vec<SortField>,
}

/// A position inside the page that could not be materialized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageError {
    pub position: usize,
    pub code: String,
    pub message: String,
}

/// One page of a result set
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub execution_id: Uuid,
    pub total_item_count: usize,
    pub skip: usize,
    pub results: Vec<SearchResult>,
    pub errors: Vec<PageError>,
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Search {
            index,
            config,
            skip,
            take,
        } => search(&index, config.as_deref(), skip, take),
    }
}

/// Run the stdin request against the document set at `index_path`.
///
/// Failures are written to stdout as a JSON error before being returned.
pub fn search(
    index_path: &Path,
    config_path: Option<&Path>,
    skip: usize,
    take: usize,
) -> CliResult<()> {
    match prepare_and_search(index_path, config_path, skip, take) {
        Ok(page) => write_response(serde_json::to_value(&page)?),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn prepare_and_search(
    index_path: &Path,
    config_path: Option<&Path>,
    skip: usize,
    take: usize,
) -> CliResult<Page> {
    let config = match config_path {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    Logger::set_min_severity(config.severity()?);
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(Event::ConfigLoaded, &[("source", source.as_str())]);

    let index = MemoryIndex::load(index_path)?;
    let documents = index.len().to_string();
    let path = index_path.display().to_string();
    log_event_with_fields(
        Event::IndexLoaded,
        &[("documents", documents.as_str()), ("path", path.as_str())],
    );

    let request = read_request()?;
    search_page(&index, &config, &request, skip, take)
}

/// Execute `request` and materialize up to `take` results from `skip`.
pub fn search_page<S>(
    searcher: &S,
    config: &SearchConfig,
    request: &SearchRequest,
    skip: usize,
    take: usize,
) -> CliResult<Page>
where
    S: Searcher + StoredFields + ?Sized,
{
    let results = SearchResults::new(&request.query, &request.sort, searcher, config)?;
    let (records, errors) = collect_page(&results, skip, take);

    let returned = records.len().to_string();
    let failed = errors.len().to_string();
    let execution_id = results.execution_id().to_string();
    let metrics = results.metrics().to_json();
    log_event_with_fields(
        Event::PageServed,
        &[
            ("errors", failed.as_str()),
            ("execution_id", execution_id.as_str()),
            ("metrics", metrics.as_str()),
            ("returned", returned.as_str()),
        ],
    );

    Ok(Page {
        execution_id: results.execution_id(),
        total_item_count: results.total_item_count(),
        skip,
        results: records,
        errors,
    })
}

/// Materializes positions `skip..skip + take`.
///
/// A malformed position is reported and skipped; collection resumes with
/// a fresh iterator just past it.
pub fn collect_page<F>(
    results: &SearchResults<'_, F>,
    skip: usize,
    take: usize,
) -> (Vec<SearchResult>, Vec<PageError>)
where
    F: StoredFields + ?Sized,
{
    let end = skip.saturating_add(take).min(results.total_item_count());
    let mut records = Vec::new();
    let mut errors = Vec::new();
    let mut position = skip;

    while position < end {
        let mut failure = None;
        for item in results.skip_to(position).take(end - position) {
            match item {
                Ok(record) => {
                    records.push(SearchResult::clone(&record));
                    position += 1;
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        match failure {
            Some(e) => {
                let failed_at = e.position().unwrap_or(position);
                errors.push(PageError {
                    position: failed_at,
                    code: e.code().to_string(),
                    message: e.to_string(),
                });
                position = failed_at + 1;
            }
            None => break,
        }
    }

    (records, errors)
}
