//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` key of a log line.

use std::fmt;

use super::logger::Severity;

/// Observable events in a search's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Setup
    /// Configuration loaded
    ConfigLoaded,
    /// Documents loaded into an index
    IndexLoaded,

    // Query execution
    /// Hit list collected
    HitsCollected,
    /// Searcher returned fewer hits than it reported matching
    HitsTruncated,

    // Result set
    /// Position materialized from stored fields
    ResultMaterialized,
    /// Position served from the cache
    ResultCacheHit,
    /// Position could not be materialized
    ResultMalformed,
    /// Page of results written
    PageServed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::IndexLoaded => "INDEX_LOADED",
            Event::HitsCollected => "HITS_COLLECTED",
            Event::HitsTruncated => "HITS_TRUNCATED",
            Event::ResultMaterialized => "RESULT_MATERIALIZED",
            Event::ResultCacheHit => "RESULT_CACHE_HIT",
            Event::ResultMalformed => "RESULT_MALFORMED",
            Event::PageServed => "PAGE_SERVED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ResultMaterialized | Event::ResultCacheHit => Severity::Trace,
            Event::ResultMalformed | Event::HitsTruncated => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
