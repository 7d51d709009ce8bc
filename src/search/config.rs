//! Search configuration
//!
//! The reserved field names must match exactly what the indexer wrote.
//! They are passed explicitly to materialization rather than read from
//! globals, so the result set can be tested without an indexer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{ExamineError, ExamineResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Primary id field
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Internal node id field, used when `id_field` is absent or empty
    #[serde(default = "default_node_id_field")]
    pub node_id_field: String,

    /// Internal type discriminator field
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Compute relevance scores even when sorting by fields
    #[serde(default = "default_track_scores")]
    pub track_scores: bool,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_id_field() -> String {
    "id".to_string()
}
fn default_node_id_field() -> String {
    "__NodeId".to_string()
}
fn default_type_field() -> String {
    "__IndexType".to_string()
}
fn default_track_scores() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
            node_id_field: default_node_id_field(),
            type_field: default_type_field(),
            track_scores: default_track_scores(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ExamineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExamineError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ExamineResult<Self> {
        let config: SearchConfig = serde_json::from_str(content)
            .map_err(|e| ExamineError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate field names and log level
    pub fn validate(&self) -> ExamineResult<()> {
        for (name, value) in [
            ("id_field", &self.id_field),
            ("node_id_field", &self.node_id_field),
            ("type_field", &self.type_field),
        ] {
            if value.trim().is_empty() {
                return Err(ExamineError::InvalidConfig(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        if self.node_id_field == self.type_field {
            return Err(ExamineError::InvalidConfig(format!(
                "node_id_field and type_field must differ (both '{}')",
                self.node_id_field
            )));
        }

        self.severity()?;

        Ok(())
    }

    /// Returns the configured minimum log severity
    pub fn severity(&self) -> ExamineResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ExamineError::InvalidConfig(format!("Unknown log_level: '{}'", self.log_level))
        })
    }

    /// Returns the field names used during materialization
    pub fn reserved(&self) -> ReservedFields {
        ReservedFields {
            id_field: self.id_field.clone(),
            node_id_field: self.node_id_field.clone(),
            type_field: self.type_field.clone(),
        }
    }
}

/// Field names with special meaning during materialization.
///
/// `node_id_field` and `type_field` are index bookkeeping and never show up
/// in a result's field map. `id_field` stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedFields {
    pub id_field: String,
    pub node_id_field: String,
    pub type_field: String,
}

impl Default for ReservedFields {
    fn default() -> Self {
        SearchConfig::default().reserved()
    }
}

impl ReservedFields {
    /// Returns true if `name` must be hidden from result fields
    pub fn is_hidden(&self, name: &str) -> bool {
        name == self.node_id_field || name == self.type_field
    }
}
