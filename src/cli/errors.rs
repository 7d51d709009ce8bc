//! CLI-specific error types
//!
//! Every CLI error ends the process with a JSON error object on stdout and
//! a non-zero exit status.

use std::fmt;
use std::io;

use crate::search::{ExamineError, IndexError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Request is not a valid search request
    InvalidRequest,
    /// Document set could not be loaded
    IndexLoadFailed,
    /// Searcher rejected the query
    SearchFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EXAMINE_CLI_CONFIG_ERROR",
            Self::IoError => "EXAMINE_CLI_IO_ERROR",
            Self::InvalidRequest => "EXAMINE_CLI_INVALID_REQUEST",
            Self::IndexLoadFailed => "EXAMINE_CLI_INDEX_LOAD_FAILED",
            Self::SearchFailed => "EXAMINE_CLI_SEARCH_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid request
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Index load failed
    pub fn index_load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IndexLoadFailed, msg)
    }

    /// Search failed
    pub fn search_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SearchFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<IndexError> for CliError {
    fn from(e: IndexError) -> Self {
        Self::index_load_failed(e.to_string())
    }
}

impl From<ExamineError> for CliError {
    fn from(e: ExamineError) -> Self {
        let message = format!("{}: {}", e.code(), e);
        match e {
            ExamineError::InvalidConfig(_) => Self::config_error(message),
            ExamineError::SearchExecutionFailure(_) | ExamineError::MalformedResult { .. } => {
                Self::search_failed(message)
            }
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
