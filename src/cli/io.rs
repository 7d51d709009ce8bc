//! JSON I/O handling for CLI
//!
//! - Input: one JSON search request via stdin
//! - Output: one JSON object via stdout
//! - Logs never touch stdout

use std::io::{self, Read, Write};

use serde_json::Value;

use super::commands::SearchRequest;
use super::errors::{CliError, CliResult};

/// Read the search request from stdin
pub fn read_request() -> CliResult<SearchRequest> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parse a search request
pub fn parse_request(input: &str) -> CliResult<SearchRequest> {
    if input.trim().is_empty() {
        return Err(CliError::invalid_request("Empty input"));
    }
    serde_json::from_str(input)
        .map_err(|e| CliError::invalid_request(format!("Invalid search request: {}", e)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use crate::search::{Query, SortField};

    #[test]
    fn test_parse_request() {
        let request = parse_request(
            r#"{"query": {"type": "term", "field": "title", "term": "rust"},
                "sort": [{"field": "id", "kind": "int", "reverse": true}]}"#,
        )
        .unwrap();
        assert_eq!(request.query, Query::term("title", "rust"));
        assert_eq!(request.sort, vec![SortField::int("id").reversed()]);
    }

    #[test]
    fn test_sort_defaults_to_relevance() {
        let request = parse_request(r#"{"query": {"type": "all"}}"#).unwrap();
        assert!(request.sort.is_empty());
    }

    #[test]
    fn test_empty_and_invalid_input() {
        assert_eq!(
            parse_request("  \n").unwrap_err().code(),
            &CliErrorCode::InvalidRequest
        );
        assert!(parse_request(r#"{"sort": []}"#).is_err());
        assert!(parse_request(r#"{"query": {"type": "fuzzy"}}"#).is_err());
    }
}
