//! CLI module for examine
//!
//! Provides one command:
//! - search: run a query against a JSON document set and print one page

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{collect_page, run, run_command, search, search_page, Page, PageError, SearchRequest};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};
