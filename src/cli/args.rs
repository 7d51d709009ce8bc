//! CLI argument definitions using clap
//!
//! Commands:
//! - examine search --index <path> [--config <path>] [--skip N] [--take N]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// examine - lazy paged search over an in-memory index
#[derive(Parser, Debug)]
#[command(name = "examine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the search request read from stdin and print one page
    Search {
        /// Path to a JSON array of documents
        #[arg(long)]
        index: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ordinal position of the first result
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum number of results to print
        #[arg(long, default_value_t = 10)]
        take: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::try_parse_from(["examine", "search", "--index", "docs.json"]).unwrap();
        let Command::Search {
            index,
            config,
            skip,
            take,
        } = cli.command;
        assert_eq!(index, PathBuf::from("docs.json"));
        assert!(config.is_none());
        assert_eq!(skip, 0);
        assert_eq!(take, 10);
    }

    #[test]
    fn test_parse_search_paging() {
        let cli = Cli::try_parse_from([
            "examine", "search", "--index", "d.json", "--config", "e.json", "--skip", "20",
            "--take", "5",
        ])
        .unwrap();
        let Command::Search {
            config, skip, take, ..
        } = cli.command;
        assert_eq!(config, Some(PathBuf::from("e.json")));
        assert_eq!((skip, take), (20, 5));
    }

    #[test]
    fn test_index_is_required() {
        assert!(Cli::try_parse_from(["examine", "search"]).is_err());
    }
}
