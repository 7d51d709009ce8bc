//! examine CLI entry point
//!
//! All logic lives in the CLI module; main only reports the error and
//! sets the exit code.

use examine::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
