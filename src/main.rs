//! mall-api entry point
//!
//! Parses CLI arguments, dispatches to the command, prints errors to stderr
//! and exits non-zero on failure. All logic lives in the CLI module.

use mall_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
