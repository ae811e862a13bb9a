//! CLI module for mall-api
//!
//! Provides command-line interface for:
//! - serve: Build the store and run the HTTP server
//! - ping: One-shot database connectivity check

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, DatabaseArgs, ServeArgs};
pub use commands::{init_logging, ping, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
