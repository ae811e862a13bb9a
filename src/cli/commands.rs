//! CLI command implementations
//!
//! `serve` builds the store (MySQL pool or in-memory tables), injects it
//! into the HTTP server and runs until interrupted. `ping` checks out one
//! pooled connection and reports its id.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::catalog::{CatalogStore, MemoryStore, MySqlStore};
use crate::http_server::{HttpServer, HttpServerConfig};

use super::args::{Cli, Command, DatabaseArgs, ServeArgs};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Ping { database } => ping(&database),
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let http_config = args.http_config()?;
    // Resolve database settings before starting anything
    let db_config = if args.memory {
        None
    } else {
        Some(args.database.to_config()?)
    };

    runtime()?.block_on(async move {
        match db_config {
            Some(db_config) => {
                let store = MySqlStore::connect(&db_config).await?;
                run_server(http_config, Arc::new(store)).await
            }
            None => {
                tracing::warn!("serving from in-memory tables; data is lost on exit");
                run_server(http_config, Arc::new(MemoryStore::new())).await
            }
        }
    })
}

async fn run_server<S: CatalogStore + 'static>(
    config: HttpServerConfig,
    store: Arc<S>,
) -> CliResult<()> {
    HttpServer::with_store(config, store)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Check database connectivity
pub fn ping(database: &DatabaseArgs) -> CliResult<()> {
    let config = database.to_config()?;

    runtime()?.block_on(async move {
        let store = MySqlStore::connect(&config).await?;
        let thread_id = store.ping().await?;
        println!("Connected as id {}", thread_id);
        Ok(())
    })
}
