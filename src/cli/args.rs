//! CLI argument definitions using clap
//!
//! Commands:
//! - mall-api serve [--config <path>] [--port <port>] [--memory]
//! - mall-api ping
//!
//! Database settings come from `--db-*` flags or the `MYSQL_*` environment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::DatabaseConfig;
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// mall-api - REST API over categories, subcategories and products
#[derive(Parser, Debug)]
#[command(name = "mall-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Check that the database is reachable and exit
    Ping {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to an HTTP server configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to, overriding the config file
    #[arg(long)]
    pub port: Option<u16>,

    /// Allowed CORS origin (repeatable), replacing the configured list
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Serve from in-process tables instead of MySQL
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    /// Resolve the HTTP server configuration: file (or defaults), then flags
    pub fn http_config(&self) -> CliResult<HttpServerConfig> {
        let mut config = match &self.config {
            Some(path) => HttpServerConfig::load(path)?,
            None => HttpServerConfig::default(),
        };
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if !self.cors_origins.is_empty() {
            config.cors_origins = self.cors_origins.clone();
        }
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// MySQL host
    #[arg(long = "db-host", env = "MYSQL_HOST", default_value = "localhost")]
    pub db_host: String,

    /// MySQL port
    #[arg(long = "db-port", env = "MYSQL_PORT", default_value_t = 3306)]
    pub db_port: u16,

    /// MySQL user
    #[arg(long = "db-user", env = "MYSQL_USER")]
    pub user: Option<String>,

    /// MySQL password
    #[arg(long = "db-password", env = "MYSQL_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long = "db-name", env = "MYSQL_DATABASE")]
    pub database: Option<String>,

    /// Connection pool size
    #[arg(long = "db-max-connections", env = "MYSQL_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Build the pool configuration. User and database name are required.
    pub fn to_config(&self) -> CliResult<DatabaseConfig> {
        let user = self
            .user
            .clone()
            .ok_or_else(|| CliError::config_error("MYSQL_USER (--db-user) is not set"))?;
        let database = self
            .database
            .clone()
            .ok_or_else(|| CliError::config_error("MYSQL_DATABASE (--db-name) is not set"))?;

        if self.max_connections == 0 {
            return Err(CliError::config_error("MYSQL_MAX_CONNECTIONS must be > 0"));
        }

        Ok(DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user,
            password: self.password.clone(),
            database,
            max_connections: self.max_connections,
        })
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
