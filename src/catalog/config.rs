//! Database Configuration
//!
//! Connection settings for the MySQL pool.

use serde::{Deserialize, Serialize};

/// MySQL connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 3306)
    #[serde(default = "default_port")]
    pub port: u16,

    /// User name
    pub user: String,

    /// Password
    #[serde(default)]
    pub password: String,

    /// Database (schema) name
    pub database: String,

    /// Pool size (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    pub fn new(user: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: user.into(),
            password: String::new(),
            database: database.into(),
            max_connections: default_max_connections(),
        }
    }

    /// `host:port/database`, without credentials, for logs
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}
