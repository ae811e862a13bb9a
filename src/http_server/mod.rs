//! # HTTP Server Module
//!
//! Combines the root routes and the catalog REST API into one Axum server.
//!
//! # Endpoints
//!
//! - `/` - Greeting
//! - `/health` - Health check
//! - `/mall/*` - Catalog REST API (prefix configurable)

pub mod config;
pub mod root_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
