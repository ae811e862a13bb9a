//! mall-api - A small REST API over categories, subcategories and products
//!
//! Layers, leaf first:
//! - [`catalog`]: tables, parameterized SQL, the store seam and the
//!   join-flattening transform
//! - [`rest_api`]: per-resource handlers and the catalog router
//! - [`http_server`]: root routes, CORS, tracing and the listener
//! - [`cli`]: configuration and process startup

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod rest_api;
