//! # REST API Module
//!
//! HTTP endpoints for CRUD over categories, subcategories and products.
//! Handlers validate path ids and bodies, call the [`crate::catalog`] query
//! layer, and map its outcome to a status code.

pub mod categories;
pub mod errors;
pub mod parser;
pub mod products;
pub mod response;
pub mod server;
pub mod subcategories;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use server::RestServer;
