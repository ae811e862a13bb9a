//! Root HTTP Routes
//!
//! Greeting, health check and the catch-all for unknown paths.

use axum::{http::StatusCode, http::Uri, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::rest_api::RestError;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Greeting and health check at the root level
pub fn root_routes() -> Router {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/health", get(health_handler))
}

async fn greeting_handler() -> &'static str {
    "Hello world!!!"
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Fallback for any path no router claims
pub async fn route_not_found(uri: Uri) -> RestError {
    RestError::RouteNotFound(uri.path().to_string())
}
