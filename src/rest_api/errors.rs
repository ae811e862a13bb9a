//! # REST API Errors
//!
//! Error types for the REST API module.
//!
//! Client mistakes (bad path ids, missing or unknown body fields) answer
//! 404, the convention this API has always used. Query layer failures are
//! logged and answered with a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Message returned for every server-side failure
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors
    // ==================
    /// Path parameter is not a numeric id
    #[error("Invalid {name}: '{value}'")]
    InvalidParam { name: &'static str, value: String },

    /// Required body field absent or null
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Body is not valid JSON or names unknown fields
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No route matches the request
    #[error("Route {0} not found")]
    RouteNotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Query layer failure
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidParam { .. } => StatusCode::NOT_FOUND,
            RestError::MissingField(_) => StatusCode::NOT_FOUND,
            RestError::InvalidBody(_) => StatusCode::NOT_FOUND,
            RestError::RouteNotFound(_) => StatusCode::NOT_FOUND,

            RestError::Store(err) if err.is_validation() => StatusCode::NOT_FOUND,
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            status: err.status_code().as_u16(),
            message: err.public_message(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
