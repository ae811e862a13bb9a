//! # Response Formatting
//!
//! Maps query layer outcomes to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::catalog::MutationResult;

/// 200 with the rows, or an empty 404 when there are none
pub fn rows_or_not_found<T: Serialize>(rows: Vec<T>) -> Response {
    if rows.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }
    (StatusCode::OK, Json(rows)).into_response()
}

/// 200 with the mutation result, or 404 with it when no row was touched
pub fn mutation(result: MutationResult) -> Response {
    let status = if result.is_noop() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(result)).into_response()
}

/// Connectivity probe body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub thread_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_rows_are_not_found() {
        let response = rows_or_not_found(Vec::<serde_json::Value>::new());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rows_are_ok() {
        let response = rows_or_not_found(vec![json!({"id": 1})]);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_noop_mutation_is_not_found() {
        assert_eq!(mutation(MutationResult::new(0, 0)).status(), StatusCode::NOT_FOUND);
        assert_eq!(mutation(MutationResult::new(1, 5)).status(), StatusCode::OK);
    }

    #[test]
    fn test_ping_serialization() {
        let json = serde_json::to_value(PingResponse { thread_id: 12 }).unwrap();
        assert_eq!(json, json!({"threadId": 12}));
    }
}
