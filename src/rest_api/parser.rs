//! # Request Parameter Parser
//!
//! Validates path ids and request bodies before anything reaches the query
//! layer.

use std::sync::OnceLock;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use regex::Regex;
use serde_json::Value;

use crate::catalog::{BindValue, FieldMap, Table};

use super::errors::{RestError, RestResult};

fn numeric_id() -> &'static Regex {
    static NUMERIC_ID: OnceLock<Regex> = OnceLock::new();
    NUMERIC_ID.get_or_init(|| Regex::new(r"^\d+$").expect("static regex"))
}

/// Parse a path parameter that must be a non-negative integer id
pub fn parse_id(name: &'static str, raw: &str) -> RestResult<i64> {
    let invalid = || RestError::InvalidParam {
        name,
        value: raw.to_string(),
    };
    if !numeric_id().is_match(raw) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

/// Unwrap a JSON body extraction, treating rejections as invalid input
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> RestResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RestError::InvalidBody(rejection.body_text()))
}

/// Build the field map for `table` from a request body
pub fn parse_fields(table: Table, body: &Value) -> RestResult<FieldMap> {
    FieldMap::from_json(table, body).map_err(|e| RestError::InvalidBody(e.to_string()))
}

/// Reject the map unless every listed column carries a value.
///
/// Null and blank strings count as missing.
pub fn require_fields(fields: &FieldMap, required: &[&'static str]) -> RestResult<()> {
    for column in required {
        let present = match fields.get(column) {
            None | Some(BindValue::Null) => false,
            Some(BindValue::Text(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(RestError::MissingField(column));
        }
    }
    Ok(())
}

/// Reject an empty map
pub fn require_non_empty(fields: &FieldMap) -> RestResult<()> {
    if fields.is_empty() {
        return Err(RestError::InvalidBody("no fields provided".to_string()));
    }
    Ok(())
}

/// Body for a row created under a parent: the path id wins over the body
pub fn child_fields(table: Table, body: &Value, parent_id: i64) -> RestResult<FieldMap> {
    let mut fields = parse_fields(table, body)?;
    if let Some(column) = table.parent_column() {
        fields.set(column, BindValue::Int(parent_id))?;
    }
    Ok(fields)
}
