//! Subcategory handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::catalog::{CatalogStore, Table};

use super::errors::{RestError, RestResult};
use super::parser::{
    child_fields, json_body, parse_fields, parse_id, require_fields, require_non_empty,
};
use super::response::{mutation, rows_or_not_found};

/// `GET /subcategories`
pub async fn list_all<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
) -> RestResult<Response> {
    Ok(rows_or_not_found(store.select_all(Table::Subcategory).await?))
}

/// `GET /categories/:id/subcategories`
pub async fn list_for_category<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> RestResult<Response> {
    let category_id = parse_id("id", &id)?;
    let rows = store
        .select_by_parent(Table::Subcategory, category_id)
        .await?;
    Ok(rows_or_not_found(rows))
}

/// `GET /subcategories/:sub_id`
pub async fn get<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(sub_id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("sub_id", &sub_id)?;
    Ok(rows_or_not_found(store.select_by_id(Table::Subcategory, id).await?))
}

/// `POST /categories/:id/subcategories`
///
/// A JSON array body inserts every element in one statement.
pub async fn create<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let category_id = parse_id("id", &id)?;
    let body = json_body(body)?;
    if let Value::Array(items) = &body {
        return create_many(store.as_ref(), category_id, items).await;
    }

    let fields = child_fields(Table::Subcategory, &body, category_id)?;
    require_fields(&fields, &["name"])?;

    let result = store.insert(&fields).await?;
    tracing::info!(
        table = "sub_category",
        id = result.insert_id,
        category_id,
        "created"
    );
    Ok(mutation(result))
}

async fn create_many<S: CatalogStore>(
    store: &S,
    category_id: i64,
    items: &[Value],
) -> RestResult<Response> {
    if items.is_empty() {
        return Err(RestError::InvalidBody("no subcategories provided".to_string()));
    }
    let rows = items
        .iter()
        .map(|item| {
            let fields = child_fields(Table::Subcategory, item, category_id)?;
            require_fields(&fields, &["name"])?;
            Ok(fields)
        })
        .collect::<RestResult<Vec<_>>>()?;

    let result = store.insert_many(Table::Subcategory, &rows).await?;
    tracing::info!(
        table = "sub_category",
        count = rows.len(),
        first_id = result.insert_id,
        category_id,
        "created"
    );
    Ok(mutation(result))
}

/// `PUT /subcategories/:sub_id`
pub async fn update<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(sub_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let id = parse_id("sub_id", &sub_id)?;
    let fields = parse_fields(Table::Subcategory, &json_body(body)?)?;
    require_non_empty(&fields)?;

    Ok(mutation(store.update(&fields, id).await?))
}

/// `DELETE /subcategories/:sub_id`
pub async fn delete<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(sub_id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("sub_id", &sub_id)?;
    Ok(mutation(store.delete(Table::Subcategory, id).await?))
}
