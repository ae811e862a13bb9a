//! Category handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::catalog::{flatten_categories, CatalogStore, Table};

use super::errors::RestResult;
use super::parser::{json_body, parse_fields, parse_id, require_fields};
use super::response::{mutation, rows_or_not_found};

/// `GET /categories`: every category with its subcategories
pub async fn list<S: CatalogStore + 'static>(State(store): State<Arc<S>>) -> RestResult<Response> {
    let rows = store.select_left_join().await?;
    Ok(rows_or_not_found(flatten_categories(rows)))
}

/// `GET /categories/:id`
pub async fn get<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("id", &id)?;
    let rows = store.select_by_id(Table::Category, id).await?;
    Ok(rows_or_not_found(rows))
}

/// `GET /categories/:id/tree`: one category with its subcategories.
///
/// Inner join: a category without subcategories is not found.
pub async fn tree<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("id", &id)?;
    let rows = store.select_category_tree(id).await?;
    Ok(rows_or_not_found(flatten_categories(rows)))
}

/// `POST /categories`
pub async fn create<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let fields = parse_fields(Table::Category, &json_body(body)?)?;
    require_fields(&fields, &["name"])?;

    let result = store.insert(&fields).await?;
    tracing::info!(table = "category", id = result.insert_id, "created");
    Ok(mutation(result))
}

/// `PUT /categories/:id`
pub async fn update<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let id = parse_id("id", &id)?;
    let fields = parse_fields(Table::Category, &json_body(body)?)?;
    require_fields(&fields, &["name"])?;

    Ok(mutation(store.update(&fields, id).await?))
}

/// `DELETE /categories/:id`
pub async fn delete<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("id", &id)?;
    Ok(mutation(store.delete(Table::Category, id).await?))
}
