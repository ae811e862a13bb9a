//! Product handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::catalog::{CatalogStore, Table};

use super::errors::RestResult;
use super::parser::{
    child_fields, json_body, parse_fields, parse_id, require_fields, require_non_empty,
};
use super::response::{mutation, rows_or_not_found};

/// `GET /products`
pub async fn list_all<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
) -> RestResult<Response> {
    Ok(rows_or_not_found(store.select_all(Table::Product).await?))
}

/// `GET /subcategories/:sub_id/products`
pub async fn list_for_subcategory<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(sub_id): Path<String>,
) -> RestResult<Response> {
    let sub_category_id = parse_id("sub_id", &sub_id)?;
    let rows = store
        .select_by_parent(Table::Product, sub_category_id)
        .await?;
    Ok(rows_or_not_found(rows))
}

/// `GET /products/:p_id`
pub async fn get<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(p_id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("p_id", &p_id)?;
    Ok(rows_or_not_found(store.select_by_id(Table::Product, id).await?))
}

/// `POST /subcategories/:sub_id/products`
pub async fn create<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(sub_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let sub_category_id = parse_id("sub_id", &sub_id)?;
    let fields = child_fields(Table::Product, &json_body(body)?, sub_category_id)?;
    require_fields(&fields, &["name"])?;

    let result = store.insert(&fields).await?;
    tracing::info!(
        table = "product",
        id = result.insert_id,
        sub_category_id,
        "created"
    );
    Ok(mutation(result))
}

/// `PUT /products/:p_id`
pub async fn update<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(p_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Response> {
    let id = parse_id("p_id", &p_id)?;
    let fields = parse_fields(Table::Product, &json_body(body)?)?;
    require_non_empty(&fields)?;

    Ok(mutation(store.update(&fields, id).await?))
}

/// `DELETE /products/:p_id`
pub async fn delete<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
    Path(p_id): Path<String>,
) -> RestResult<Response> {
    let id = parse_id("p_id", &p_id)?;
    Ok(mutation(store.delete(Table::Product, id).await?))
}
