//! HTTP API Tests
//!
//! Drives the full router (root routes, `/mall` catalog API, fallback) over
//! the in-memory store:
//! - Validation failures answer 404 and write nothing
//! - Empty results and zero-row mutations answer 404
//! - Store failures answer 500 with a generic message
//! - The category listing nests subcategories

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use mall_api::catalog::MemoryStore;
use mall_api::http_server::{HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    HttpServer::with_store(HttpServerConfig::default(), Arc::new(MemoryStore::new())).router()
}

struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    Reply { status, body }
}

async fn get(app: &Router, uri: &str) -> Reply {
    call(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> Reply {
    call(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> Reply {
    call(app, Method::PUT, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> Reply {
    call(app, Method::DELETE, uri, None).await
}

/// Two categories, "Clothing" with two subcategories and "Garden" with none,
/// plus one product under the first subcategory.
async fn seeded() -> Router {
    let app = app();
    assert_eq!(post(&app, "/mall/categories", json!({"name": "Clothing"})).await.status, StatusCode::OK);
    assert_eq!(post(&app, "/mall/categories", json!({"name": "Garden"})).await.status, StatusCode::OK);
    assert_eq!(
        post(&app, "/mall/categories/1/subcategories", json!({"name": "Shirts", "description": "Tops"}))
            .await
            .status,
        StatusCode::OK
    );
    assert_eq!(
        post(&app, "/mall/categories/1/subcategories", json!({"name": "Shoes", "description": "Feet"}))
            .await
            .status,
        StatusCode::OK
    );
    assert_eq!(
        post(
            &app,
            "/mall/subcategories/1/products",
            json!({"name": "Oxford", "color": "white", "size": "M", "price": 19.5, "quantity": 3})
        )
        .await
        .status,
        StatusCode::OK
    );
    app
}

// =============================================================================
// Root Routes
// =============================================================================

#[tokio::test]
async fn test_greeting() {
    let reply = get(&app(), "/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, b"Hello world!!!");
}

#[tokio::test]
async fn test_health() {
    let reply = get(&app(), "/health").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route() {
    let reply = get(&app(), "/nowhere").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.json(),
        json!({"status": 404, "message": "Route /nowhere not found"})
    );
}

#[tokio::test]
async fn test_connectivity_probe() {
    let reply = get(&app(), "/mall").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.json()["threadId"].is_u64());
}

#[tokio::test]
async fn test_connectivity_probe_with_trailing_slash() {
    let reply = get(&app(), "/mall/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.json()["threadId"].is_u64());
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_listing_nests_subcategories() {
    let app = seeded().await;
    let reply = get(&app, "/mall/categories").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!([
            {
                "id": 1,
                "name": "Clothing",
                "subcategories": [
                    {"id": 1, "name": "Shirts", "description": "Tops"},
                    {"id": 2, "name": "Shoes", "description": "Feet"}
                ]
            },
            {"id": 2, "name": "Garden", "subcategories": []}
        ])
    );
}

#[tokio::test]
async fn test_category_tree() {
    let app = seeded().await;

    let reply = get(&app, "/mall/categories/1/tree").await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["subcategories"].as_array().unwrap().len(), 2);

    // inner join: no subcategories, no rows
    assert_eq!(get(&app, "/mall/categories/2/tree").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_category() {
    let app = seeded().await;
    let reply = get(&app, "/mall/categories/99").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_update_category() {
    let app = seeded().await;

    let reply = put(&app, "/mall/categories/2", json!({"name": "Outdoor"})).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["affectedRows"], 1);

    let reply = get(&app, "/mall/categories/2").await;
    assert_eq!(reply.json(), json!([{"id": 2, "name": "Outdoor"}]));
}

#[tokio::test]
async fn test_update_category_requires_name() {
    let app = seeded().await;
    let reply = put(&app, "/mall/categories/2", json!({})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["message"], "Missing required field: name");

    let reply = get(&app, "/mall/categories/2").await;
    assert_eq!(reply.json()[0]["name"], "Garden");
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let app = seeded().await;

    let reply = post(&app, "/mall/categories", json!({"name": ""})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["message"], "Missing required field: name");

    let reply = put(&app, "/mall/categories/2", json!({"name": ""})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = get(&app, "/mall/categories").await;
    assert_eq!(reply.json().as_array().map(Vec::len), Some(2));
    assert_eq!(get(&app, "/mall/categories/2").await.json()[0]["name"], "Garden");
}

#[tokio::test]
async fn test_update_missing_category() {
    let app = seeded().await;
    let reply = put(&app, "/mall/categories/42", json!({"name": "Ghost"})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["affectedRows"], 0);
}

#[tokio::test]
async fn test_delete_category_in_use_is_server_error() {
    let app = seeded().await;
    let reply = delete(&app, "/mall/categories/1").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        reply.json(),
        json!({"status": 500, "message": "Something went wrong"})
    );
}

#[tokio::test]
async fn test_delete_category() {
    let app = seeded().await;
    assert_eq!(delete(&app, "/mall/categories/2").await.status, StatusCode::OK);
    assert_eq!(get(&app, "/mall/categories/2").await.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Subcategories
// =============================================================================

#[tokio::test]
async fn test_subcategories_of_category() {
    let app = seeded().await;

    let reply = get(&app, "/mall/categories/1/subcategories").await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Shirts", "Shoes"]);

    assert_eq!(
        get(&app, "/mall/categories/2/subcategories").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_create_subcategory_uses_path_category() {
    let app = seeded().await;
    let reply = post(
        &app,
        "/mall/categories/2/subcategories",
        json!({"name": "Tools", "category_id": 1}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let id = reply.json()["insertId"].as_u64().unwrap();

    let reply = get(&app, &format!("/mall/subcategories/{}", id)).await;
    assert_eq!(reply.json()[0]["category_id"], 2);
}

#[tokio::test]
async fn test_create_subcategory_under_missing_category() {
    let app = seeded().await;
    let reply = post(&app, "/mall/categories/9/subcategories", json!({"name": "Orphan"})).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_subcategories_in_batch() {
    let app = seeded().await;
    let reply = post(
        &app,
        "/mall/categories/2/subcategories",
        json!([
            {"name": "Tools", "description": "Hand tools"},
            {"name": "Seeds"}
        ]),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({"affectedRows": 2, "insertId": 3}));

    let body = get(&app, "/mall/categories/2/subcategories").await.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tools", "Seeds"]);
    assert_eq!(body[1]["description"], Value::Null);
}

#[tokio::test]
async fn test_batch_with_invalid_item_writes_nothing() {
    let app = seeded().await;
    let reply = post(
        &app,
        "/mall/categories/2/subcategories",
        json!([{"name": "Tools"}, {"description": "no name"}]),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = post(&app, "/mall/categories/2/subcategories", json!([])).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    assert_eq!(
        get(&app, "/mall/categories/2/subcategories").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_update_subcategory_requires_fields() {
    let app = seeded().await;
    assert_eq!(
        put(&app, "/mall/subcategories/1", json!({})).await.status,
        StatusCode::NOT_FOUND
    );

    let reply = put(&app, "/mall/subcategories/1", json!({"description": "Shirts & tees"})).await;
    assert_eq!(reply.status, StatusCode::OK);
    let reply = get(&app, "/mall/subcategories/1").await;
    assert_eq!(reply.json()[0]["description"], "Shirts & tees");
}

#[tokio::test]
async fn test_list_all_subcategories() {
    let app = seeded().await;
    let reply = get(&app, "/mall/subcategories").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_subcategory() {
    let app = seeded().await;
    assert_eq!(delete(&app, "/mall/subcategories/2").await.status, StatusCode::OK);
    assert_eq!(delete(&app, "/mall/subcategories/2").await.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_products_of_subcategory() {
    let app = seeded().await;

    let reply = get(&app, "/mall/subcategories/1/products").await;
    assert_eq!(reply.status, StatusCode::OK);
    let product = &reply.json()[0];
    assert_eq!(product["name"], "Oxford");
    assert_eq!(product["sub_category_id"], 1);
    assert_eq!(product["price"], 19.5);

    assert_eq!(
        get(&app, "/mall/subcategories/2/products").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_get_product() {
    let app = seeded().await;
    let reply = get(&app, "/mall/products/1").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()[0]["quantity"], 3);

    assert_eq!(get(&app, "/mall/products").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_product_requires_name() {
    let app = seeded().await;
    let reply = post(&app, "/mall/subcategories/1/products", json!({"price": 3})).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/mall/products").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_product_rejects_unknown_field() {
    let app = seeded().await;
    let reply = post(
        &app,
        "/mall/subcategories/1/products",
        json!({"name": "Boot", "weight": 2}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["status"], 404);
}

#[tokio::test]
async fn test_update_product() {
    let app = seeded().await;
    let reply = put(&app, "/mall/products/1", json!({"quantity": 10, "color": null})).await;
    assert_eq!(reply.status, StatusCode::OK);

    let product = get(&app, "/mall/products/1").await.json();
    assert_eq!(product[0]["quantity"], 10);
    assert_eq!(product[0]["color"], Value::Null);
}

#[tokio::test]
async fn test_delete_missing_product() {
    let app = seeded().await;
    let reply = delete(&app, "/mall/products/500").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json(), json!({"affectedRows": 0, "insertId": 0}));
}

#[tokio::test]
async fn test_non_numeric_product_id() {
    let app = seeded().await;
    for method in [Method::GET, Method::DELETE] {
        let reply = call(&app, method, "/mall/products/1x", None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }
    // still there
    assert_eq!(get(&app, "/mall/products/1").await.status, StatusCode::OK);
}
