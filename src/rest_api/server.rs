//! # REST API Router
//!
//! Axum routes for the catalog resources.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};

use crate::catalog::CatalogStore;

use super::errors::RestResult;
use super::response::PingResponse;
use super::{categories, products, subcategories};

/// REST API server state
pub struct RestServer<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore + 'static> RestServer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The connectivity probe alone, for mounting at `<prefix>/`.
    ///
    /// Nesting maps the router's `/` to the bare prefix only.
    pub fn ping_route(&self) -> MethodRouter {
        get(ping_handler::<S>).with_state(self.store.clone())
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(ping_handler::<S>))
            // Categories
            .route(
                "/categories",
                get(categories::list::<S>).post(categories::create::<S>),
            )
            .route(
                "/categories/:id",
                get(categories::get::<S>)
                    .put(categories::update::<S>)
                    .delete(categories::delete::<S>),
            )
            .route("/categories/:id/tree", get(categories::tree::<S>))
            // Subcategories
            .route("/subcategories", get(subcategories::list_all::<S>))
            .route(
                "/categories/:id/subcategories",
                get(subcategories::list_for_category::<S>).post(subcategories::create::<S>),
            )
            .route(
                "/subcategories/:sub_id",
                get(subcategories::get::<S>)
                    .put(subcategories::update::<S>)
                    .delete(subcategories::delete::<S>),
            )
            // Products
            .route("/products", get(products::list_all::<S>))
            .route(
                "/subcategories/:sub_id/products",
                get(products::list_for_subcategory::<S>).post(products::create::<S>),
            )
            .route(
                "/products/:p_id",
                get(products::get::<S>)
                    .put(products::update::<S>)
                    .delete(products::delete::<S>),
            )
            .with_state(self.store)
    }
}

/// Database connectivity probe
async fn ping_handler<S: CatalogStore + 'static>(
    State(store): State<Arc<S>>,
) -> RestResult<Json<PingResponse>> {
    let thread_id = store.ping().await?;
    tracing::info!(thread_id, "database reachable");
    Ok(Json(PingResponse { thread_id }))
}
