//! # Catalog Store
//!
//! The query layer seam between HTTP controllers and the database.

use async_trait::async_trait;
use serde_json::Value;

use super::errors::StoreResult;
use super::model::{JoinedRow, MutationResult};
use super::table::{FieldMap, Table};

/// Query layer operations over the catalog tables.
///
/// Selects return rows as JSON objects keyed by column name; mutations
/// return the affected-row count. An empty row set or zero affected rows is
/// a successful outcome, not an error.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check out a connection and report its id
    async fn ping(&self) -> StoreResult<u64>;

    /// All rows of `table`
    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>>;

    /// Rows of `table` with the given id (zero or one)
    async fn select_by_id(&self, table: Table, id: i64) -> StoreResult<Vec<Value>>;

    /// Rows of `table` whose parent column equals `parent_id`
    async fn select_by_parent(&self, table: Table, parent_id: i64) -> StoreResult<Vec<Value>>;

    /// Category ⟕ sub_category, ordered by category id
    async fn select_left_join(&self) -> StoreResult<Vec<JoinedRow>>;

    /// One category ⋈ its subcategories, ordered by subcategory id
    async fn select_category_tree(&self, category_id: i64) -> StoreResult<Vec<JoinedRow>>;

    /// Insert one row into `fields.table()`
    async fn insert(&self, fields: &FieldMap) -> StoreResult<MutationResult>;

    /// Insert several rows into `table` in one statement, all or nothing.
    ///
    /// `insert_id` is the id of the first row.
    async fn insert_many(&self, table: Table, rows: &[FieldMap]) -> StoreResult<MutationResult>;

    /// Update the row with `id` in `fields.table()`
    async fn update(&self, fields: &FieldMap, id: i64) -> StoreResult<MutationResult>;

    /// Delete the row with `id` from `table`
    async fn delete(&self, table: Table, id: i64) -> StoreResult<MutationResult>;
}
