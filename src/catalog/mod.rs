//! # Catalog Query Layer
//!
//! Tables, parameterized SQL, the [`CatalogStore`] seam with its MySQL and
//! in-memory implementations, and the join-flattening transform used by the
//! category listing.

pub mod config;
pub mod errors;
pub mod flatten;
pub mod memory;
pub mod model;
pub mod mysql;
pub mod sql;
pub mod store;
pub mod table;

pub use config::DatabaseConfig;
pub use errors::{StoreError, StoreResult};
pub use flatten::{flatten_categories, into_joined_rows};
pub use memory::MemoryStore;
pub use model::{
    Category, CategoryWithSubcategories, JoinedRow, MutationResult, Product, Subcategory,
    SubcategorySummary,
};
pub use mysql::MySqlStore;
pub use store::CatalogStore;
pub use table::{batch_columns, BindValue, FieldMap, Table};
