//! Row types for the catalog tables.

use serde::{Deserialize, Serialize};

/// `category` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// `sub_category` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subcategory {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// `product` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub sub_category_id: Option<i64>,
}

/// One row of the category ⟕ sub_category join.
///
/// A category without subcategories yields a single row whose
/// subcategory columns are all null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JoinedRow {
    pub id: i64,
    pub name: String,
    pub subcategory_id: Option<i64>,
    pub subcategory_name: Option<String>,
    pub description: Option<String>,
}

/// Subcategory as nested under its category in the joined listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategorySummary {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Category with its subcategories, produced by [`super::flatten_categories`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithSubcategories {
    pub id: i64,
    pub name: String,
    pub subcategories: Vec<SubcategorySummary>,
}

/// Outcome of an INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub affected_rows: u64,
    pub insert_id: u64,
}

impl MutationResult {
    pub fn new(affected_rows: u64, insert_id: u64) -> Self {
        Self {
            affected_rows,
            insert_id,
        }
    }

    /// True when the statement changed nothing
    pub fn is_noop(&self) -> bool {
        self.affected_rows == 0
    }
}
