//! # Join Flattening
//!
//! Regroups the flat category ⟕ sub_category rows into nested categories.

use super::model::{CategoryWithSubcategories, JoinedRow, SubcategorySummary};

/// Group joined rows into categories.
///
/// `rows` must be ordered by category id: a new output category is opened
/// every time the category id changes, so interleaved ids produce duplicate
/// entries. Rows with a null `subcategory_id` contribute the category only.
pub fn flatten_categories<I>(rows: I) -> Vec<CategoryWithSubcategories>
where
    I: IntoIterator<Item = JoinedRow>,
{
    let mut categories: Vec<CategoryWithSubcategories> = Vec::new();
    let mut current_id: Option<i64> = None;

    for row in rows {
        if current_id != Some(row.id) {
            current_id = Some(row.id);
            categories.push(CategoryWithSubcategories {
                id: row.id,
                name: row.name,
                subcategories: Vec::new(),
            });
        }

        if let Some(sub_id) = row.subcategory_id {
            // current_id was set above, so the last entry is the open category
            if let Some(current) = categories.last_mut() {
                current.subcategories.push(SubcategorySummary {
                    id: sub_id,
                    name: row.subcategory_name,
                    description: row.description,
                });
            }
        }
    }

    categories
}

/// Expand nested categories back into joined rows.
///
/// A category with no subcategories becomes one row with null subcategory
/// columns, matching what the outer join returns for it.
pub fn into_joined_rows(categories: &[CategoryWithSubcategories]) -> Vec<JoinedRow> {
    let mut rows = Vec::new();
    for category in categories {
        if category.subcategories.is_empty() {
            rows.push(JoinedRow {
                id: category.id,
                name: category.name.clone(),
                subcategory_id: None,
                subcategory_name: None,
                description: None,
            });
            continue;
        }
        for sub in &category.subcategories {
            rows.push(JoinedRow {
                id: category.id,
                name: category.name.clone(),
                subcategory_id: Some(sub.id),
                subcategory_name: sub.name.clone(),
                description: sub.description.clone(),
            });
        }
    }
    rows
}
