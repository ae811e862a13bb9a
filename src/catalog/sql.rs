//! # SQL Statements
//!
//! Builds the parameterized statements executed by [`super::MySqlStore`].
//! Every value is a `?` placeholder; identifiers are backquoted names taken
//! from [`Table`].

use super::table::{FieldMap, Table};

/// Every category with its subcategories, one row per pair.
///
/// Ordered by category id so the rows can be regrouped in one pass.
pub const SELECT_LEFT_JOIN: &str = "SELECT c.`id`, c.`name`, s.`id` AS subcategory_id, \
     s.`name` AS subcategory_name, s.`description` \
     FROM `category` c LEFT OUTER JOIN `sub_category` s ON c.`id` = s.`category_id` \
     ORDER BY c.`id`, s.`id`";

/// One category joined with its subcategories. Binds the category id.
pub const SELECT_CATEGORY_TREE: &str = "SELECT c.`id`, c.`name`, s.`id` AS subcategory_id, \
     s.`name` AS subcategory_name, s.`description` \
     FROM `category` c INNER JOIN `sub_category` s ON c.`id` = s.`category_id` \
     WHERE c.`id` = ? \
     ORDER BY s.`id`";

/// Connection id of the pooled connection serving the probe
pub const SELECT_CONNECTION_ID: &str = "SELECT CONNECTION_ID()";

fn quote(ident: &str) -> String {
    format!("`{}`", ident)
}

fn column_list(table: Table) -> String {
    table
        .columns()
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT <columns> FROM <table>`
pub fn select_all(table: Table) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY `id`",
        column_list(table),
        quote(table.name())
    )
}

/// `SELECT <columns> FROM <table> WHERE id = ?`
pub fn select_by_id(table: Table) -> String {
    format!(
        "SELECT {} FROM {} WHERE `id` = ?",
        column_list(table),
        quote(table.name())
    )
}

/// `SELECT <columns> FROM <table> WHERE <parent column> = ?`
///
/// `None` for tables without a parent.
pub fn select_by_parent(table: Table) -> Option<String> {
    let parent = table.parent_column()?;
    Some(format!(
        "SELECT {} FROM {} WHERE {} = ? ORDER BY `id`",
        column_list(table),
        quote(table.name()),
        quote(parent)
    ))
}

/// `INSERT INTO <table> (<fields>) VALUES (?, ...)`
pub fn insert(fields: &FieldMap) -> String {
    let columns: Vec<String> = fields.columns().map(quote).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(fields.table().name()),
        columns.join(", "),
        placeholders
    )
}

/// `INSERT INTO <table> (<columns>) VALUES (?, ...), (?, ...)`, one group
/// per row
pub fn insert_many(table: Table, columns: &[&'static str], row_count: usize) -> String {
    let group = format!("({})", vec!["?"; columns.len()].join(", "));
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote(table.name()),
        columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", "),
        vec![group; row_count].join(", ")
    )
}

/// `UPDATE <table> SET <field> = ?, ... WHERE id = ?`
///
/// The id placeholder comes last, after the field values.
pub fn update(fields: &FieldMap) -> String {
    let assignments: Vec<String> = fields
        .columns()
        .map(|c| format!("{} = ?", quote(c)))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE `id` = ?",
        quote(fields.table().name()),
        assignments.join(", ")
    )
}

/// `DELETE FROM <table> WHERE id = ?`
pub fn delete(table: Table) -> String {
    format!("DELETE FROM {} WHERE `id` = ?", quote(table.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_statements() {
        assert_eq!(
            select_all(Table::Category),
            "SELECT `id`, `name` FROM `category` ORDER BY `id`"
        );
        assert_eq!(
            select_by_id(Table::Subcategory),
            "SELECT `id`, `category_id`, `name`, `description` FROM `sub_category` WHERE `id` = ?"
        );
    }

    #[test]
    fn test_select_by_parent() {
        assert!(select_by_parent(Table::Category).is_none());
        let sql = select_by_parent(Table::Product).unwrap();
        assert!(sql.starts_with("SELECT `id`, `name`, `description`"));
        assert!(sql.ends_with("FROM `product` WHERE `sub_category_id` = ? ORDER BY `id`"));
    }

    #[test]
    fn test_insert_uses_placeholders() {
        let fields =
            FieldMap::from_json(Table::Subcategory, &json!({"name": "Shoes", "description": "x"}))
                .unwrap();
        assert_eq!(
            insert(&fields),
            "INSERT INTO `sub_category` (`description`, `name`) VALUES (?, ?)"
        );
    }

    #[test]
    fn test_insert_many_repeats_value_groups() {
        assert_eq!(
            insert_many(Table::Subcategory, &["category_id", "name"], 3),
            "INSERT INTO `sub_category` (`category_id`, `name`) VALUES (?, ?), (?, ?), (?, ?)"
        );
    }

    #[test]
    fn test_update_binds_id_last() {
        let fields = FieldMap::from_json(Table::Category, &json!({"name": "New"})).unwrap();
        assert_eq!(
            update(&fields),
            "UPDATE `category` SET `name` = ? WHERE `id` = ?"
        );
    }

    #[test]
    fn test_hostile_field_never_reaches_sql() {
        let body = json!({"name` = 'x'; DROP TABLE category; --": "v"});
        assert!(FieldMap::from_json(Table::Category, &body).is_err());
    }

    #[test]
    fn test_delete_statement() {
        assert_eq!(delete(Table::Product), "DELETE FROM `product` WHERE `id` = ?");
    }

    #[test]
    fn test_left_join_is_ordered_by_category() {
        assert!(SELECT_LEFT_JOIN.contains("LEFT OUTER JOIN"));
        assert!(SELECT_LEFT_JOIN.ends_with("ORDER BY c.`id`, s.`id`"));
    }
}
