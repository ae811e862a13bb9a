//! # In-Memory Store
//!
//! [`CatalogStore`] over process-local tables. Used by the test suite and by
//! `serve --memory` when no database is available.
//!
//! Mirrors the MySQL behaviour the controllers depend on: auto-increment ids,
//! affected-row counts, foreign keys that reject dangling parents and block
//! deleting referenced rows, and ordered join output.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::model::{JoinedRow, MutationResult};
use super::store::CatalogStore;
use super::table::{batch_columns, FieldMap, Table};

type Row = Map<String, Value>;

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<Table, BTreeMap<i64, Row>>,
    next_id: HashMap<Table, i64>,
}

impl Tables {
    fn table(&self, table: Table) -> impl Iterator<Item = &Row> {
        self.rows.get(&table).into_iter().flat_map(|rows| rows.values())
    }

    fn contains(&self, table: Table, id: i64) -> bool {
        self.rows
            .get(&table)
            .map(|rows| rows.contains_key(&id))
            .unwrap_or(false)
    }

    /// Reject a parent id that does not exist
    fn check_parent(&self, fields: &FieldMap) -> StoreResult<()> {
        let table = fields.table();
        let (Some(column), Some(parent)) = (table.parent_column(), table.parent()) else {
            return Ok(());
        };
        let Some(value) = fields.get(column) else {
            return Ok(());
        };
        if value.is_null() {
            return Ok(());
        }
        match value.as_i64() {
            Some(id) if self.contains(parent, id) => Ok(()),
            _ => Err(StoreError::Constraint(format!(
                "{}.{} references a missing {} row",
                table, column, parent
            ))),
        }
    }

    /// Store a new row with the next auto-increment id
    fn insert_row(&mut self, fields: &FieldMap) -> i64 {
        let table = fields.table();
        let next = self.next_id.entry(table).or_insert(0);
        *next += 1;
        let id = *next;

        let mut row: Row = table
            .columns()
            .iter()
            .map(|c| (c.to_string(), Value::Null))
            .collect();
        row.insert("id".to_string(), Value::from(id));
        apply(&mut row, fields);

        self.rows.entry(table).or_default().insert(id, row);
        id
    }

    /// Reject deleting a row that children still reference
    fn check_unreferenced(&self, table: Table, id: i64) -> StoreResult<()> {
        for child in [Table::Subcategory, Table::Product] {
            if child.parent() != Some(table) {
                continue;
            }
            let Some(column) = child.parent_column() else {
                continue;
            };
            if self.table(child).any(|row| row_i64(row, column) == Some(id)) {
                return Err(StoreError::Constraint(format!(
                    "{} row {} is referenced by {}",
                    table, id, child
                )));
            }
        }
        Ok(())
    }
}

fn row_i64(row: &Row, column: &str) -> Option<i64> {
    match row.get(column)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn row_string(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn apply(row: &mut Row, fields: &FieldMap) {
    for (column, value) in fields.columns().zip(fields.values()) {
        row.insert(column.to_string(), Value::from(value));
    }
}

fn joined_row(category: &Row, sub: Option<&Row>) -> Option<JoinedRow> {
    Some(JoinedRow {
        id: row_i64(category, "id")?,
        name: row_string(category, "name").unwrap_or_default(),
        subcategory_id: sub.and_then(|s| row_i64(s, "id")),
        subcategory_name: sub.and_then(|s| row_string(s, "name")),
        description: sub.and_then(|s| row_string(s, "description")),
    })
}

/// Process-local catalog store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> StoreResult<T>) -> StoreResult<T> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        f(&tables)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut tables)
    }

    /// Subcategory rows of `category_id`, ordered by id
    fn children<'a>(tables: &'a Tables, category_id: i64) -> Vec<&'a Row> {
        tables
            .table(Table::Subcategory)
            .filter(|row| row_i64(row, "category_id") == Some(category_id))
            .collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> StoreResult<u64> {
        self.read(|_| Ok(1))
    }

    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        self.read(|tables| Ok(tables.table(table).cloned().map(Value::Object).collect()))
    }

    async fn select_by_id(&self, table: Table, id: i64) -> StoreResult<Vec<Value>> {
        self.read(|tables| {
            Ok(tables
                .rows
                .get(&table)
                .and_then(|rows| rows.get(&id))
                .cloned()
                .map(Value::Object)
                .into_iter()
                .collect())
        })
    }

    async fn select_by_parent(&self, table: Table, parent_id: i64) -> StoreResult<Vec<Value>> {
        let column = table.parent_column().ok_or(StoreError::NoParent(table.name()))?;
        self.read(|tables| {
            Ok(tables
                .table(table)
                .filter(|row| row_i64(row, column) == Some(parent_id))
                .cloned()
                .map(Value::Object)
                .collect())
        })
    }

    async fn select_left_join(&self) -> StoreResult<Vec<JoinedRow>> {
        self.read(|tables| {
            let mut out = Vec::new();
            for category in tables.table(Table::Category) {
                let Some(id) = row_i64(category, "id") else {
                    continue;
                };
                let subs = Self::children(tables, id);
                if subs.is_empty() {
                    out.extend(joined_row(category, None));
                }
                for sub in subs {
                    out.extend(joined_row(category, Some(sub)));
                }
            }
            Ok(out)
        })
    }

    async fn select_category_tree(&self, category_id: i64) -> StoreResult<Vec<JoinedRow>> {
        self.read(|tables| {
            let Some(category) = tables
                .rows
                .get(&Table::Category)
                .and_then(|rows| rows.get(&category_id))
            else {
                return Ok(Vec::new());
            };
            Ok(Self::children(tables, category_id)
                .into_iter()
                .filter_map(|sub| joined_row(category, Some(sub)))
                .collect())
        })
    }

    async fn insert(&self, fields: &FieldMap) -> StoreResult<MutationResult> {
        self.write(|tables| {
            tables.check_parent(fields)?;
            let id = tables.insert_row(fields);
            Ok(MutationResult::new(1, id as u64))
        })
    }

    async fn insert_many(&self, table: Table, rows: &[FieldMap]) -> StoreResult<MutationResult> {
        batch_columns(table, rows)?;
        self.write(|tables| {
            for fields in rows {
                tables.check_parent(fields)?;
            }
            let ids: Vec<i64> = rows.iter().map(|fields| tables.insert_row(fields)).collect();
            let first = ids.first().copied().unwrap_or_default();
            Ok(MutationResult::new(ids.len() as u64, first as u64))
        })
    }

    async fn update(&self, fields: &FieldMap, id: i64) -> StoreResult<MutationResult> {
        let table = fields.table();
        self.write(|tables| {
            tables.check_parent(fields)?;
            match tables.rows.get_mut(&table).and_then(|rows| rows.get_mut(&id)) {
                Some(row) => {
                    apply(row, fields);
                    Ok(MutationResult::new(1, 0))
                }
                None => Ok(MutationResult::new(0, 0)),
            }
        })
    }

    async fn delete(&self, table: Table, id: i64) -> StoreResult<MutationResult> {
        self.write(|tables| {
            if !tables.contains(table, id) {
                return Ok(MutationResult::new(0, 0));
            }
            tables.check_unreferenced(table, id)?;
            if let Some(rows) = tables.rows.get_mut(&table) {
                rows.remove(&id);
            }
            Ok(MutationResult::new(1, 0))
        })
    }
}
