//! # Tables and Field Maps
//!
//! The fixed set of tables the API may touch, their columns, and the
//! validated column → value maps used by INSERT and UPDATE.
//!
//! Identifiers used in SQL always come from [`Table`]; request input is only
//! ever matched against these lists, never spliced into a statement.

use std::fmt;

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};

/// Catalog tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Category,
    Subcategory,
    Product,
}

impl Table {
    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Category => "category",
            Table::Subcategory => "sub_category",
            Table::Product => "product",
        }
    }

    /// All columns, in select order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Category => &["id", "name"],
            Table::Subcategory => &["id", "category_id", "name", "description"],
            Table::Product => &[
                "id",
                "name",
                "description",
                "size",
                "color",
                "price",
                "quantity",
                "sub_category_id",
            ],
        }
    }

    /// Columns a request may set. `id` is assigned by the database.
    pub fn writable_columns(&self) -> &'static [&'static str] {
        &self.columns()[1..]
    }

    /// Foreign key column pointing at the parent table
    pub fn parent_column(&self) -> Option<&'static str> {
        match self {
            Table::Category => None,
            Table::Subcategory => Some("category_id"),
            Table::Product => Some("sub_category_id"),
        }
    }

    /// Table referenced by [`Table::parent_column`]
    pub fn parent(&self) -> Option<Table> {
        match self {
            Table::Category => None,
            Table::Subcategory => Some(Table::Category),
            Table::Product => Some(Table::Subcategory),
        }
    }

    /// Resolve a request field name to the table's own column identifier
    pub fn writable_column(&self, field: &str) -> StoreResult<&'static str> {
        self.writable_columns()
            .iter()
            .copied()
            .find(|c| *c == field)
            .ok_or_else(|| StoreError::UnknownField {
                table: self.name(),
                field: field.to_string(),
            })
    }
}

/// Columns of a multi-row insert into `table`: every column any row sets,
/// in table order. Rows that leave a column out insert NULL there.
pub fn batch_columns(table: Table, rows: &[FieldMap]) -> StoreResult<Vec<&'static str>> {
    if rows.is_empty() {
        return Err(StoreError::EmptyBatch);
    }
    if let Some(row) = rows.iter().find(|row| row.table() != table) {
        return Err(StoreError::MixedBatch {
            expected: table.name(),
            found: row.table().name(),
        });
    }
    Ok(table
        .writable_columns()
        .iter()
        .copied()
        .filter(|column| rows.iter().any(|row| row.get(column).is_some()))
        .collect())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl BindValue {
    /// Convert a JSON scalar. Arrays and objects are rejected.
    pub fn from_json(field: &str, value: &Value) -> StoreResult<Self> {
        match value {
            Value::Null => Ok(BindValue::Null),
            Value::Bool(b) => Ok(BindValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(BindValue::Int(i)),
                None => n
                    .as_f64()
                    .map(BindValue::Float)
                    .ok_or_else(|| StoreError::InvalidValue(field.to_string())),
            },
            Value::String(s) => Ok(BindValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(StoreError::InvalidValue(field.to_string())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null)
    }

    /// Integer view, accepting numeric strings the way MySQL coerces them
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BindValue::Int(i) => Some(*i),
            BindValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&BindValue> for Value {
    fn from(value: &BindValue) -> Self {
        match value {
            BindValue::Null => Value::Null,
            BindValue::Bool(b) => Value::Bool(*b),
            BindValue::Int(i) => Value::from(*i),
            BindValue::Float(f) => Value::from(*f),
            BindValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// Validated column → value assignments for one table
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    table: Table,
    fields: Vec<(&'static str, BindValue)>,
}

impl FieldMap {
    /// Empty map for `table`
    pub fn new(table: Table) -> Self {
        Self {
            table,
            fields: Vec::new(),
        }
    }

    /// Build from a request body object
    pub fn from_json(table: Table, body: &Value) -> StoreResult<Self> {
        let obj = body.as_object().ok_or(StoreError::NotAnObject)?;
        Self::from_object(table, obj)
    }

    fn from_object(table: Table, obj: &Map<String, Value>) -> StoreResult<Self> {
        let mut map = Self::new(table);
        for (field, value) in obj {
            let column = table.writable_column(field)?;
            map.fields.push((column, BindValue::from_json(field, value)?));
        }
        Ok(map)
    }

    /// Assign `column`, replacing any earlier value
    pub fn set(&mut self, column: &str, value: BindValue) -> StoreResult<()> {
        let column = self.table.writable_column(column)?;
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((column, value)),
        }
        Ok(())
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn get(&self, column: &str) -> Option<&BindValue> {
        self.fields.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(c, _)| *c)
    }

    /// Values in placeholder order
    pub fn values(&self) -> impl Iterator<Item = &BindValue> {
        self.fields.iter().map(|(_, v)| v)
    }
}
