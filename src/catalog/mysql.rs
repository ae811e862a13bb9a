//! # MySQL Store
//!
//! [`CatalogStore`] over a sqlx MySQL pool. The pool is built once at
//! startup and shared by every request.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{FromRow, MySql};

use super::config::DatabaseConfig;
use super::errors::{StoreError, StoreResult};
use super::model::{Category, JoinedRow, MutationResult, Product, Subcategory};
use super::sql;
use super::store::CatalogStore;
use super::table::{batch_columns, BindValue, FieldMap, Table};

/// MySQL-backed catalog store
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Build the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            target_db = %config.display_target(),
            max_connections = config.max_connections,
            "mysql pool ready"
        );

        Ok(Self { pool })
    }

    /// Run a select for `table`, decoding through the table's row type
    async fn fetch_rows(
        &self,
        table: Table,
        statement: &str,
        param: Option<i64>,
    ) -> StoreResult<Vec<Value>> {
        match table {
            Table::Category => self.fetch_as::<Category>(statement, param).await,
            Table::Subcategory => self.fetch_as::<Subcategory>(statement, param).await,
            Table::Product => self.fetch_as::<Product>(statement, param).await,
        }
    }

    async fn fetch_as<T>(&self, statement: &str, param: Option<i64>) -> StoreResult<Vec<Value>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Serialize + Send + Unpin,
    {
        let mut query = sqlx::query_as::<MySql, T>(statement);
        if let Some(param) = param {
            query = query.bind(param);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| serde_json::to_value(row).map_err(StoreError::from))
            .collect()
    }

    async fn execute(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
        table: Table,
    ) -> StoreResult<MutationResult> {
        let result = query.execute(&self.pool).await.map_err(classify)?;
        let outcome = MutationResult::new(result.rows_affected(), result.last_insert_id());
        tracing::debug!(
            table = table.name(),
            affected_rows = outcome.affected_rows,
            insert_id = outcome.insert_id,
            "mutation executed"
        );
        Ok(outcome)
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &BindValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        BindValue::Null => query.bind(None::<String>),
        BindValue::Bool(b) => query.bind(*b),
        BindValue::Int(i) => query.bind(*i),
        BindValue::Float(f) => query.bind(*f),
        BindValue::Text(s) => query.bind(s.clone()),
    }
}

/// Bind every field value in placeholder order
fn bind_fields<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    fields: &FieldMap,
) -> Query<'q, MySql, MySqlArguments> {
    fields.values().fold(query, bind_value)
}

/// Separate constraint violations from other driver failures
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            StoreError::Constraint(db.message().to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl CatalogStore for MySqlStore {
    async fn ping(&self) -> StoreResult<u64> {
        let id = sqlx::query_scalar::<_, u64>(sql::SELECT_CONNECTION_ID)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn select_all(&self, table: Table) -> StoreResult<Vec<Value>> {
        self.fetch_rows(table, &sql::select_all(table), None).await
    }

    async fn select_by_id(&self, table: Table, id: i64) -> StoreResult<Vec<Value>> {
        self.fetch_rows(table, &sql::select_by_id(table), Some(id))
            .await
    }

    async fn select_by_parent(&self, table: Table, parent_id: i64) -> StoreResult<Vec<Value>> {
        let statement = sql::select_by_parent(table).ok_or(StoreError::NoParent(table.name()))?;
        self.fetch_rows(table, &statement, Some(parent_id)).await
    }

    async fn select_left_join(&self) -> StoreResult<Vec<JoinedRow>> {
        let rows = sqlx::query_as::<_, JoinedRow>(sql::SELECT_LEFT_JOIN)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn select_category_tree(&self, category_id: i64) -> StoreResult<Vec<JoinedRow>> {
        let rows = sqlx::query_as::<_, JoinedRow>(sql::SELECT_CATEGORY_TREE)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, fields: &FieldMap) -> StoreResult<MutationResult> {
        let statement = sql::insert(fields);
        let query = bind_fields(sqlx::query(&statement), fields);
        self.execute(query, fields.table()).await
    }

    async fn insert_many(&self, table: Table, rows: &[FieldMap]) -> StoreResult<MutationResult> {
        let columns = batch_columns(table, rows)?;
        let statement = sql::insert_many(table, &columns, rows.len());
        let mut query = sqlx::query(&statement);
        for row in rows {
            for column in &columns {
                query = bind_value(query, row.get(column).unwrap_or(&BindValue::Null));
            }
        }
        self.execute(query, table).await
    }

    async fn update(&self, fields: &FieldMap, id: i64) -> StoreResult<MutationResult> {
        let statement = sql::update(fields);
        let query = bind_fields(sqlx::query(&statement), fields).bind(id);
        self.execute(query, fields.table()).await
    }

    async fn delete(&self, table: Table, id: i64) -> StoreResult<MutationResult> {
        let statement = sql::delete(table);
        let query = sqlx::query(&statement).bind(id);
        self.execute(query, table).await
    }
}
