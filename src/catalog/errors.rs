//! # Query Layer Errors

use thiserror::Error;

/// Result type for query layer operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Query layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    // ==================
    // Field map errors
    // ==================
    /// Field map source was not a JSON object
    #[error("Expected a JSON object of fields")]
    NotAnObject,

    /// Field is not a writable column of the table
    #[error("Unknown field '{field}' for table {table}")]
    UnknownField { table: &'static str, field: String },

    /// Field value is not a scalar
    #[error("Invalid value for field '{0}'")]
    InvalidValue(String),

    /// Multi-row insert without rows
    #[error("Expected at least one row")]
    EmptyBatch,

    /// Multi-row insert mixing tables
    #[error("Row for table {found} in a batch for {expected}")]
    MixedBatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Table has no parent column to filter on
    #[error("Table {0} has no parent column")]
    NoParent(&'static str),

    // ==================
    // Execution errors
    // ==================
    /// Driver or connectivity failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Foreign key or other constraint rejected the statement
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Row could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// In-memory tables lock poisoned
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Whether the error stems from caller input rather than the database
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::NotAnObject
                | StoreError::UnknownField { .. }
                | StoreError::InvalidValue(_)
                | StoreError::EmptyBatch
                | StoreError::MixedBatch { .. }
                | StoreError::NoParent(_)
        )
    }
}
