//! Error types for the job-board data layer

use thiserror::Error;

/// Result type alias for data-layer operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for model and query operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Update called with no fields to change
    #[error("Empty update payload: at least one field is required")]
    EmptyPayload,

    /// Numeric filter range where the minimum exceeds the maximum
    #[error("Invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: i32, max: i32 },

    /// Insert collides with an existing natural key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Lookup, update, or delete targeted a nonexistent key
    #[error("Not found: {0}")]
    NotFound(String),

    /// Referenced row does not exist (foreign key violation)
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Pool error
    #[error("Pool error: {0}")]
    Pool(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl ModelError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a duplicate key error
    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::DuplicateKey(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a duplicate key error
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// Check if this is a caller-input error (as opposed to an
    /// infrastructure failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyPayload
                | Self::InvalidRange { .. }
                | Self::DuplicateKey(_)
                | Self::NotFound(_)
                | Self::ForeignKey(_)
        )
    }

    /// Parse a tokio_postgres error into a more specific ModelError.
    ///
    /// Unique-constraint violations become [`ModelError::DuplicateKey`] so
    /// that an insert losing the duplicate-check race surfaces the same
    /// error as the check itself.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::DuplicateKey(format!("{}: {}", constraint, message)),
                "23503" => return Self::ForeignKey(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

impl From<deadpool_postgres::PoolError> for ModelError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
