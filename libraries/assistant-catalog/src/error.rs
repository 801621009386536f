/// Catalog-specific errors
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Could not open the pool
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A row could not be mapped onto its domain type
    #[error("Invalid row in \"{table}\": {message}")]
    Decode {
        table: &'static str,
        message: String,
    },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    /// Create a decode error
    pub fn decode(table: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            table,
            message: message.into(),
        }
    }
}
