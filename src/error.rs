//! Error handling module
//!
//! Every failure on the movie listing path funnels into one error type. The
//! response contract flattens all of them into a 500 envelope; the enum keeps
//! the kinds apart for logs and tests only.

use thiserror::Error;

/// Application-wide error type for the movie listing path
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Invalid {name} parameter: {value}")]
    PageParameter { name: &'static str, value: String },

    #[error("Unsupported column type '{ty}' in column '{column}'")]
    UnsupportedColumn { column: String, ty: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// Short label for the failure kind. Appears in logs only; the response
    /// envelope never carries it.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "connection",
            AppError::Database(_) => "database",
            AppError::PageParameter { .. } => "page_parameter",
            AppError::UnsupportedColumn { .. } => "column_decode",
            AppError::Serialize(_) => "serialize",
        }
    }
}

/// Result type alias for the movie listing path
pub type ApiResult<T> = Result<T, AppError>;
