//! Database error types

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Underlying sqlx failure
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored value could not be mapped to a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl From<DbError> for boards_core::Error {
    fn from(err: DbError) -> Self {
        boards_core::Error::Storage(err.to_string())
    }
}
