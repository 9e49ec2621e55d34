//! Repository Module
//!
//! CRUD operations against the SQLite tables. Repositories are plain
//! functions taking a `&SqlitePool`.

pub mod client;
pub mod dashboard;
pub mod reservation;
pub mod room;
pub mod setting;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.message().contains("UNIQUE constraint failed") {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.message().contains("FOREIGN KEY constraint failed") {
                return RepoError::Validation("Referenced record does not exist".to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
