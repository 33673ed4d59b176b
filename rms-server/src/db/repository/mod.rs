//! Repository Module
//!
//! CRUD operations over the SQLite tables. Each module is a set of free
//! functions taking `&SqlitePool`; multi-statement operations open their
//! own transaction with [`begin_write`].

pub mod dining_table;
pub mod menu;
pub mod order;
pub mod setting;
pub mod usage;
pub mod user;

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Row is still referenced by another table
    #[error("In use: {0}")]
    InUse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::InUse(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for RepoError {
    fn from(err: argon2::password_hash::Error) -> Self {
        RepoError::Database(format!("Failed to hash secret: {err}"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Start a transaction that holds the write lock from its first statement
///
/// A deferred transaction that reads before writing fails with
/// `SQLITE_BUSY_SNAPSHOT` when another connection commits in between, and
/// `busy_timeout` never retries that. `BEGIN IMMEDIATE` waits on the lock instead.
pub(crate) async fn begin_write(pool: &SqlitePool) -> RepoResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
