//! Database Module
//!
//! Handles SQLite connection pool, migrations and first-run seeding

pub mod repository;

use std::str::FromStr;

use shared::models::{Role, UserCreate};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::core::DefaultManager;
use crate::utils::AppError;
use repository::{RepoResult, user};

/// Database service, owns the SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database at `database_url` with WAL mode and run migrations
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(pool).await
    }

    /// Private in-memory database, used by tests
    ///
    /// A single connection that never expires: every connection to
    /// `:memory:` is a separate database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database url: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Create the bootstrap manager when the user table is empty
    ///
    /// Returns `true` if a user was created.
    pub async fn seed_default_manager(&self, manager: &DefaultManager) -> RepoResult<bool> {
        if user::count(&self.pool).await? > 0 {
            return Ok(false);
        }

        let created = user::create(
            &self.pool,
            UserCreate {
                username: manager.username.clone(),
                password: manager.password.clone(),
                name: "Manager".to_string(),
                role: Role::Manager,
                email: None,
                telephone: None,
            },
        )
        .await?;

        tracing::info!(user_id = %created.id, username = %created.username, "Default manager created");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_runs_migrations_and_seeds_name() {
        let db = DbService::in_memory().await.unwrap();
        let setting = repository::setting::find_by_name(&db.pool, "NAME")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(setting.value, "RMS");
    }

    #[tokio::test]
    async fn test_default_manager_seeded_once() {
        let db = DbService::in_memory().await.unwrap();
        let manager = DefaultManager {
            username: "admin".into(),
            password: "admin123".into(),
        };

        assert!(db.seed_default_manager(&manager).await.unwrap());
        assert!(!db.seed_default_manager(&manager).await.unwrap());

        let record = user::find_by_username(&db.pool, "admin").await.unwrap().unwrap();
        assert_eq!(record.role, Role::Manager);
        assert_ne!(record.password, "admin123");
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("rms.db").display());

        let db = DbService::new(&url).await.unwrap();
        let manager = DefaultManager {
            username: "admin".into(),
            password: "admin123".into(),
        };
        db.seed_default_manager(&manager).await.unwrap();
        db.pool.close().await;

        // migrations are idempotent and the row is still there
        let reopened = DbService::new(&url).await.unwrap();
        assert_eq!(user::count(&reopened.pool).await.unwrap(), 1);
    }
}
