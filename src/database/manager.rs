use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

pub type DbPool = SqlitePool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(db_err.message().to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Connection pool construction and schema management
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for the configured database. Foreign keys are enabled on
    /// every connection so `customers.owner_id` is enforced.
    pub async fn connect(config: &DatabaseConfig) -> Result<DbPool, DatabaseError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.connection_timeout.max(1)))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
                    sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect(&config.url)
            .await?;

        info!("Created database pool for: {}", redact(&config.url));
        Ok(pool)
    }

    /// Apply any migrations that have not run yet
    pub async fn migrate(pool: &DbPool) -> Result<(), DatabaseError> {
        MIGRATOR.run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &DbPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

/// Strip credentials and query parameters before a URL reaches the logs.
fn redact(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    match without_query.rfind('@') {
        Some(idx) => &without_query[idx + 1..],
        None => without_query,
    }
}
