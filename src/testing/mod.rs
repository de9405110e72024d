use crate::config::DatabaseConfig;
use crate::database::manager::{DatabaseManager, DbPool};
use crate::database::models::user::UserId;

/// Fresh migrated in-memory database. A single connection keeps every query
/// on the same in-memory instance.
pub async fn memory_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    };

    let pool = DatabaseManager::connect(&config)
        .await
        .expect("failed to open in-memory database");
    DatabaseManager::migrate(&pool)
        .await
        .expect("failed to migrate in-memory database");
    pool
}

/// Insert a user row directly, skipping password hashing.
pub async fn seed_user(pool: &DbPool, email: &str) -> UserId {
    sqlx::query_scalar("INSERT INTO users (email, password_hash) VALUES (?, ?) RETURNING id")
        .bind(email)
        .bind("$2b$04$unusedunusedunusedunuseduOq1Pz7X2pJxw0S3nQm6lTqW8eVyK")
        .fetch_one(pool)
        .await
        .expect("failed to seed user")
}
