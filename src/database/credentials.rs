use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::password::{check_strength, hash_password, verify_password, PasswordError};
use crate::database::manager::{DatabaseError, DbPool};
use crate::database::models::customer::MAX_FIELD_LENGTH;
use crate::database::models::user::{User, UserId};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("Password must be at least 6 characters long.")]
    WeakPassword,

    #[error("Email already exists.")]
    Conflict,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Credential processing failed: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// User accounts and their bcrypt password hashes
#[derive(Debug, Clone)]
pub struct CredentialStore {
    pool: DbPool,
    bcrypt_cost: u32,
    // Compared against on unknown emails so every login pays one bcrypt check
    decoy_hash: Arc<OnceCell<String>>,
}

impl CredentialStore {
    pub fn new(pool: DbPool, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            bcrypt_cost,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Create an account and return its id.
    ///
    /// Duplicate emails are caught both by a lookup before the insert and by
    /// the unique index during it; either path reports `Conflict`.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId, CredentialError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialError::Validation(
                "Email and password are required.".to_string(),
            ));
        }
        if email.chars().count() > MAX_FIELD_LENGTH {
            return Err(CredentialError::Validation(
                "Email must be a maximum of 255 characters.".to_string(),
            ));
        }
        check_strength(password).map_err(|_| CredentialError::WeakPassword)?;

        if self.find_by_email(email).await?.is_some() {
            return Err(CredentialError::Conflict);
        }

        let password_hash = self.hash(password).await?;

        let inserted = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (email, password_hash) VALUES (?, ?) RETURNING id",
        )
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from);

        match inserted {
            Ok(id) => {
                info!("Registered user {} ({})", id, email);
                Ok(id)
            }
            Err(DatabaseError::UniqueViolation(_)) => {
                warn!("Registration for {} lost a concurrent insert race", email);
                Err(CredentialError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a login attempt; unknown emails and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, CredentialError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let Some(user) = self.find_by_email(email).await? else {
            let decoy = self.decoy_hash().await?;
            self.check(password, decoy).await?;
            return Err(CredentialError::InvalidCredentials);
        };

        if self.check(password, user.password_hash.clone()).await? {
            Ok(user)
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn check(&self, password: &str, stored: String) -> Result<bool, CredentialError> {
        let candidate = password.to_string();
        tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))
    }

    /// Hash of a throwaway password at the configured cost, built on first use.
    async fn decoy_hash(&self) -> Result<String, CredentialError> {
        self.decoy_hash
            .get_or_try_init(|| self.hash("decoy-password-never-matches"))
            .await
            .cloned()
    }

    async fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?
            .map_err(|e: PasswordError| CredentialError::Internal(e.to_string()))
    }
}
