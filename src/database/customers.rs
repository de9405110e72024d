use thiserror::Error;
use tracing::{info, warn};

use crate::database::manager::{DatabaseError, DbPool};
use crate::database::models::customer::{Customer, CustomerId, CustomerInput};
use crate::database::models::user::UserId;
use crate::database::paging::{Page, PageRequest};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Customer not found")]
    NotFound,

    #[error("Email must be unique.")]
    Conflict,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match DatabaseError::from(err) {
            DatabaseError::UniqueViolation(_) => RepositoryError::Conflict,
            other => RepositoryError::Database(other),
        }
    }
}

/// Customer records. Every query is scoped by owner; a customer owned by
/// someone else behaves exactly like a missing one.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: DbPool,
}

impl CustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Owned customers in insertion order, windowed by `request`. Pages past
    /// the end come back empty.
    pub async fn list(
        &self,
        owner_id: UserId,
        request: PageRequest,
    ) -> Result<Page<Customer>, RepositoryError> {
        // Count and window from the same snapshot
        let mut tx = self.pool.begin().await?;

        let total_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE owner_id = ?")
                .bind(owner_id)
                .fetch_one(&mut *tx)
                .await?;

        let items = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, owner_id FROM customers
             WHERE owner_id = ?
             ORDER BY id ASC
             LIMIT ? OFFSET ?",
        )
        .bind(owner_id)
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            request,
            total_items,
        })
    }

    pub async fn create(
        &self,
        owner_id: UserId,
        input: &CustomerInput,
    ) -> Result<Customer, RepositoryError> {
        if self.email_taken(input.email(), None).await? {
            return Err(RepositoryError::Conflict);
        }

        // A concurrent insert can still win between the check and this write;
        // the unique index turns that into `Conflict` via `From<sqlx::Error>`.
        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, email, owner_id) VALUES (?, ?, ?)
             RETURNING id, name, email, owner_id",
        )
        .bind(input.name())
        .bind(input.email())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| log_conflict(e.into(), input.email()))?;

        info!("User {} created customer {}", owner_id, customer.id);
        Ok(customer)
    }

    pub async fn get(
        &self,
        owner_id: UserId,
        customer_id: CustomerId,
    ) -> Result<Customer, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, owner_id FROM customers WHERE id = ? AND owner_id = ?",
        )
        .bind(customer_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Callers that must not reveal email collisions on foreign records
    /// check ownership with `get` first; the write itself is owner-scoped.
    pub async fn update(
        &self,
        owner_id: UserId,
        customer_id: CustomerId,
        input: &CustomerInput,
    ) -> Result<Customer, RepositoryError> {
        if self.email_taken(input.email(), Some(customer_id)).await? {
            return Err(RepositoryError::Conflict);
        }

        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers
             SET name = ?, email = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE id = ? AND owner_id = ?
             RETURNING id, name, email, owner_id",
        )
        .bind(input.name())
        .bind(input.email())
        .bind(customer_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| log_conflict(e.into(), input.email()))?
        .ok_or(RepositoryError::NotFound)?;

        info!("User {} updated customer {}", owner_id, customer.id);
        Ok(customer)
    }

    pub async fn delete(
        &self,
        owner_id: UserId,
        customer_id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ? AND owner_id = ?")
            .bind(customer_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("User {} deleted customer {}", owner_id, customer_id);
        Ok(())
    }

    /// Email uniqueness spans every owner, optionally ignoring one record.
    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<CustomerId>,
    ) -> Result<bool, RepositoryError> {
        let existing: Option<CustomerId> =
            sqlx::query_scalar("SELECT id FROM customers WHERE email = ? LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(matches!(existing, Some(id) if Some(id) != exclude))
    }
}

fn log_conflict(err: RepositoryError, email: &str) -> RepositoryError {
    if matches!(err, RepositoryError::Conflict) {
        warn!("Customer email {} claimed by a concurrent write", email);
    }
    err
}
