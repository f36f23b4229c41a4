//! # Purchase Repository
//!
//! Database operations for purchase history.
//!
//! ## Snapshot Pattern
//! The total price is copied onto the record at purchase time. This
//! preserves billing history even if the sweet's price changes later.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use sweetshop_core::PurchaseRecord;

/// Repository for purchase history operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Inserts a purchase record on an existing connection.
    ///
    /// The inventory engine calls this inside its transaction so the record
    /// commits together with the stock decrement and the ledger entry.
    pub async fn insert_on(
        conn: &mut SqliteConnection,
        user_id: i64,
        sweet_id: i64,
        quantity: i64,
        total_price_cents: i64,
    ) -> DbResult<PurchaseRecord> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO purchase_history (
                user_id, sweet_id, quantity, total_price_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user_id)
        .bind(sweet_id)
        .bind(quantity)
        .bind(total_price_cents)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        let record = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT id, user_id, sweet_id, quantity, total_price_cents, created_at
            FROM purchase_history
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// Inserts a purchase record using the pool.
    pub async fn insert(
        &self,
        user_id: i64,
        sweet_id: i64,
        quantity: i64,
        total_price_cents: i64,
    ) -> DbResult<PurchaseRecord> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_on(&mut conn, user_id, sweet_id, quantity, total_price_cents).await
    }

    /// Gets a purchase by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<PurchaseRecord>> {
        let record = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT id, user_id, sweet_id, quantity, total_price_cents, created_at
            FROM purchase_history
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists a user's purchases, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<PurchaseRecord>> {
        debug!(user_id, "Listing purchases for user");

        let records = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT id, user_id, sweet_id, quantity, total_price_cents, created_at
            FROM purchase_history
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lists all purchases for a sweet, newest first.
    pub async fn list_for_sweet(&self, sweet_id: i64) -> DbResult<Vec<PurchaseRecord>> {
        let records = sqlx::query_as::<_, PurchaseRecord>(
            r#"
            SELECT id, user_id, sweet_id, quantity, total_price_cents, created_at
            FROM purchase_history
            WHERE sweet_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(sweet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Deletes all purchases belonging to a user.
    ///
    /// Backs the clear-own-history endpoint.
    ///
    /// ## Returns
    /// Number of records removed.
    pub async fn delete_for_user(&self, user_id: i64) -> DbResult<u64> {
        debug!(user_id, "Clearing purchase history for user");

        let result = sqlx::query("DELETE FROM purchase_history WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
