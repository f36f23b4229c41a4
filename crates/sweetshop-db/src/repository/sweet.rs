//! # Sweet Repository
//!
//! Database operations for the sweets catalog.
//!
//! ## Key Operations
//! - CRUD with sparse partial updates
//! - Category-filtered listing in stable id order
//! - Cascading delete of purchase history and inventory logs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use sweetshop_core::{NewSweet, Sweet, SweetPatch};

/// Repository for sweet database operations — the catalog store.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sweets();
///
/// let sweet = repo.get_by_id(1).await?;
/// let page = repo.list(0, 100, Some("Traditional")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SweetRepository {
    pool: SqlitePool,
}

impl SweetRepository {
    /// Creates a new SweetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SweetRepository { pool }
    }

    /// Gets a sweet by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Sweet))` - Sweet found
    /// * `Ok(None)` - Sweet not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sweet>> {
        let sweet = sqlx::query_as::<_, Sweet>(
            r#"
            SELECT
                id, name, category, price_cents, quantity,
                description, image_url, created_by, created_at, updated_at
            FROM sweets
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sweet)
    }

    /// Lists sweets in ascending id order with optional category filter.
    ///
    /// ## Arguments
    /// * `skip` - Rows to skip (pagination offset)
    /// * `limit` - Maximum rows to return
    /// * `category` - Exact-match category filter, when present
    pub async fn list(
        &self,
        skip: i64,
        limit: i64,
        category: Option<&str>,
    ) -> DbResult<Vec<Sweet>> {
        debug!(skip, limit, category = ?category, "Listing sweets");

        let sweets = match category {
            Some(category) => {
                sqlx::query_as::<_, Sweet>(
                    r#"
                    SELECT
                        id, name, category, price_cents, quantity,
                        description, image_url, created_by, created_at, updated_at
                    FROM sweets
                    WHERE category = ?1
                    ORDER BY id
                    LIMIT ?2 OFFSET ?3
                    "#,
                )
                .bind(category)
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sweet>(
                    r#"
                    SELECT
                        id, name, category, price_cents, quantity,
                        description, image_url, created_by, created_at, updated_at
                    FROM sweets
                    ORDER BY id
                    LIMIT ?1 OFFSET ?2
                    "#,
                )
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(sweets)
    }

    /// Inserts a new sweet and returns the stored row.
    ///
    /// ## Arguments
    /// * `new` - Sweet fields
    /// * `created_by` - The creating user, when known
    pub async fn insert(&self, new: &NewSweet, created_by: Option<i64>) -> DbResult<Sweet> {
        debug!(name = %new.name, category = %new.category, "Inserting sweet");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sweets (
                name, category, price_cents, quantity,
                description, image_url, created_by,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.price_cents)
        .bind(new.quantity)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let sweet = sqlx::query_as::<_, Sweet>(
            r#"
            SELECT
                id, name, category, price_cents, quantity,
                description, image_url, created_by, created_at, updated_at
            FROM sweets
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(sweet)
    }

    /// Applies a sparse patch to a sweet.
    ///
    /// Only the supplied fields change; `updated_at` is bumped on success.
    ///
    /// ## Returns
    /// * `Ok(Some(Sweet))` - Updated sweet
    /// * `Ok(None)` - Sweet not found
    pub async fn update(&self, id: i64, patch: &SweetPatch) -> DbResult<Option<Sweet>> {
        debug!(id, "Updating sweet");

        let Some(mut sweet) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        patch.apply(&mut sweet);
        sweet.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE sweets SET
                name = ?2,
                category = ?3,
                price_cents = ?4,
                quantity = ?5,
                description = ?6,
                image_url = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(sweet.id)
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price_cents)
        .bind(sweet.quantity)
        .bind(&sweet.description)
        .bind(&sweet.image_url)
        .bind(sweet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Some(sweet))
    }

    /// Deletes a sweet together with its dependent rows.
    ///
    /// Purchase history and inventory logs for the sweet are removed in the
    /// same transaction, so no orphans survive a partial failure.
    ///
    /// ## Returns
    /// * `Ok(true)` - Sweet (and dependents) removed
    /// * `Ok(false)` - Sweet not found
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting sweet");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM inventory_logs WHERE sweet_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM purchase_history WHERE sweet_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sweets WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts sweets in the catalog (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sweets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
