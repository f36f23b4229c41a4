//! # Inventory Engine
//!
//! Orchestrates purchase and restock operations against the catalog and the
//! ledger, enforcing the stock invariants.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Purchase Transaction                               │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── SELECT sweet ──────────── missing? → SweetNotFound (rollback)    │
//! │    │                                                                    │
//! │    ├── UPDATE sweets                                                    │
//! │    │     SET quantity = quantity - :qty                                 │
//! │    │     WHERE id = :id AND quantity >= :qty                            │
//! │    │         0 rows? → InsufficientStock (rollback)                     │
//! │    │                                                                    │
//! │    ├── INSERT purchase_history (total snapshotted)                      │
//! │    │                                                                    │
//! │    └── INSERT inventory_logs (delta = -qty)                             │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The guarded UPDATE serializes concurrent purchases: two calls that     │
//! │  are individually valid against stale stock cannot both pass the        │
//! │  quantity >= :qty predicate once the first one commits.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock decrement, purchase record and ledger entry commit together or not
//! at all; a reader can never observe one without the others.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::error::DbError;
use crate::repository::inventory_log::InventoryLogRepository;
use crate::repository::purchase::PurchaseRepository;
use sweetshop_core::validation::validate_quantity;
use sweetshop_core::{
    CoreError, InventoryAction, InventoryLogEntry, PurchaseRecord, Sweet, ValidationError,
};

// =============================================================================
// Engine Error
// =============================================================================

/// Errors produced by inventory operations.
///
/// Domain-rule violations (not found, insufficient stock, bad quantity)
/// surface as `Domain`; infrastructure failures as `Db`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        EngineError::Db(DbError::from(err))
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Domain(CoreError::Validation(err))
    }
}

/// Result type for inventory operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Inventory Engine
// =============================================================================

/// Stateless orchestrator for stock-changing operations.
///
/// Holds no in-memory state of its own; every call is a self-contained
/// transaction against the catalog and the ledger. Authorization is NOT
/// enforced here — the HTTP boundary decides who may call what, and the
/// engine trusts the actor id it is given.
#[derive(Debug, Clone)]
pub struct InventoryEngine {
    pool: SqlitePool,
}

impl InventoryEngine {
    /// Creates a new InventoryEngine.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryEngine { pool }
    }

    /// Purchases `quantity` units of a sweet on behalf of `actor_id`.
    ///
    /// ## Steps
    /// 1. Validate `quantity > 0`
    /// 2. Fetch the sweet (price snapshot) or fail with `SweetNotFound`
    /// 3. Guarded stock decrement; zero rows affected means another
    ///    purchase won the race or stock was short — `InsufficientStock`
    /// 4. Insert the purchase record with `total = price × quantity`
    /// 5. Append a `PURCHASE` ledger entry with `delta = -quantity`
    ///
    /// All of 3-5 commit atomically; on any failure nothing is persisted.
    pub async fn purchase(
        &self,
        actor_id: i64,
        sweet_id: i64,
        quantity: i64,
    ) -> EngineResult<PurchaseRecord> {
        validate_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;

        let sweet = sqlx::query_as::<_, Sweet>(
            r#"
            SELECT
                id, name, category, price_cents, quantity,
                description, image_url, created_by, created_at, updated_at
            FROM sweets
            WHERE id = ?1
            "#,
        )
        .bind(sweet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::SweetNotFound(sweet_id))?;

        let result = sqlx::query(
            r#"
            UPDATE sweets
            SET quantity = quantity - ?2, updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(sweet_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::InsufficientStock {
                sweet_id,
                available: sweet.quantity,
                requested: quantity,
            }
            .into());
        }

        let total = sweet.price().multiply_quantity(quantity);
        let record =
            PurchaseRepository::insert_on(&mut *tx, actor_id, sweet_id, quantity, total.cents())
                .await?;

        let notes = format!("Purchase of {} units by user {}", quantity, actor_id);
        InventoryLogRepository::append_on(
            &mut *tx,
            sweet_id,
            InventoryAction::Purchase,
            -quantity,
            actor_id,
            Some(&notes),
        )
        .await?;

        tx.commit().await?;

        info!(
            sweet_id,
            actor_id,
            quantity,
            total_cents = total.cents(),
            "Purchase completed"
        );

        Ok(record)
    }

    /// Restocks a sweet by `quantity` units on behalf of `actor_id`.
    ///
    /// Non-positive quantities are rejected; restock only ever increases
    /// stock. When `notes` is absent or blank, a summary note is generated.
    ///
    /// Stock increment and ledger entry commit atomically.
    pub async fn restock(
        &self,
        actor_id: i64,
        sweet_id: i64,
        quantity: i64,
        notes: Option<&str>,
    ) -> EngineResult<InventoryLogEntry> {
        validate_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE sweets
            SET quantity = quantity + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(sweet_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::SweetNotFound(sweet_id).into());
        }

        let notes = match notes {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => format!("Restock of {} units", quantity),
        };
        let entry = InventoryLogRepository::append_on(
            &mut *tx,
            sweet_id,
            InventoryAction::Restock,
            quantity,
            actor_id,
            Some(&notes),
        )
        .await?;

        tx.commit().await?;

        info!(sweet_id, actor_id, quantity, "Restock completed");

        Ok(entry)
    }

    /// Gets the stock-change history for a sweet, newest first.
    ///
    /// Pure read; delegates to the ledger. An unknown sweet yields an empty
    /// history.
    pub async fn history(&self, sweet_id: i64) -> EngineResult<Vec<InventoryLogEntry>> {
        let entries = InventoryLogRepository::new(self.pool.clone())
            .history_for(sweet_id)
            .await?;
        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
