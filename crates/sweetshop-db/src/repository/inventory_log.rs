//! # Inventory Log Repository
//!
//! Database operations for the stock audit trail — the ledger.
//!
//! Entries are append-only: no update or delete is exposed here. The only
//! way a log row disappears is the catalog store's cascading sweet delete.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use sweetshop_core::{InventoryAction, InventoryLogEntry};

/// Repository for inventory log operations.
#[derive(Debug, Clone)]
pub struct InventoryLogRepository {
    pool: SqlitePool,
}

impl InventoryLogRepository {
    /// Creates a new InventoryLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryLogRepository { pool }
    }

    /// Appends a log entry on an existing connection.
    ///
    /// The inventory engine calls this inside its transaction so the entry
    /// commits together with the stock mutation it records.
    pub async fn append_on(
        conn: &mut SqliteConnection,
        sweet_id: i64,
        action: InventoryAction,
        quantity_change: i64,
        performed_by: i64,
        notes: Option<&str>,
    ) -> DbResult<InventoryLogEntry> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO inventory_logs (
                sweet_id, action, quantity_change, performed_by, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sweet_id)
        .bind(action)
        .bind(quantity_change)
        .bind(performed_by)
        .bind(notes)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();
        let entry = sqlx::query_as::<_, InventoryLogEntry>(
            r#"
            SELECT id, sweet_id, action, quantity_change, performed_by, notes, created_at
            FROM inventory_logs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(entry)
    }

    /// Appends a log entry using the pool.
    pub async fn append(
        &self,
        sweet_id: i64,
        action: InventoryAction,
        quantity_change: i64,
        performed_by: i64,
        notes: Option<&str>,
    ) -> DbResult<InventoryLogEntry> {
        let mut conn = self.pool.acquire().await?;
        Self::append_on(&mut conn, sweet_id, action, quantity_change, performed_by, notes).await
    }

    /// Gets the full history for a sweet, newest first.
    ///
    /// The id tiebreak keeps the order strict when two entries share a
    /// timestamp.
    pub async fn history_for(&self, sweet_id: i64) -> DbResult<Vec<InventoryLogEntry>> {
        debug!(sweet_id, "Fetching inventory history");

        let entries = sqlx::query_as::<_, InventoryLogEntry>(
            r#"
            SELECT id, sweet_id, action, quantity_change, performed_by, notes, created_at
            FROM inventory_logs
            WHERE sweet_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(sweet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts log entries for a sweet (for diagnostics).
    pub async fn count_for(&self, sweet_id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_logs WHERE sweet_id = ?1")
                .bind(sweet_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
