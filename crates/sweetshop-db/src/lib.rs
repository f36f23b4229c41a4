//! # sweetshop-db: Database Layer for the Sweet Shop Backend
//!
//! This crate provides database access for the sweet shop system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sweet Shop Data Flow                             │
//! │                                                                         │
//! │  HTTP handler (purchase_sweet)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   sweetshop-db (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐      │    │
//! │  │   │   Database    │   │ Repositories  │   │  Migrations  │      │    │
//! │  │   │   (pool.rs)   │   │ (sweet.rs,..) │   │  (embedded)  │      │    │
//! │  │   │               │   │               │   │              │      │    │
//! │  │   │ SqlitePool    │◄──│ SweetRepo     │   │ 001_init.sql │      │    │
//! │  │   │ Connection    │   │ LedgerRepo    │   │ ...          │      │    │
//! │  │   │ Management    │   │ ...           │   │              │      │    │
//! │  │   └───────┬───────┘   └───────────────┘   └──────────────┘      │    │
//! │  │           │                                                     │    │
//! │  │   ┌───────▼────────────────────────────────────────────────┐    │    │
//! │  │   │ InventoryEngine (engine.rs)                            │    │    │
//! │  │   │ purchase / restock / history as single transactions    │    │    │
//! │  │   └────────────────────────────────────────────────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode, foreign keys on)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sweets, users, purchases, logs)
//! - [`engine`] - The inventory engine (transactional stock mutations)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sweetshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./sweetshop.db")).await?;
//!
//! let sweets = db.sweets().list(0, 100, None).await?;
//! let record = db.inventory().purchase(user_id, sweet_id, 5).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{EngineError, EngineResult, InventoryEngine};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::inventory_log::InventoryLogRepository;
pub use repository::purchase::PurchaseRepository;
pub use repository::sweet::SweetRepository;
pub use repository::user::UserRepository;
