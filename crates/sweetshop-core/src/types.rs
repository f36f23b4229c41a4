//! # Domain Types
//!
//! Core domain types used throughout the sweet shop backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐      │
//! │  │     Sweet       │   │  PurchaseRecord  │   │ InventoryLogEntry│      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │      │
//! │  │  id (i64)       │   │  id (i64)        │   │  id (i64)        │      │
//! │  │  name, category │   │  user_id (FK)    │   │  sweet_id (FK)   │      │
//! │  │  price_cents    │   │  sweet_id (FK)   │   │  action          │      │
//! │  │  quantity       │   │  total_price     │   │  quantity_change │      │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────┘      │
//! │                                                                         │
//! │  Sweet is the aggregate root. PurchaseRecord and InventoryLogEntry      │
//! │  reference it by id and are never mutated after creation.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Sweet
// =============================================================================

/// A catalog item with a price and a stock quantity.
///
/// Invariants: `quantity >= 0` and `price_cents >= 0` always hold; the
/// database CHECK constraints and the inventory engine enforce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sweet {
    /// Unique identifier (autoincrement).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Category used for catalog filtering.
    pub category: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub quantity: i64,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Optional image reference.
    pub image_url: Option<String>,

    /// User that created this sweet, if still present.
    pub created_by: Option<i64>,

    /// When the sweet was created.
    pub created_at: DateTime<Utc>,

    /// When the sweet was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Sweet {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be purchased from current stock.
    pub fn can_purchase(&self, quantity: i64) -> bool {
        quantity > 0 && self.quantity >= quantity
    }
}

/// Fields for creating a new sweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    #[serde(default)]
    pub quantity: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Sparse update for a sweet.
///
/// Only the supplied fields change; `None` means "leave untouched".
/// Listing the mutable fields explicitly keeps patch application
/// compile-time checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl SweetPatch {
    /// Applies the patch to a sweet, field by field.
    pub fn apply(&self, sweet: &mut Sweet) {
        if let Some(name) = &self.name {
            sweet.name = name.clone();
        }
        if let Some(category) = &self.category {
            sweet.category = category.clone();
        }
        if let Some(price_cents) = self.price_cents {
            sweet.price_cents = price_cents;
        }
        if let Some(quantity) = self.quantity {
            sweet.quantity = quantity;
        }
        if let Some(description) = &self.description {
            sweet.description = Some(description.clone());
        }
        if let Some(image_url) = &self.image_url {
            sweet.image_url = Some(image_url.clone());
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}

// =============================================================================
// Inventory Action
// =============================================================================

/// The kind of stock-changing event recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(rename_all = "UPPERCASE")]
pub enum InventoryAction {
    /// Stock-decreasing event tied to a buyer.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "PURCHASE"))]
    Purchase,
    /// Stock-increasing event, admin-only.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "RESTOCK"))]
    Restock,
}

impl InventoryAction {
    /// Canonical string form, as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InventoryAction::Purchase => "PURCHASE",
            InventoryAction::Restock => "RESTOCK",
        }
    }
}

impl fmt::Display for InventoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inventory Log Entry
// =============================================================================

/// An entry in the append-only stock audit trail.
///
/// Immutable once appended; deleted only when its sweet is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryLogEntry {
    pub id: i64,
    pub sweet_id: i64,
    pub action: InventoryAction,
    /// Signed stock delta: negative for purchases, positive for restocks.
    pub quantity_change: i64,
    /// The actor attributed to this stock change.
    pub performed_by: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Purchase Record
// =============================================================================

/// A completed purchase.
///
/// The total price is snapshotted at purchase time so later price changes
/// never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseRecord {
    pub id: i64,
    pub user_id: i64,
    pub sweet_id: i64,
    /// Units purchased. Always positive.
    pub quantity: i64,
    /// Total in cents: unit price × quantity at time of purchase (frozen).
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Returns the snapshotted total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC hash string. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing view of a user, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sweet() -> Sweet {
        Sweet {
            id: 1,
            name: "Gulab Jamun".to_string(),
            category: "Traditional".to_string(),
            price_cents: 15000,
            quantity: 50,
            description: None,
            image_url: None,
            created_by: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_purchase() {
        let sweet = sample_sweet();
        assert!(sweet.can_purchase(5));
        assert!(sweet.can_purchase(50));
        assert!(!sweet.can_purchase(51));
        assert!(!sweet.can_purchase(0));
        assert!(!sweet.can_purchase(-1));
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut sweet = sample_sweet();
        let patch = SweetPatch {
            price_cents: Some(12500),
            description: Some("Soft milk dumplings".to_string()),
            ..Default::default()
        };
        patch.apply(&mut sweet);

        assert_eq!(sweet.price_cents, 12500);
        assert_eq!(sweet.description.as_deref(), Some("Soft milk dumplings"));
        // Untouched fields keep their values
        assert_eq!(sweet.name, "Gulab Jamun");
        assert_eq!(sweet.quantity, 50);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(SweetPatch::default().is_empty());
        let patch = SweetPatch {
            name: Some("Barfi".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_inventory_action_serialization() {
        let json = serde_json::to_string(&InventoryAction::Purchase).unwrap();
        assert_eq!(json, "\"PURCHASE\"");
        let parsed: InventoryAction = serde_json::from_str("\"RESTOCK\"").unwrap();
        assert_eq!(parsed, InventoryAction::Restock);
        assert_eq!(InventoryAction::Restock.as_str(), "RESTOCK");
    }

    #[test]
    fn test_user_summary_drops_credentials() {
        let user = User {
            id: 7,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            is_admin: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let summary = UserSummary::from(user);
        assert_eq!(summary.id, 7);
        assert!(summary.is_admin);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("argon2"));
    }
}
