//! # Inventory Routes
//!
//! The stock-changing surface: purchase, restock, audit history, and the
//! caller's own purchase records. All handlers delegate to the inventory
//! engine; role checks happen here, never inside the engine.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{AdminUser, CurrentUser};
use crate::AppState;
use sweetshop_core::{InventoryLogEntry, PurchaseRecord};

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub sweet_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub sweet_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearPurchasesResponse {
    pub deleted: u64,
}

/// `POST /api/v1/inventory/purchase` (authenticated)
pub async fn purchase_sweet(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseRecord>), ApiError> {
    let record = state
        .db
        .inventory()
        .purchase(user.id, req.sweet_id, req.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /api/v1/inventory/restock` (admin)
pub async fn restock_sweet(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<RestockRequest>,
) -> Result<(StatusCode, Json<InventoryLogEntry>), ApiError> {
    let entry = state
        .db
        .inventory()
        .restock(admin.0.id, req.sweet_id, req.quantity, req.notes.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /api/v1/inventory/history/{sweet_id}` (admin)
///
/// Newest-first audit trail for a sweet.
pub async fn get_history(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(sweet_id): Path<i64>,
) -> Result<Json<Vec<InventoryLogEntry>>, ApiError> {
    let entries = state.db.inventory().history(sweet_id).await?;
    Ok(Json(entries))
}

/// `GET /api/v1/inventory/purchases` (authenticated)
///
/// The caller's own purchase records, newest first.
pub async fn list_my_purchases(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<PurchaseRecord>>, ApiError> {
    let records = state.db.purchases().list_for_user(user.id).await?;
    Ok(Json(records))
}

/// `DELETE /api/v1/inventory/purchases` (authenticated)
///
/// Clears the caller's own purchase records and reports the count removed.
pub async fn clear_my_purchases(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ClearPurchasesResponse>, ApiError> {
    let deleted = state.db.purchases().delete_for_user(user.id).await?;
    Ok(Json(ClearPurchasesResponse { deleted }))
}
