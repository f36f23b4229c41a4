//! # Sweet Routes
//!
//! Catalog CRUD. Reads are public; writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::extract::AdminUser;
use crate::AppState;
use sweetshop_core::validation::{
    validate_category, validate_price_cents, validate_stock_level, validate_sweet_name,
};
use sweetshop_core::{NewSweet, Sweet, SweetPatch, DEFAULT_LIST_LIMIT};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

/// `GET /api/v1/sweets?skip&limit&category` (public)
pub async fn list_sweets(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Sweet>>, ApiError> {
    let skip = params.skip.unwrap_or(0).max(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(0);

    let sweets = state
        .db
        .sweets()
        .list(skip, limit, params.category.as_deref())
        .await?;

    Ok(Json(sweets))
}

/// `GET /api/v1/sweets/{id}` (public)
pub async fn get_sweet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Sweet>, ApiError> {
    state
        .db
        .sweets()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sweet", id))
}

/// `POST /api/v1/sweets` (admin)
pub async fn create_sweet(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<NewSweet>,
) -> Result<(StatusCode, Json<Sweet>), ApiError> {
    validate_sweet_name(&req.name)?;
    validate_category(&req.category)?;
    validate_price_cents(req.price_cents)?;
    validate_stock_level(req.quantity)?;

    let sweet = state.db.sweets().insert(&req, Some(admin.0.id)).await?;

    info!(sweet_id = sweet.id, name = %sweet.name, created_by = admin.0.id, "Sweet created");

    Ok((StatusCode::CREATED, Json(sweet)))
}

/// `PUT /api/v1/sweets/{id}` (admin)
///
/// Sparse update: only the supplied fields change.
pub async fn update_sweet(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(patch): Json<SweetPatch>,
) -> Result<Json<Sweet>, ApiError> {
    if let Some(name) = &patch.name {
        validate_sweet_name(name)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_stock_level(quantity)?;
    }

    state
        .db
        .sweets()
        .update(id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sweet", id))
}

/// `DELETE /api/v1/sweets/{id}` (admin)
///
/// Cascades: purchase history and inventory logs for the sweet go with it.
pub async fn delete_sweet(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.db.sweets().delete(id).await? {
        return Err(ApiError::not_found("Sweet", id));
    }

    info!(sweet_id = id, deleted_by = admin.0.id, "Sweet deleted");

    Ok(Json(serde_json::json!({
        "message": "Sweet deleted successfully"
    })))
}
