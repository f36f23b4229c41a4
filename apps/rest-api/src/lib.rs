//! # Sweet Shop REST API
//!
//! HTTP surface for the sweet shop backend.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          REST API Surface                               │
//! │                                                                         │
//! │  POST   /api/v1/auth/register            public                         │
//! │  POST   /api/v1/auth/login               public                         │
//! │                                                                         │
//! │  GET    /api/v1/sweets                   public                         │
//! │  GET    /api/v1/sweets/{id}              public                         │
//! │  POST   /api/v1/sweets                   admin                          │
//! │  PUT    /api/v1/sweets/{id}              admin                          │
//! │  DELETE /api/v1/sweets/{id}              admin                          │
//! │                                                                         │
//! │  POST   /api/v1/inventory/purchase       authenticated                  │
//! │  POST   /api/v1/inventory/restock        admin                          │
//! │  GET    /api/v1/inventory/history/{id}   admin                          │
//! │  GET    /api/v1/inventory/purchases      authenticated                  │
//! │  DELETE /api/v1/inventory/purchases      authenticated                  │
//! │                                                                         │
//! │  GET    /health                          public                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - HTTP server port (default: 8080)
//! - `DATABASE_PATH` - SQLite database file (default: ./sweetshop.db)
//! - `JWT_SECRET` - Secret for JWT signing
//! - `JWT_ACCESS_LIFETIME_SECS` - Access token lifetime (default: 1800)

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

use crate::auth::JwtManager;
use sweetshop_db::Database;

/// Shared application state.
///
/// Handed to every handler through axum's `State` extractor; nothing in the
/// app reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the application state from a connected database and config.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = Arc::new(JwtManager::new(
            config.jwt_secret.clone(),
            config.jwt_access_lifetime_secs,
        ));

        AppState { db, jwt, config }
    }
}

/// Builds the axum router with all routes wired to the given state.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/auth/register", post(routes::auth::register))
        .route("/api/v1/auth/login", post(routes::auth::login))
        .route(
            "/api/v1/sweets",
            get(routes::sweets::list_sweets).post(routes::sweets::create_sweet),
        )
        .route(
            "/api/v1/sweets/:id",
            get(routes::sweets::get_sweet)
                .put(routes::sweets::update_sweet)
                .delete(routes::sweets::delete_sweet),
        )
        .route(
            "/api/v1/inventory/purchase",
            post(routes::inventory::purchase_sweet),
        )
        .route(
            "/api/v1/inventory/restock",
            post(routes::inventory::restock_sweet),
        )
        .route(
            "/api/v1/inventory/history/:sweet_id",
            get(routes::inventory::get_history),
        )
        .route(
            "/api/v1/inventory/purchases",
            get(routes::inventory::list_my_purchases)
                .delete(routes::inventory::clear_my_purchases),
        )
        .with_state(state)
}
