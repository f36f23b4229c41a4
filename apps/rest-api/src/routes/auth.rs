//! # Auth Routes
//!
//! Registration and login. Both issue the same token shape.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ErrorCode};
use crate::AppState;
use sweetshop_core::validation::{validate_email, validate_password, validate_username};
use sweetshop_core::UserSummary;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserSummary,
}

/// `POST /api/v1/auth/register`
///
/// Registers a new account and immediately issues an access token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let username = req.username.trim();
    let email = req.email.trim();

    let users = state.db.users();
    if users.get_by_username(username).await?.is_some() {
        return Err(ApiError::new(
            ErrorCode::DuplicateIdentity,
            format!("username '{}' already exists", username),
        ));
    }
    if users.get_by_email(email).await?.is_some() {
        return Err(ApiError::new(
            ErrorCode::DuplicateIdentity,
            format!("email '{}' already exists", email),
        ));
    }

    // The unique indexes still backstop a racing duplicate registration;
    // the DbError → DuplicateIdentity mapping covers that path.
    let password_hash = hash_password(&req.password)?;
    let user = users.insert(username, email, &password_hash).await?;

    info!(user_id = user.id, username = %user.username, "User registered");

    let access_token = state.jwt.generate_token(&user)?;
    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: user.into(),
        }),
    ))
}

/// `POST /api/v1/auth/login`
///
/// Verifies credentials and issues an access token. Unknown username and
/// wrong password produce the identical response.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.db.users().get_by_username(req.username.trim()).await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            warn!(username = %req.username, "Login rejected");
            return Err(ApiError::invalid_credentials());
        }
    };

    info!(user_id = user.id, username = %user.username, "User logged in");

    let access_token = state.jwt.generate_token(&user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: user.into(),
    }))
}
