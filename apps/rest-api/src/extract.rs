//! Request extractors for authenticated identities.
//!
//! Route handlers declare what they need in their signature: `CurrentUser`
//! for any authenticated caller, `AdminUser` for admin-only operations.
//! Extraction validates the bearer token against the app's JWT manager and
//! rejects with 401/403 before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller, as asserted by a valid bearer token.
///
/// The identity is taken from the token claims; handlers trust it and pass
/// the id down as the actor for inventory operations.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let token = extract_bearer_token(header)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let claims = state.jwt.validate_token(token)?;

        Ok(CurrentUser {
            id: claims.user_id()?,
            username: claims.username,
            is_admin: claims.admin,
        })
    }
}

/// An authenticated caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(ApiError::forbidden("Admin privileges required"));
        }

        Ok(AdminUser(user))
    }
}
