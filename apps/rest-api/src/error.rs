//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the REST API                           │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                    │
//! │         │                                                               │
//! │         ├── DbError      ──┐                                            │
//! │         ├── CoreError    ──┼──► ApiError { code, message }              │
//! │         └── EngineError  ──┘          │                                 │
//! │                                       ▼                                 │
//! │              HTTP status + {"error": CODE, "message": "..."}            │
//! │                                                                         │
//! │  Unexpected persistence failures are logged server-side and surface     │
//! │  as a generic 500 without internals.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use sweetshop_core::{CoreError, ValidationError};
use sweetshop_db::{DbError, EngineError};

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what clients receive when a request fails:
/// ```json
/// {
///   "error": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for sweet 3: available 45, requested 999"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    #[serde(rename = "error")]
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Username or email already registered (400)
    DuplicateIdentity,

    /// Purchase exceeds available stock (400)
    InsufficientStock,

    /// Login failed; deliberately undifferentiated (401)
    InvalidCredentials,

    /// Missing or invalid bearer token (401)
    Unauthorized,

    /// Authenticated but not allowed (403)
    Forbidden,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// The HTTP status this code maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::DuplicateIdentity
            | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id.to_string()),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    /// Creates the undifferentiated login failure.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::DuplicateIdentity,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database error: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SweetNotFound(id) => ApiError::not_found("Sweet", id),
            CoreError::UserNotFound(id) => ApiError::not_found("User", id),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::DuplicateIdentity { .. } => {
                ApiError::new(ErrorCode::DuplicateIdentity, err.to_string())
            }
            CoreError::InvalidCredentials => ApiError::invalid_credentials(),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Domain(e) => e.into(),
            EngineError::Db(e) => e.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InsufficientStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::DuplicateIdentity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::DatabaseError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Sweet", 7);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "Sweet not found: 7");
    }

    #[test]
    fn test_db_unique_violation_maps_to_duplicate() {
        let err: ApiError = DbError::duplicate("username", "alice").into();
        assert_eq!(err.code, ErrorCode::DuplicateIdentity);
    }

    #[test]
    fn test_core_insufficient_stock_maps_to_400() {
        let err: ApiError = CoreError::InsufficientStock {
            sweet_id: 1,
            available: 2,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_db_errors_do_not_leak() {
        let err: ApiError = DbError::QueryFailed("secret table detail".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("secret"));
    }
}
