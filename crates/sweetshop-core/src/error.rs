//! # Error Types
//!
//! Domain-specific error types for sweetshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweetshop-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  sweetshop-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  REST API errors (in app)                                               │
//! │  └── ApiError         - What HTTP clients see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, available stock, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are caught at the HTTP boundary and translated to client responses.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sweet cannot be found.
    #[error("Sweet not found: {0}")]
    SweetNotFound(i64),

    /// User cannot be found.
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Insufficient stock to complete a purchase.
    ///
    /// ## When This Occurs
    /// - Trying to purchase more than the available quantity
    /// - A concurrent purchase consumed the stock first
    #[error("Insufficient stock for sweet {sweet_id}: available {available}, requested {requested}")]
    InsufficientStock {
        sweet_id: i64,
        available: i64,
        requested: i64,
    },

    /// Username or email already registered.
    #[error("{field} '{value}' already exists")]
    DuplicateIdentity { field: String, value: String },

    /// Login failed.
    ///
    /// Deliberately does not distinguish unknown-username from wrong-password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
