//! # API Error Handling
//!
//! Converts service errors into JSON HTTP responses.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Handling Flow                                  │
//! │                                                                         │
//! │  ParseError / ValidationError / DbError                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { code, message, details }                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HTTP status + JSON body                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::service::ServiceError;
use bistro_core::CoreError;
use bistro_db::DbError;

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "code": "INVALID_ITEMS",
///   "message": "Invalid item format in segment 0: 'Burger' (expected '<name> <price>')",
///   "details": { "kind": "malformed_segment", "fragment": "Burger", "segment_index": 0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Items text could not be parsed (400)
    InvalidItems,

    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidItems | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts database errors to API errors.
///
/// Storage details are logged, never sent to the client.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConstraintViolation { message } => {
                tracing::warn!("Constraint violation: {}", message);
                ApiError::validation("Order violates a storage constraint")
            }
            unavailable @ (DbError::ConnectionFailed(_) | DbError::PoolExhausted) => {
                tracing::error!("Database unavailable: {}", unavailable);
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Parse(parse) => ApiError::new(ErrorCode::InvalidItems, parse.to_string())
                .with_details(json!({
                    "kind": parse.kind(),
                    "fragment": parse.fragment(),
                    "segment_index": parse.segment_index(),
                })),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(core) => core.into(),
            ServiceError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            ServiceError::Database(db) => db.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
