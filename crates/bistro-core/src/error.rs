//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors                                                    │
//! │  ├── ParseError       - Item list text rejected (items.rs)             │
//! │  ├── MoneyParseError  - Amount text rejected (money.rs)                │
//! │  ├── ValidationError  - Input validation failures (this file)          │
//! │  └── CoreError        - Everything above, for callers that mix them    │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  orders-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ParseError/ValidationError → CoreError → ApiError → Client      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::items::ParseError;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The items text could not be parsed.
    ///
    /// ## User Workflow
    /// ```text
    /// Waiter submits "Burger, Fries 3.99"
    ///      │
    ///      ▼
    /// parse_items → MalformedSegment { segment: "Burger" }
    ///      │
    ///      ▼
    /// 400 Bad Request, no order is created
    /// ```
    #[error("Invalid items: {0}")]
    Parse(#[from] ParseError),

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
/// Used for early validation before the parser or the database runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a NotAllowed error from a static list of choices.
    pub fn not_allowed(field: &str, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items is required");

        let err = ValidationError::MustBePositive {
            field: "table_number".to_string(),
        };
        assert_eq!(err.to_string(), "table_number must be positive");

        let err = ValidationError::not_allowed("status", &["pending", "ready", "paid"]);
        assert_eq!(
            err.to_string(),
            "status must be one of: [\"pending\", \"ready\", \"paid\"]"
        );
    }

    #[test]
    fn test_parse_error_converts_to_core_error() {
        let parse_err = ParseError::MalformedSegment {
            index: 0,
            segment: "Burger".to_string(),
        };
        let core_err: CoreError = parse_err.into();
        assert!(matches!(core_err, CoreError::Parse(_)));
        assert_eq!(
            core_err.to_string(),
            "Invalid items: Invalid item format in segment 0: 'Burger' (expected '<name> <price>')"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
