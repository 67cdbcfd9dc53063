//! # Validation Module
//!
//! Input validation utilities for Bistro Orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json / Query)                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Required fields present                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + item parser                                    │
//! │  ├── Business rule validation (table > 0, known status)                │
//! │  └── parse_items on the raw dish list                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints (status, table_number)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_table_number, validate_items_text};
//!
//! validate_table_number(4).unwrap();
//! assert!(validate_items_text("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{OrderOrdering, OrderStatus};
use crate::{MAX_ITEMS_TEXT_LEN, MAX_SEARCH_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a table number.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_table_number(table_number: i64) -> ValidationResult<()> {
    if table_number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "table_number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates the raw dish list before it reaches the parser.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_ITEMS_TEXT_LEN`] characters
///
/// The segment-level rules live in [`crate::items::parse_items`].
pub fn validate_items_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if text.chars().count() > MAX_ITEMS_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "items".to_string(),
            max: MAX_ITEMS_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no filtering)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query, or `None` when it is empty.
pub fn validate_search_query(query: &str) -> ValidationResult<Option<String>> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok((!query.is_empty()).then(|| query.to_string()))
}

// =============================================================================
// Choice Validators
// =============================================================================

/// Parses a status name (`pending`, `ready`, `paid`).
pub fn parse_status(value: &str) -> ValidationResult<OrderStatus> {
    value.parse()
}

/// Parses an ordering token; empty input means the default ordering.
pub fn parse_ordering(value: &str) -> ValidationResult<OrderOrdering> {
    if value.trim().is_empty() {
        return Ok(OrderOrdering::default());
    }
    value.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================
