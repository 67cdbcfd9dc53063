//! # bistro-core: Pure Business Logic for Bistro Orders
//!
//! This crate is the **heart** of Bistro Orders. It contains the order
//! domain as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bistro Orders Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 orders-api (axum REST service)                  │   │
//! │  │    POST /api/orders, GET /api/orders, PUT .../status, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bistro-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   items   │  │   money   │  │   types   │  │ validation│  │   │
//! │  │   │ parse_    │  │   Money   │  │   Order   │  │   rules   │  │   │
//! │  │   │  items    │  │  (cents)  │  │  Filter   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   bistro-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`items`] - Free-text item list parser (`"Burger 10.99, Fries 3.99"`)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Order, OrderStatus, OrderFilter, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for order requests
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::items::{parse_items, total_price};
//!
//! let items = parse_items("Salad 7.50, Soup 5.00").unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(total_price(&items).to_string(), "12.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod items;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use items::{format_items, parse_items, total_price, LineItem, ParseError, ParseErrorKind};
pub use money::{Money, MoneyParseError, MAX_PRICE_CENTS};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of the `search` filter.
pub const MAX_SEARCH_LEN: usize = 100;

/// Maximum length of the raw items text accepted for one order.
///
/// ## Business Reason
/// A single table's order fits comfortably; anything larger is a paste
/// accident rather than a real order.
pub const MAX_ITEMS_TEXT_LEN: usize = 2000;
