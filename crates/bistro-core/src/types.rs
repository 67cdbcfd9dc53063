//! # Domain Types
//!
//! Core domain types used throughout Bistro Orders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    LineItem     │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  Pending        │       │
//! │  │  table_number   │──►│  price (Money)  │   │  Ready          │       │
//! │  │  items          │   └─────────────────┘   │  Paid           │       │
//! │  │  total_price    │                         └─────────────────┘       │
//! │  │  status         │                                                    │
//! │  │  created_at     │   NewOrder / OrderChanges  → writes               │
//! │  └─────────────────┘   OrderFilter / Ordering   → reads                │
//! │                        RevenueSummary           → paid totals          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::items::{total_price, LineItem};
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
///
/// ```text
/// Pending ──► Ready ──► Paid
/// ```
/// Any status may be set directly; staff correct mistakes by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Taken, kitchen working on it.
    #[default]
    Pending,
    /// Served to the table.
    Ready,
    /// Settled.
    Paid,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 3] = [OrderStatus::Pending, OrderStatus::Ready, OrderStatus::Paid];

    /// Wire name, as stored and sent over JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Ready => "ready",
            OrderStatus::Paid => "paid",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Ready => "Ready",
            OrderStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "ready" => Ok(OrderStatus::Ready),
            "paid" => Ok(OrderStatus::Paid),
            _ => Err(ValidationError::not_allowed(
                "status",
                &["pending", "ready", "paid"],
            )),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A table's order as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Database-assigned identifier.
    pub id: i64,

    /// Table the order belongs to (positive).
    pub table_number: i64,

    /// Dishes in the order they were entered.
    pub items: Vec<LineItem>,

    /// Sum of item prices.
    #[ts(type = "string")]
    pub total_price: Money,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// When the order was taken.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Checks whether the item list contains `needle` in any dish name,
    /// ignoring case.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.items
            .iter()
            .any(|item| item.name.to_lowercase().contains(&needle))
    }
}

/// `Order 7 | Table 3 | Pending`
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {} | Table {} | {}",
            self.id,
            self.table_number,
            self.status.label()
        )
    }
}

// =============================================================================
// Writes
// =============================================================================

/// A validated order ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub table_number: i64,
    pub items: Vec<LineItem>,
    pub total_price: Money,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Builds a pending order, computing the total from the items.
    pub fn new(table_number: i64, items: Vec<LineItem>) -> Self {
        let total_price = total_price(&items);
        NewOrder {
            table_number,
            items,
            total_price,
            status: OrderStatus::Pending,
        }
    }

    /// Overrides the initial status.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderChanges {
    pub table_number: Option<i64>,
    pub items: Option<Vec<LineItem>>,
    pub status: Option<OrderStatus>,
}

impl OrderChanges {
    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.table_number.is_none() && self.items.is_none() && self.status.is_none()
    }

    /// Applies the changes to an order.
    ///
    /// Replacing the items also recomputes `total_price`, so the stored total
    /// always equals the sum of the stored items.
    pub fn apply_to(self, order: &mut Order) {
        if let Some(table_number) = self.table_number {
            order.table_number = table_number;
        }
        if let Some(items) = self.items {
            order.total_price = total_price(&items);
            order.items = items;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
    }
}

// =============================================================================
// Reads
// =============================================================================

/// Sort order for order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderOrdering {
    /// Newest first (highest id first).
    #[default]
    #[serde(rename = "-id")]
    NewestFirst,
    #[serde(rename = "total_price")]
    TotalPriceAsc,
    #[serde(rename = "-total_price")]
    TotalPriceDesc,
    #[serde(rename = "created_at")]
    CreatedAtAsc,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
}

impl OrderOrdering {
    /// Accepted query tokens.
    pub const TOKENS: [&'static str; 5] = [
        "-id",
        "total_price",
        "-total_price",
        "created_at",
        "-created_at",
    ];

    /// Query token for this ordering.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderOrdering::NewestFirst => "-id",
            OrderOrdering::TotalPriceAsc => "total_price",
            OrderOrdering::TotalPriceDesc => "-total_price",
            OrderOrdering::CreatedAtAsc => "created_at",
            OrderOrdering::CreatedAtDesc => "-created_at",
        }
    }
}

impl FromStr for OrderOrdering {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-id" => Ok(OrderOrdering::NewestFirst),
            "total_price" => Ok(OrderOrdering::TotalPriceAsc),
            "-total_price" => Ok(OrderOrdering::TotalPriceDesc),
            "created_at" => Ok(OrderOrdering::CreatedAtAsc),
            "-created_at" => Ok(OrderOrdering::CreatedAtDesc),
            _ => Err(ValidationError::not_allowed("ordering", &Self::TOKENS)),
        }
    }
}

/// Criteria for listing orders. All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_number: Option<i64>,
    /// Case-insensitive substring over dish names.
    pub search: Option<String>,
    pub ordering: OrderOrdering,
}

impl OrderFilter {
    /// Checks an order against every criterion of the filter.
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |status| order.status == status)
            && self
                .table_number
                .map_or(true, |table| order.table_number == table)
            && self
                .search
                .as_deref()
                .map_or(true, |needle| order.mentions(needle))
    }
}

/// Revenue over paid orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueSummary {
    /// Number of orders with status `paid`.
    pub paid_orders: i64,

    /// Sum of their totals.
    #[ts(type = "string")]
    pub revenue: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
