//! # Repository Module
//!
//! Order storage behind a trait, with the SQLite implementation.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Storage                                        │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  service.list_orders(query)                                    │
//! │       ▼                                                                 │
//! │  OrderService<S: OrderStore>                                           │
//! │       │                                                                 │
//! │       │  store.list(&filter)                                           │
//! │       ▼                                                                 │
//! │  OrderStore (trait)                                                    │
//! │  ├── create(&self, new_order)                                          │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self, filter)                                               │
//! │  ├── update(&self, id, changes)                                        │
//! │  ├── delete(&self, id)                                                 │
//! │  └── paid_revenue(&self)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository ──SQL──► SQLite                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - SQLite-backed [`OrderStore`]

use async_trait::async_trait;

use crate::error::DbResult;
use bistro_core::{NewOrder, Order, OrderChanges, OrderFilter, RevenueSummary};

pub mod order;

/// Persistent storage for orders.
///
/// Implementations must keep `total_price` equal to the sum of the stored
/// items. Every write goes through `NewOrder` or `OrderChanges`, both of
/// which compute the total from the items.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts an order and returns it with its assigned id and timestamp.
    async fn create(&self, new_order: NewOrder) -> DbResult<Order>;

    /// Fetches one order, `None` if the id is unknown.
    async fn get(&self, id: i64) -> DbResult<Option<Order>>;

    /// Lists orders matching the filter, sorted by its ordering.
    async fn list(&self, filter: &OrderFilter) -> DbResult<Vec<Order>>;

    /// Applies partial changes. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: i64, changes: OrderChanges) -> DbResult<Order>;

    /// Removes an order. Fails with `NotFound` for an unknown id.
    async fn delete(&self, id: i64) -> DbResult<()>;

    /// Count and summed total of orders with status `paid`.
    async fn paid_revenue(&self) -> DbResult<RevenueSummary>;
}
