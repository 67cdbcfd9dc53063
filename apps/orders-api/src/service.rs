//! # Order Service
//!
//! Order workflows on top of an [`OrderStore`].
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"table_number": 3, "items": "Pasta 8.50, Juice 2.00"}                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_table_number / validate_items_text                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_items ──Err──► ServiceError::Invalid (nothing stored)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewOrder::new (total = 10.50, status = pending)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.create                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use bistro_core::validation::{
    parse_ordering, parse_status, validate_items_text, validate_search_query,
    validate_table_number,
};
use bistro_core::{
    parse_items, CoreError, LineItem, NewOrder, Order, OrderChanges, OrderFilter, OrderStatus,
    ParseError, RevenueSummary, ValidationError,
};
use bistro_db::{DbError, OrderStore};

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by [`OrderService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad input: unparseable items or a failed field rule.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error(transparent)]
    Database(DbError),
}

impl ServiceError {
    fn order_not_found(id: i64) -> Self {
        ServiceError::NotFound {
            entity: "Order".to_string(),
            id: id.to_string(),
        }
    }
}

impl From<ParseError> for ServiceError {
    fn from(err: ParseError) -> Self {
        ServiceError::Invalid(err.into())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Invalid(err.into())
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub table_number: i64,

    /// Free text such as `"Pizza 10.50, Cola 2.00"`.
    pub items: String,

    /// Defaults to `pending`.
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Body of `PATCH /api/orders/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub table_number: Option<i64>,

    #[serde(default)]
    pub items: Option<String>,

    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Query string of `GET /api/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub table_number: Option<i64>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub ordering: Option<String>,
}

impl OrderQuery {
    /// Validates the raw query into a store filter.
    pub fn into_filter(self) -> Result<OrderFilter, ValidationError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_status(value)?),
        };

        if let Some(table_number) = self.table_number {
            validate_table_number(table_number)?;
        }

        let search = match self.search.as_deref() {
            Some(query) => validate_search_query(query)?,
            None => None,
        };

        let ordering = parse_ordering(self.ordering.as_deref().unwrap_or_default())?;

        Ok(OrderFilter {
            status,
            table_number: self.table_number,
            search,
            ordering,
        })
    }
}

/// Checks and parses a raw items string.
fn parse_items_text(text: &str) -> ServiceResult<Vec<LineItem>> {
    validate_items_text(text)?;
    let items = parse_items(text).map_err(|err| {
        warn!(
            segment_index = err.segment_index(),
            fragment = err.fragment(),
            "Rejected items text"
        );
        err
    })?;
    Ok(items)
}

// =============================================================================
// Service
// =============================================================================

/// Order operations behind the HTTP layer.
pub struct OrderService<S: OrderStore> {
    store: Arc<S>,
}

impl<S: OrderStore> Clone for OrderService<S> {
    fn clone(&self) -> Self {
        OrderService {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: Arc<S>) -> Self {
        OrderService { store }
    }

    /// Parses the items, prices them and stores a new order.
    ///
    /// Any invalid segment rejects the whole request; nothing is stored.
    pub async fn create_order(&self, request: CreateOrderRequest) -> ServiceResult<Order> {
        validate_table_number(request.table_number)?;
        let items = parse_items_text(&request.items)?;

        let mut new_order = NewOrder::new(request.table_number, items);
        if let Some(status) = request.status {
            new_order = new_order.with_status(status);
        }

        let order = self.store.create(new_order).await?;
        info!(order_id = order.id, total = %order.total_price, "Order placed");
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> ServiceResult<Order> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::order_not_found(id))
    }

    pub async fn list_orders(&self, query: OrderQuery) -> ServiceResult<Vec<Order>> {
        let filter = query.into_filter()?;
        let orders = self.store.list(&filter).await?;
        debug!(count = orders.len(), "Orders listed");
        Ok(orders)
    }

    /// Applies a partial update. New items text replaces the items and the total.
    pub async fn update_order(
        &self,
        id: i64,
        request: UpdateOrderRequest,
    ) -> ServiceResult<Order> {
        if let Some(table_number) = request.table_number {
            validate_table_number(table_number)?;
        }
        let items = request.items.as_deref().map(parse_items_text).transpose()?;

        let changes = OrderChanges {
            table_number: request.table_number,
            items,
            status: request.status,
        };

        if changes.is_empty() {
            return self.get_order(id).await;
        }

        Ok(self.store.update(id, changes).await?)
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> ServiceResult<Order> {
        let changes = OrderChanges {
            status: Some(status),
            ..Default::default()
        };
        let order = self.store.update(id, changes).await?;
        info!(order_id = id, status = %status, "Order status changed");
        Ok(order)
    }

    pub async fn delete_order(&self, id: i64) -> ServiceResult<()> {
        self.store.delete(id).await?;
        Ok(())
    }

    /// Revenue from orders with status `paid`.
    pub async fn revenue(&self) -> ServiceResult<RevenueSummary> {
        Ok(self.store.paid_revenue().await?)
    }
}
