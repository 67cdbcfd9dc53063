//! # Order Repository
//!
//! SQLite implementation of [`OrderStore`].
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                                                                 │
//! │  ┌────┬──────────────┬──────────────────────────────┬───────┬────────┐ │
//! │  │ id │ table_number │ items (JSON)                 │ cents │ status │ │
//! │  ├────┼──────────────┼──────────────────────────────┼───────┼────────┤ │
//! │  │  1 │            4 │ [{"name":"Pizza",            │  1050 │ paid   │ │
//! │  │    │              │   "price":"10.50"}]          │       │        │ │
//! │  └────┴──────────────┴──────────────────────────────┴───────┴────────┘ │
//! │                                                                         │
//! │  Prices live in the JSON as decimal strings and the total as integer   │
//! │  cents, so neither ever passes through a float.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::OrderStore;
use crate::error::{DbError, DbResult};
use bistro_core::{
    LineItem, Money, NewOrder, Order, OrderChanges, OrderFilter, OrderOrdering, OrderStatus,
    RevenueSummary,
};

const SELECT_ORDER: &str =
    "SELECT id, table_number, items, total_price_cents, status, created_at FROM orders";

/// Raw `orders` row before the items column is decoded.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    table_number: i64,
    items: String,
    total_price_cents: i64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Self> {
        let items: Vec<LineItem> = serde_json::from_str(&row.items)?;
        Ok(Order {
            id: row.id,
            table_number: row.table_number,
            items,
            total_price: Money::from_cents(row.total_price_cents),
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Fixed-width UTC text (`2024-05-01T12:00:00.250000Z`) so that the
/// `created_at` column sorts chronologically as TEXT.
fn storage_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `ORDER BY` clause for an ordering. Ties fall back to id.
fn order_by_clause(ordering: OrderOrdering) -> &'static str {
    match ordering {
        OrderOrdering::NewestFirst => " ORDER BY id DESC",
        OrderOrdering::TotalPriceAsc => " ORDER BY total_price_cents ASC, id ASC",
        OrderOrdering::TotalPriceDesc => " ORDER BY total_price_cents DESC, id DESC",
        OrderOrdering::CreatedAtAsc => " ORDER BY created_at ASC, id ASC",
        OrderOrdering::CreatedAtDesc => " ORDER BY created_at DESC, id DESC",
    }
}

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// let order = repo.create(NewOrder::new(4, items)).await?;
/// let pending = repo.list(&OrderFilter { status: Some(OrderStatus::Pending), ..Default::default() }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Counts all orders regardless of status.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn create(&self, new_order: NewOrder) -> DbResult<Order> {
        let items_json = serde_json::to_string(&new_order.items)?;
        // Microsecond precision, same as the stored text
        let created_at = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            "INSERT INTO orders (table_number, items, total_price_cents, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(new_order.table_number)
        .bind(&items_json)
        .bind(new_order.total_price.cents())
        .bind(new_order.status)
        .bind(storage_timestamp(created_at))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        info!(
            order_id = id,
            table_number = new_order.table_number,
            items = new_order.items.len(),
            total = %new_order.total_price,
            "Order created"
        );

        Ok(Order {
            id,
            table_number: new_order.table_number,
            items: new_order.items,
            total_price: new_order.total_price,
            status: new_order.status,
            created_at,
        })
    }

    async fn get(&self, id: i64) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    async fn list(&self, filter: &OrderFilter) -> DbResult<Vec<Order>> {
        debug!(
            status = ?filter.status,
            table_number = ?filter.table_number,
            search = ?filter.search,
            ordering = filter.ordering.as_str(),
            "Listing orders"
        );

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ORDER);
        builder.push(" WHERE 1 = 1");

        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(table_number) = filter.table_number {
            builder.push(" AND table_number = ").push_bind(table_number);
        }
        builder.push(order_by_clause(filter.ordering));

        let rows: Vec<OrderRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        // Dish names live inside the JSON column, so the search runs here
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let order = Order::try_from(row)?;
            if filter.matches(&order) {
                orders.push(order);
            }
        }

        debug!(count = orders.len(), "List returned orders");
        Ok(orders)
    }

    async fn update(&self, id: i64, changes: OrderChanges) -> DbResult<Order> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))?;

        let mut order = Order::try_from(row)?;
        changes.apply_to(&mut order);

        let items_json = serde_json::to_string(&order.items)?;

        sqlx::query(
            "UPDATE orders SET table_number = ?1, items = ?2, total_price_cents = ?3, status = ?4 \
             WHERE id = ?5",
        )
        .bind(order.table_number)
        .bind(&items_json)
        .bind(order.total_price.cents())
        .bind(order.status)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(order_id = id, status = %order.status, total = %order.total_price, "Order updated");
        Ok(order)
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        info!(order_id = id, "Order deleted");
        Ok(())
    }

    async fn paid_revenue(&self) -> DbResult<RevenueSummary> {
        let (paid_orders, revenue_cents): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total_price_cents), 0) FROM orders WHERE status = ?1",
        )
        .bind(OrderStatus::Paid)
        .fetch_one(&self.pool)
        .await?;

        Ok(RevenueSummary {
            paid_orders,
            revenue: Money::from_cents(revenue_cents),
        })
    }
}
