//! # HTTP Routes
//!
//! Axum router and request handlers.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                    liveness + database check           │
//! │  GET    /api/orders                list (status, table_number,         │
//! │                                    search, ordering)                   │
//! │  POST   /api/orders                create            → 201             │
//! │  GET    /api/orders/{id}           retrieve                            │
//! │  PATCH  /api/orders/{id}           partial update                      │
//! │  PUT    /api/orders/{id}/status    set status                          │
//! │  DELETE /api/orders/{id}           delete            → 204             │
//! │  GET    /api/revenue               paid revenue                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use chrono::Utc;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::service::{
    CreateOrderRequest, OrderQuery, OrderService, StatusUpdate, UpdateOrderRequest,
};
use bistro_core::{Order, RevenueSummary};
use bistro_db::{Database, OrderRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: OrderService<OrderRepository>,
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let service = OrderService::new(std::sync::Arc::new(db.orders()));
        AppState { service, db }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .route("/orders", get(list_orders).post(create_order))
                .route(
                    "/orders/{id}",
                    get(get_order).patch(update_order).delete(delete_order),
                )
                .route("/orders/{id}/status", put(update_status))
                .route("/revenue", get(revenue)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Handles GET /health.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = state.db.health_check().await;
    let status = if database_ok {
        StatusCode::OK
    } else {
        tracing::warn!("Health check failed: database unreachable");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database_ok { "OK" } else { "DEGRADED" },
            "database": database_ok,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// Handles GET /api/orders.
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.service.list_orders(query).await?))
}

/// Handles POST /api/orders.
async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.service.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Handles GET /api/orders/{id}.
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.service.get_order(id).await?))
}

/// Handles PATCH /api/orders/{id}.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.service.update_order(id, request).await?))
}

/// Handles PUT /api/orders/{id}/status.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.service.update_status(id, update.status).await?))
}

/// Handles DELETE /api/orders/{id}.
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handles GET /api/revenue.
async fn revenue(State(state): State<AppState>) -> Result<Json<RevenueSummary>, ApiError> {
    Ok(Json(state.service.revenue().await?))
}
