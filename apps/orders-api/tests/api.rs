//! End-to-end tests driving the router against an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bistro_api::{router, AppState};
use bistro_db::{Database, DbConfig};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    router(AppState::new(db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, table_number: i64, items: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": table_number, "items": items })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_reports_database() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn create_order_parses_and_prices_items() {
    let app = app().await;

    let order = create(&app, 3, "Pasta Carbonara 8.50, Juice 2.00").await;

    assert_eq!(order["table_number"], 3);
    assert_eq!(order["total_price"], "10.50");
    assert_eq!(order["status"], "pending");
    assert_eq!(
        order["items"],
        json!([
            { "name": "Pasta Carbonara", "price": "8.50" },
            { "name": "Juice", "price": "2.00" }
        ])
    );

    let id = order["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);
}

#[tokio::test]
async fn invalid_items_are_rejected_and_not_stored() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 2, "items": "Burger, Fries 3.99" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ITEMS");
    assert_eq!(body["details"]["kind"], "malformed_segment");
    assert_eq!(body["details"]["fragment"], "Burger");
    assert_eq!(body["details"]["segment_index"], 0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 2, "items": "Tea 1.50, Cake 1.2.3" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["kind"], "invalid_price");
    assert_eq!(body["details"]["segment_index"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 2, "items": "Caviar 92233720368547758.07, Bread 0.01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["kind"], "invalid_price");
    assert_eq!(body["details"]["fragment"], "92233720368547758.07");

    let (_, list) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn bad_create_payloads() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 0, "items": "Tea 1.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 4 })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(json!({ "table_number": 4, "items": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn list_filters_and_ordering() {
    let app = app().await;

    let soup = create(&app, 1, "Soup 5.00").await;
    let steak = create(&app, 2, "Steak 25.00, Wine 6.00").await;
    let salad = create(&app, 1, "Caesar Salad 8.00").await;

    let ids = |list: &Value| -> Vec<i64> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|o| o["id"].as_i64().unwrap())
            .collect()
    };
    let id = |order: &Value| order["id"].as_i64().unwrap();

    let (_, all) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(ids(&all), vec![id(&salad), id(&steak), id(&soup)]);

    let (_, table) = send(&app, Method::GET, "/api/orders?table_number=1", None).await;
    assert_eq!(ids(&table), vec![id(&salad), id(&soup)]);

    let (_, cheap_first) = send(&app, Method::GET, "/api/orders?ordering=total_price", None).await;
    assert_eq!(ids(&cheap_first), vec![id(&soup), id(&salad), id(&steak)]);

    let (_, found) = send(&app, Method::GET, "/api/orders?search=caesar", None).await;
    assert_eq!(ids(&found), vec![id(&salad)]);

    let (status, body) = send(&app, Method::GET, "/api/orders?ordering=name", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, Method::GET, "/api/orders?status=cooking", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_replaces_items_and_total() {
    let app = app().await;
    let order = create(&app, 5, "Coffee 2.50").await;
    let uri = format!("/api/orders/{}", order["id"]);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "items": "Coffee 2.50, Croissant 1.75", "table_number": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["total_price"], "4.25");
    assert_eq!(updated["table_number"], 6);
    assert_eq!(updated["status"], "pending");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "items": "Coffee" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ITEMS");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["total_price"], "4.25");
}

#[tokio::test]
async fn status_changes_feed_revenue() {
    let app = app().await;
    let first = create(&app, 1, "Pizza 10.50").await;
    let second = create(&app, 2, "Burger 9.25, Fries 3.00").await;
    create(&app, 3, "Water 1.00").await;

    for order in [&first, &second] {
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/orders/{}/status", order["id"]),
            Some(json!({ "status": "paid" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "paid");
    }

    let (status, revenue) = send(&app, Method::GET, "/api/revenue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(revenue, json!({ "paid_orders": 2, "revenue": "22.75" }));

    let (_, paid) = send(&app, Method::GET, "/api/orders?status=paid", None).await;
    assert_eq!(paid.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_and_missing_orders() {
    let app = app().await;
    let order = create(&app, 1, "Tea 1.20").await;
    let uri = format!("/api/orders/{}", order["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/orders/999/status",
        Some(json!({ "status": "ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
