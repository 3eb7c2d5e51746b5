//! Common test utilities for integration tests.
//!
//! Each test builds the app against its own in-memory SQLite database,
//! so tests are self-contained and can run in parallel.

// Helper utilities that may not be used by every integration test.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::broadcast;

use carwash_api::app::create_app_with;
use carwash_api::config::Config;
use domain::services::{MockNotificationGateway, NotificationGateway, UpdateEvent};

/// Create a test database pool backed by a private in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    // One connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Test configuration with email disabled by default.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// App plus the handles tests observe side effects through.
pub struct TestApp {
    pub app: Router,
    pub updates_rx: broadcast::Receiver<UpdateEvent>,
}

/// Build the app with an injected notification gateway.
pub fn create_test_app(
    config: Config,
    pool: SqlitePool,
    notifier: Arc<dyn NotificationGateway>,
) -> TestApp {
    let (updates_tx, updates_rx) = broadcast::channel(64);
    let app = create_app_with(config, pool, notifier, updates_tx);
    TestApp { app, updates_rx }
}

/// Build the app with a gateway that always delivers.
pub fn create_default_test_app(config: Config, pool: SqlitePool) -> TestApp {
    create_test_app(config, pool, Arc::new(MockNotificationGateway::new()))
}

/// Build the app with a gateway that always fails delivery.
pub fn create_failing_test_app(config: Config, pool: SqlitePool) -> TestApp {
    create_test_app(config, pool, Arc::new(MockNotificationGateway::failing()))
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Read a JSON response body.
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not valid JSON")
}

/// A valid create-request payload.
pub fn sample_order(license_plate: &str) -> serde_json::Value {
    serde_json::json!({
        "licensePlate": license_plate,
        "name": "Kari Nordmann",
        "phoneNumber": "12345678",
        "email": "kari@example.com",
        "exitDate": "24/12/2030 10:00",
        "product": "Vask",
        "comments": "Nøkkel i luka"
    })
}
