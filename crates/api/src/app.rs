use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{health, requests, statistics, updates};
use crate::services::{BroadcastPublisher, EmailService};
use domain::services::{NotificationGateway, UpdateEvent, UpdatePublisher};

/// Capacity of the live update fan-out channel.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn NotificationGateway>,
    pub publisher: Arc<dyn UpdatePublisher>,
    pub updates_tx: broadcast::Sender<UpdateEvent>,
}

/// Build the application with production services.
pub fn create_app(config: Config, pool: SqlitePool) -> Router {
    let notifier = Arc::new(EmailService::new(config.email.clone()));
    let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
    create_app_with(config, pool, notifier, updates_tx)
}

/// Build the application with injected services.
///
/// Tests pass a mock notification gateway and subscribe to `updates_tx`
/// directly instead of opening a WebSocket.
pub fn create_app_with(
    config: Config,
    pool: SqlitePool,
    notifier: Arc<dyn NotificationGateway>,
    updates_tx: broadcast::Sender<UpdateEvent>,
) -> Router {
    let config = Arc::new(config);

    let publisher = Arc::new(BroadcastPublisher::new(updates_tx.clone()));

    let state = AppState {
        pool,
        config: config.clone(),
        notifier,
        publisher,
        updates_tx,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Versioned API routes
    let api_routes = Router::new()
        .route("/api/v1/requests", post(requests::create_request))
        .route("/api/v1/requests/overview", get(requests::overview))
        .route(
            "/api/v1/requests/:id/partner-pickup",
            post(requests::partner_pickup),
        )
        .route("/api/v1/requests/:id/washed", post(requests::washed))
        .route("/api/v1/requests/:id/picked-up", post(requests::picked_up))
        .route("/api/v1/requests/:id/location", post(requests::set_location))
        .route("/api/v1/statistics", get(statistics::statistics))
        .route("/api/v1/updates", get(updates::updates_ws));

    // Public operational routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
