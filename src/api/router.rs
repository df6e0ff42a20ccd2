use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::types::ApiError;
use super::users;

/// Per-request deadline; in-flight repository calls are dropped when it fires
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // User API
        .nest("/api/v1", users::create_users_router())
        // 404 handler
        .fallback(endpoint_not_found)
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn endpoint_not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}
