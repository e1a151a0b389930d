//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::startup::AppState;

/// Root under which the prefab API is served
pub const API_ROOT: &str = "/api/v2";

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(API_ROOT, prefab_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::gather_metrics(),
    )
}

/// Prefab routes (protected)
fn prefab_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/prefabs", post(handlers::prefab::create_prefab))
        .route(
            "/prefabs/{prefab_id}",
            get(handlers::prefab::get_prefab)
                .put(handlers::prefab::update_prefab)
                .delete(handlers::prefab::delete_prefab),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
