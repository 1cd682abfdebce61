//! Route Configuration

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{logging_middleware, rate_limit_middleware};
use crate::web;

/// Create the full router: JSON API under /api/v1, HTML UI at the root,
/// plus the shared middleware stack.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes (paths mirror the original routing table)
    let api_v1 = Router::new()
        // Health & Status
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        // Beers
        .route("/beers/index", get(handlers::list_beers))
        .route("/beers/create", post(handlers::create_beer))
        .route(
            "/beers/:id",
            put(handlers::update_beer).delete(handlers::destroy_beer),
        );

    // Build full router
    Router::new()
        .nest("/api/v1", api_v1)
        // Also expose health at root for convenience
        .route("/health", get(handlers::health_check))
        // HTML UI
        .merge(web::routes())
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(rate_limit_middleware))
}
