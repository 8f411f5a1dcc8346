//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    categories_handler, clear_key_handler, clear_namespace_handler, health_handler,
    preload_handler, products_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, storefront pages are served from elsewhere
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", get(categories_handler))
        .route("/products", get(products_handler))
        .route("/cache/preload", post(preload_handler))
        .route("/cache/:namespace", delete(clear_namespace_handler))
        .route("/cache/:namespace/*key", delete(clear_key_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
