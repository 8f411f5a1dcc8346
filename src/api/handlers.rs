//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{DataCache, Namespace};
use crate::error::Result;
use crate::models::{
    CategoriesResponse, ClearResponse, HealthResponse, PreloadResponse, ProductsParams,
    ProductsResponse, RefreshParams, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared catalog cache
    pub cache: DataCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: DataCache) -> Self {
        Self { cache }
    }
}

/// Handler for GET /categories
pub async fn categories_handler(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Response {
    let categories = state.cache.get_categories(params.refresh).await;
    Json(CategoriesResponse::new(&categories)).into_response()
}

/// Handler for GET /products
///
/// `category` defaults to `all`; `subcategory` narrows a category listing.
pub async fn products_handler(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> Response {
    let query = params.to_query();
    let products = state.cache.get_listing(&query, params.refresh).await;

    Json(ProductsResponse::new(
        &query.category,
        query.subcategory.as_deref(),
        &products,
    ))
    .into_response()
}

/// Handler for POST /cache/preload
///
/// Starts a background preload and returns immediately.
pub async fn preload_handler(State(state): State<AppState>) -> impl IntoResponse {
    // Detached: the preload logs its own failures
    drop(state.cache.preload_common_products());
    (StatusCode::ACCEPTED, Json(PreloadResponse::started()))
}

/// Handler for DELETE /cache/:namespace
pub async fn clear_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<ClearResponse>> {
    clear(&state, &namespace, None).await
}

/// Handler for DELETE /cache/:namespace/*key
pub async fn clear_key_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<ClearResponse>> {
    let key = key.trim_start_matches('/').to_string();
    clear(&state, &namespace, Some(key)).await
}

async fn clear(
    state: &AppState,
    namespace: &str,
    key: Option<String>,
) -> Result<Json<ClearResponse>> {
    let namespace: Namespace = namespace.parse()?;
    let removed = state.cache.clear_cache(namespace, key.as_deref()).await;

    Ok(Json(ClearResponse {
        namespace: namespace.to_string(),
        key,
        removed,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
