//! Integration Tests for the HTTP remote source
//!
//! Runs `HttpRemoteSource` against a fake catalog API served by axum on an
//! ephemeral port.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_cache::{
    models::ProductQuery,
    source::{HttpRemoteSource, RemoteSource, StaticCatalog},
    CacheSettings, CatalogError, DataCache,
};
use serde_json::{json, Value};

// == Helper Functions ==

fn fake_api() -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(|| async { Json(json!([{ "_id": "c1", "name": "Chairs" }])) }),
        )
        .route(
            "/api/products",
            get(|| async { Json(json!({ "products": [{ "_id": "p1" }, { "_id": "p2" }] })) }),
        )
        .route(
            "/api/products/category/:category",
            get(
                |Path(category): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    Json(json!([{
                        "_id": "echo",
                        "category": category,
                        "subcategory": params.get("subcategory"),
                    }]))
                },
            ),
        )
}

fn broken_api() -> Router {
    Router::new().route(
        "/api/categories",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    )
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// URL of a port nothing listens on.
async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> HttpRemoteSource {
    HttpRemoteSource::new(base_url, Duration::from_secs(5)).unwrap()
}

// == Remote Source Tests ==

#[tokio::test]
async fn test_fetch_categories() {
    let base = serve(fake_api()).await;

    let body = client(&base).fetch_categories().await.unwrap();
    assert_eq!(body, json!([{ "_id": "c1", "name": "Chairs" }]));
}

#[tokio::test]
async fn test_fetch_all_products() {
    let base = serve(fake_api()).await;

    let body = client(&base)
        .fetch_products(&ProductQuery::all())
        .await
        .unwrap();
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_category_products_with_subcategory() {
    let base = serve(fake_api()).await;
    let query = ProductQuery::new("living room", Some("sofas".to_string()));

    let body: Value = client(&base).fetch_products(&query).await.unwrap();
    assert_eq!(body[0]["category"], "living room");
    assert_eq!(body[0]["subcategory"], "sofas");
}

#[tokio::test]
async fn test_non_success_status() {
    let base = serve(broken_api()).await;

    let result = client(&base).fetch_categories().await;
    assert!(matches!(result, Err(CatalogError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_connection_refused() {
    let base = unreachable_url().await;

    let result = client(&base).fetch_categories().await;
    assert!(matches!(result, Err(CatalogError::Transport(_))));
}

// == Cache Over HTTP Tests ==

#[tokio::test]
async fn test_cache_over_http() {
    let base = serve(fake_api()).await;
    let cache = DataCache::new(
        Arc::new(client(&base)),
        Arc::new(StaticCatalog::empty()),
        CacheSettings::default(),
    );

    let categories = cache.get_categories(false).await;
    assert_eq!(categories[0].name, "Chairs");

    let products = cache.get_products("all", None, false).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_cache_falls_back_when_api_unreachable() {
    let base = unreachable_url().await;
    let cache = DataCache::new(
        Arc::new(client(&base)),
        Arc::new(StaticCatalog::furniture()),
        CacheSettings::default(),
    );

    assert_eq!(cache.get_categories(false).await.len(), 5);
    assert!(cache.get_products("bedroom", None, false).await.is_empty());

    let stats = cache.stats().await;
    assert_eq!(stats.remote_failures, 2);
    assert_eq!(stats.fallback_served, 1);
    assert_eq!(stats.empty_served, 1);
}
