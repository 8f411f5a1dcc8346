//! Response DTOs
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Category, Product};

/// Response body for `GET /categories`
#[derive(Debug, Serialize)]
pub struct CategoriesResponse<'a> {
    pub count: usize,
    pub categories: &'a [Category],
}

impl<'a> CategoriesResponse<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            count: categories.len(),
            categories,
        }
    }
}

/// Response body for `GET /products`
#[derive(Debug, Serialize)]
pub struct ProductsResponse<'a> {
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
    pub count: usize,
    pub products: &'a [Product],
}

impl<'a> ProductsResponse<'a> {
    pub fn new(category: &'a str, subcategory: Option<&'a str>, products: &'a [Product]) -> Self {
        Self {
            category,
            subcategory,
            count: products.len(),
            products,
        }
    }
}

/// Response body for `DELETE /cache/:namespace[/:key]`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub namespace: String,
    pub key: Option<String>,
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for `POST /cache/preload`
#[derive(Debug, Clone, Serialize)]
pub struct PreloadResponse {
    pub message: String,
}

impl PreloadResponse {
    pub fn started() -> Self {
        Self {
            message: "Preload started".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stale_served: u64,
    pub fallback_served: u64,
    pub empty_served: u64,
    pub remote_failures: u64,
    pub swept: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stale_served: stats.stale_served,
            fallback_served: stats.fallback_served,
            empty_served: stats.empty_served,
            remote_failures: stats.remote_failures,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
