//! Mock remote catalog for testing
//!
//! Provides a [`RemoteSource`] that serves configured bodies, can be switched
//! into failure mode at runtime, and counts calls.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::RemoteSource;
use crate::error::{CatalogError, Result};
use crate::models::{ProductQuery, ALL_CATEGORIES};

/// Mock remote source.
///
/// # Example
/// ```ignore
/// let remote = Arc::new(
///     MockRemoteSource::new().with_categories(json!([{ "_id": "c1", "name": "Chairs" }])),
/// );
/// let cache = DataCache::new(remote.clone(), Arc::new(StaticCatalog::empty()), settings);
/// cache.get_categories(false).await;
/// assert_eq!(remote.calls().await.fetch_categories, 1);
/// ```
#[derive(Default)]
pub struct MockRemoteSource {
    /// Body returned by fetch_categories
    categories: Mutex<Value>,
    /// Product bodies keyed by category id; missing categories yield `[]`
    products: Mutex<HashMap<String, Value>>,
    /// Whether fetch_categories fails
    categories_down: Mutex<bool>,
    /// Categories whose product fetch fails
    products_down: Mutex<HashSet<String>>,
    /// Whether every product fetch fails
    all_products_down: Mutex<bool>,
    /// Artificial latency applied to every call
    latency: Mutex<Duration>,
    /// Call counters
    calls: Mutex<MockCallCounts>,
    /// Product queries received, in order
    product_queries: Mutex<Vec<ProductQuery>>,
}

/// Tracks remote call counts for test verification
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MockCallCounts {
    pub fetch_categories: usize,
    pub fetch_products: usize,
}

impl MockRemoteSource {
    /// Create a mock with no categories and empty product listings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the category list body.
    pub fn with_categories(mut self, body: Value) -> Self {
        *self.categories.get_mut() = body;
        self
    }

    /// Configure the product body for `category` (use `"all"` for the
    /// unfiltered listing).
    pub fn with_products(mut self, category: &str, body: Value) -> Self {
        self.products.get_mut().insert(category.to_string(), body);
        self
    }

    /// Configure latency applied before each response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        *self.latency.get_mut() = latency;
        self
    }

    pub async fn set_categories(&self, body: Value) {
        *self.categories.lock().await = body;
    }

    /// Make fetch_categories fail (or recover).
    pub async fn set_categories_down(&self, down: bool) {
        *self.categories_down.lock().await = down;
    }

    /// Make product fetches for one category fail.
    pub async fn set_products_down_for(&self, category: &str) {
        self.products_down.lock().await.insert(category.to_string());
    }

    /// Make every product fetch fail (or recover).
    pub async fn set_all_products_down(&self, down: bool) {
        *self.all_products_down.lock().await = down;
    }

    /// Snapshot of the call counters.
    pub async fn calls(&self) -> MockCallCounts {
        self.calls.lock().await.clone()
    }

    /// Product queries received so far.
    pub async fn product_queries(&self) -> Vec<ProductQuery> {
        self.product_queries.lock().await.clone()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn outage(path: &str) -> CatalogError {
        CatalogError::Status {
            status: 503,
            url: format!("mock://catalog/{path}"),
        }
    }
}

#[async_trait]
impl RemoteSource for MockRemoteSource {
    async fn fetch_categories(&self) -> Result<Value> {
        self.calls.lock().await.fetch_categories += 1;
        self.simulate_latency().await;

        if *self.categories_down.lock().await {
            return Err(Self::outage("categories"));
        }
        Ok(self.categories.lock().await.clone())
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<Value> {
        self.calls.lock().await.fetch_products += 1;
        self.product_queries.lock().await.push(query.clone());
        self.simulate_latency().await;

        let category = if query.is_all() {
            ALL_CATEGORIES
        } else {
            query.category.as_str()
        };
        if *self.all_products_down.lock().await
            || self.products_down.lock().await.contains(category)
        {
            return Err(Self::outage("products"));
        }

        Ok(self
            .products
            .lock()
            .await
            .get(category)
            .cloned()
            .unwrap_or_else(|| json!([])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_configured_bodies() {
        let mock = MockRemoteSource::new()
            .with_categories(json!([{ "_id": "c1" }]))
            .with_products("c1", json!({ "products": [{ "_id": "p1" }] }));

        assert_eq!(mock.fetch_categories().await.unwrap(), json!([{ "_id": "c1" }]));
        let body = mock
            .fetch_products(&ProductQuery::new("c1", None))
            .await
            .unwrap();
        assert_eq!(body["products"][0]["_id"], "p1");
        assert_eq!(
            mock.fetch_products(&ProductQuery::all()).await.unwrap(),
            json!([])
        );

        let calls = mock.calls().await;
        assert_eq!(calls.fetch_categories, 1);
        assert_eq!(calls.fetch_products, 2);
    }

    #[tokio::test]
    async fn test_mock_outages() {
        let mock = MockRemoteSource::new();
        mock.set_categories_down(true).await;
        mock.set_products_down_for("bedroom").await;

        assert!(mock.fetch_categories().await.is_err());
        assert!(mock
            .fetch_products(&ProductQuery::new("bedroom", None))
            .await
            .is_err());
        assert!(mock
            .fetch_products(&ProductQuery::new("office", None))
            .await
            .is_ok());
    }
}
