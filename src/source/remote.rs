//! Remote catalog API client
//!
//! Fetches raw category and product bodies. Shape detection and
//! normalization happen in the cache, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::ProductQuery;

/// Authoritative source of catalog data.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the raw category list body
    async fn fetch_categories(&self) -> Result<Value>;

    /// Fetch the raw product listing body for `query`
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Value>;
}

/// HTTP client for the catalog REST API.
///
/// # Endpoints
/// - `GET {base}/categories`
/// - `GET {base}/products` for the unfiltered listing
/// - `GET {base}/products/category/{category}[?subcategory=..]`
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    client: Client,
    base_url: Url,
}

impl HttpRemoteSource {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidRequest(format!("Invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidRequest(format!(
                "API URL cannot be a base: {base_url}"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn products_url(&self, query: &ProductQuery) -> Url {
        let mut url = if query.is_all() {
            self.endpoint(&["products"])
        } else {
            self.endpoint(&["products", "category", query.category.as_str()])
        };

        if let Some(subcategory) = query.subcategory_filter() {
            url.query_pairs_mut().append_pair("subcategory", subcategory);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!(url = %url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_categories(&self) -> Result<Value> {
        self.get_json(self.endpoint(&["categories"])).await
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<Value> {
        self.get_json(self.products_url(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpRemoteSource {
        HttpRemoteSource::new("http://localhost:5000/api", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_categories_url() {
        assert_eq!(
            source().endpoint(&["categories"]).as_str(),
            "http://localhost:5000/api/categories"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let source =
            HttpRemoteSource::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.endpoint(&["categories"]).as_str(),
            "http://localhost:5000/api/categories"
        );
    }

    #[test]
    fn test_all_products_url() {
        let url = source().products_url(&ProductQuery::all());
        assert_eq!(url.as_str(), "http://localhost:5000/api/products");
    }

    #[test]
    fn test_all_products_url_ignores_subcategory() {
        let query = ProductQuery {
            category: "all".to_string(),
            subcategory: Some("sofas".to_string()),
        };
        let url = source().products_url(&query);
        assert_eq!(url.as_str(), "http://localhost:5000/api/products");
    }

    #[test]
    fn test_category_products_url() {
        let query = ProductQuery::new("living room", Some("sofas & chairs".to_string()));
        let url = source().products_url(&query);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/products/category/living%20room?subcategory=sofas+%26+chairs"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpRemoteSource::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));

        let result = HttpRemoteSource::new("mailto:shop@example.com", Duration::from_secs(5));
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }
}
