//! Request DTOs
//!
//! Query parameters accepted by the HTTP surface and the normalized product
//! query handed to the sources.

use serde::Deserialize;

/// Category sentinel selecting the unfiltered product listing.
pub const ALL_CATEGORIES: &str = "all";

// == Product Query ==
/// Logical product listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Category id, or [`ALL_CATEGORIES`]
    pub category: String,
    /// Optional subcategory narrowing the category
    pub subcategory: Option<String>,
}

impl ProductQuery {
    /// Builds a query. The unfiltered listing takes no subcategory, so one
    /// given alongside [`ALL_CATEGORIES`] is dropped.
    pub fn new(category: impl Into<String>, subcategory: Option<String>) -> Self {
        let category = category.into();
        let subcategory = subcategory.filter(|_| category != ALL_CATEGORIES);
        Self {
            category,
            subcategory,
        }
    }

    /// Query for the unfiltered listing.
    pub fn all() -> Self {
        Self::new(ALL_CATEGORIES, None)
    }

    /// Returns true if this query selects the unfiltered listing.
    pub fn is_all(&self) -> bool {
        self.category == ALL_CATEGORIES
    }

    /// Subcategory filter in effect, never set for the unfiltered listing.
    pub fn subcategory_filter(&self) -> Option<&str> {
        if self.is_all() {
            None
        } else {
            self.subcategory.as_deref()
        }
    }
}

// == HTTP Query Parameters ==
/// Query string for `GET /categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshParams {
    /// Bypass a valid cache entry
    #[serde(default)]
    pub refresh: bool,
}

/// Query string for `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

impl ProductsParams {
    /// Converts the query string into a [`ProductQuery`].
    ///
    /// Blank values are treated as absent; a missing category means "all".
    pub fn to_query(&self) -> ProductQuery {
        let category = non_blank(&self.category).unwrap_or_else(|| ALL_CATEGORIES.to_string());
        ProductQuery::new(category, non_blank(&self.subcategory))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_params_default_to_all() {
        let params: ProductsParams = serde_json::from_str("{}").unwrap();
        let query = params.to_query();
        assert!(query.is_all());
        assert!(query.subcategory.is_none());
        assert!(!params.refresh);
    }

    #[test]
    fn test_products_params_blank_values() {
        let params = ProductsParams {
            category: Some("  ".to_string()),
            subcategory: Some(String::new()),
            refresh: true,
        };
        assert_eq!(params.to_query(), ProductQuery::all());
    }

    #[test]
    fn test_products_params_with_subcategory() {
        let params = ProductsParams {
            category: Some("living-room".to_string()),
            subcategory: Some("sofas".to_string()),
            refresh: false,
        };
        let query = params.to_query();
        assert_eq!(query.category, "living-room");
        assert_eq!(query.subcategory.as_deref(), Some("sofas"));
        assert!(!query.is_all());
    }

    #[test]
    fn test_all_query_drops_subcategory() {
        let query = ProductQuery::new(ALL_CATEGORIES, Some("sofas".to_string()));
        assert_eq!(query, ProductQuery::all());

        let literal = ProductQuery {
            category: ALL_CATEGORIES.to_string(),
            subcategory: Some("sofas".to_string()),
        };
        assert_eq!(literal.subcategory_filter(), None);
    }

    #[test]
    fn test_products_params_all_with_subcategory() {
        let params = ProductsParams {
            category: Some("all".to_string()),
            subcategory: Some("sofas".to_string()),
            refresh: false,
        };
        assert_eq!(params.to_query(), ProductQuery::all());
    }
}
