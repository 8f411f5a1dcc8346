//! Cache Namespace Module
//!
//! Independent partitions of the cache, each with its own TTL.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::CacheSettings;
use crate::error::CatalogError;
use crate::models::ProductQuery;

/// A cache partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// The category list
    Categories,
    /// The unfiltered product listing
    Products,
    /// Per-category (and subcategory) product listings
    CategoryProducts,
    /// Fetch metadata for product listings
    Metadata,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Categories,
        Namespace::Products,
        Namespace::CategoryProducts,
        Namespace::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Categories => "categories",
            Namespace::Products => "products",
            Namespace::CategoryProducts => "category-products",
            Namespace::Metadata => "metadata",
        }
    }

    /// TTL configured for this namespace.
    pub fn ttl(&self, settings: &CacheSettings) -> Duration {
        match self {
            Namespace::Categories => settings.categories_ttl,
            Namespace::Products => settings.products_ttl,
            Namespace::CategoryProducts => settings.category_products_ttl,
            Namespace::Metadata => settings.metadata_ttl,
        }
    }

    /// Entry limit configured for this namespace.
    pub fn capacity(&self, settings: &CacheSettings) -> usize {
        match self {
            Namespace::Metadata => settings.metadata_max_entries,
            _ => settings.max_entries,
        }
    }

    /// Namespace holding the listing selected by `query`.
    pub fn for_query(query: &ProductQuery) -> Self {
        if query.is_all() {
            Namespace::Products
        } else {
            Namespace::CategoryProducts
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidRequest(format!("Unknown cache namespace: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaces() {
        for ns in Namespace::ALL {
            assert_eq!(ns.as_str().parse::<Namespace>().unwrap(), ns);
        }
    }

    #[test]
    fn test_parse_unknown_namespace() {
        let result = "orders".parse::<Namespace>();
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    #[test]
    fn test_ttl_lookup() {
        let settings = CacheSettings::default();
        assert_eq!(Namespace::Categories.ttl(&settings), Duration::from_secs(300));
        assert_eq!(Namespace::Products.ttl(&settings), Duration::from_secs(180));
        assert_eq!(Namespace::CategoryProducts.ttl(&settings), Duration::from_secs(120));
    }

    #[test]
    fn test_capacity_lookup() {
        let settings = CacheSettings {
            max_entries: 50,
            metadata_max_entries: 0,
            ..CacheSettings::default()
        };
        assert_eq!(Namespace::Categories.capacity(&settings), 50);
        assert_eq!(Namespace::CategoryProducts.capacity(&settings), 50);
        assert_eq!(Namespace::Metadata.capacity(&settings), 0);
    }

    #[test]
    fn test_namespace_for_query() {
        assert_eq!(Namespace::for_query(&ProductQuery::all()), Namespace::Products);
        assert_eq!(
            Namespace::for_query(&ProductQuery::new("dining", None)),
            Namespace::CategoryProducts
        );
    }
}
