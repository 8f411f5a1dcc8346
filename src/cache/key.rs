//! Cache Key Module
//!
//! Derives deterministic keys from logical queries.

use std::borrow::Cow;
use std::fmt;

use crate::models::ProductQuery;

/// Key of the category list.
pub const CATEGORIES_KEY: &str = "all-categories";

/// Placeholder used when a product query has no subcategory.
pub const NO_SUBCATEGORY: &str = "none";

// == Cache Key ==
/// Deterministic string key for a cached collection.
///
/// Product keys have the form `products:{category}:{subcategory}`, with `%`
/// and `:` percent-escaped inside each component so that distinct
/// `(category, subcategory)` pairs can never produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of the category list.
    pub fn categories() -> Self {
        Self(CATEGORIES_KEY.to_string())
    }

    /// Key of a product listing.
    pub fn products(category: &str, subcategory: Option<&str>) -> Self {
        Self(format!(
            "products:{}:{}",
            escape(category),
            escape(subcategory.unwrap_or(NO_SUBCATEGORY))
        ))
    }

    /// Key of the listing selected by `query`.
    pub fn for_query(query: &ProductQuery) -> Self {
        Self::products(&query.category, query.subcategory_filter())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wraps an already-derived key, e.g. one received for invalidation.
impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape(component: &str) -> Cow<'_, str> {
    if component.contains(['%', ':']) {
        Cow::Owned(component.replace('%', "%25").replace(':', "%3A"))
    } else {
        Cow::Borrowed(component)
    }
}
