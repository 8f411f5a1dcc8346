//! Remote payload shapes
//!
//! The catalog API is loose about what it returns. Shapes are detected here,
//! once, and converted to plain vectors before anything reaches the cache.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::models::catalog::{normalize_category, Category, Product};

// == Products Payload ==
/// Product listing as returned by the remote API.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductsPayload {
    /// Bare array of products
    List(Vec<Product>),
    /// Object wrapping a `products` array
    Wrapped { products: Vec<Product> },
}

impl ProductsPayload {
    /// Detects the payload shape and flattens it into a product vector.
    pub fn parse(body: Value) -> Result<Vec<Product>> {
        serde_json::from_value::<Self>(body)
            .map(Self::into_products)
            .map_err(|_| {
                CatalogError::MalformedPayload(
                    "expected an array or an object with a products array".to_string(),
                )
            })
    }

    pub fn into_products(self) -> Vec<Product> {
        match self {
            ProductsPayload::List(products) => products,
            ProductsPayload::Wrapped { products } => products,
        }
    }
}

// == Categories Payload ==
/// Parses and normalizes a category list body.
///
/// The body must be a non-empty array; non-object elements are dropped. A
/// body that yields no categories at all is treated as malformed.
pub fn parse_categories(body: Value) -> Result<Vec<Category>> {
    let Value::Array(items) = body else {
        return Err(CatalogError::MalformedPayload(
            "expected an array of categories".to_string(),
        ));
    };

    let categories: Vec<Category> = items
        .iter()
        .filter_map(Value::as_object)
        .map(normalize_category)
        .collect();

    if categories.is_empty() {
        return Err(CatalogError::MalformedPayload(
            "category list is empty".to_string(),
        ));
    }

    Ok(categories)
}
