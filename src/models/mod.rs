//! Catalog entities, remote payload shapes and HTTP DTOs.

pub mod catalog;
pub mod payload;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use catalog::{normalize_category, Category, Product, Subcategory};
pub use payload::{parse_categories, ProductsPayload};
pub use requests::{ProductQuery, ProductsParams, RefreshParams, ALL_CATEGORIES};
pub use responses::{
    CategoriesResponse, ClearResponse, HealthResponse, PreloadResponse, ProductsResponse,
    StatsResponse,
};
