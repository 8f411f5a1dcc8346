//! API Module
//!
//! HTTP handlers and routing exposing the catalog cache to storefront pages.
//!
//! # Endpoints
//! - `GET /categories` - Category list (`?refresh=true` bypasses the cache)
//! - `GET /products` - Product listing (`?category=&subcategory=&refresh=`)
//! - `POST /cache/preload` - Start a background preload
//! - `DELETE /cache/:namespace[/*key]` - Invalidate a namespace or one key
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
