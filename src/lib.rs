//! Catalog Cache - in-memory cache in front of a furniture catalog API
//!
//! Serves categories and product listings with per-namespace TTLs, and
//! degrades to stale, bundled or empty data when the API is unreachable.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use cache::DataCache;
pub use config::{CacheSettings, Config};
pub use error::CatalogError;
pub use tasks::{spawn_startup_preload, spawn_sweep_task};
