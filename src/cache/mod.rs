//! Cache Module
//!
//! In-memory, namespaced TTL cache for catalog data with a degrade chain
//! for remote failures.

pub mod data_cache;
mod entry;
pub mod inflight;
mod key;
mod namespace;
mod stats;
mod store;


// Re-export public types
pub use data_cache::{Categories, DataCache, FetchMetadata, Products};
pub use entry::CacheEntry;
pub use key::{CacheKey, CATEGORIES_KEY, NO_SUBCATEGORY};
pub use namespace::Namespace;
pub use stats::CacheStats;
pub use store::NamespaceStore;
