//! Configuration Module
//!
//! Handles loading service and cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Cache tuning parameters.
///
/// Defaults mirror the storefront's original constants.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// TTL for the category list
    pub categories_ttl: Duration,
    /// TTL for the unfiltered product listing
    pub products_ttl: Duration,
    /// TTL for per-category product listings
    pub category_products_ttl: Duration,
    /// TTL for fetch metadata records
    pub metadata_ttl: Duration,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
    /// Number of leading categories warmed by the preloader
    pub preload_count: usize,
    /// Maximum number of entries per listing namespace
    pub max_entries: usize,
    /// Maximum number of fetch metadata records; zero disables recording
    pub metadata_max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            categories_ttl: Duration::from_secs(5 * 60),
            products_ttl: Duration::from_secs(3 * 60),
            category_products_ttl: Duration::from_secs(2 * 60),
            metadata_ttl: Duration::from_secs(3 * 60),
            sweep_interval: Duration::from_secs(60),
            preload_count: 3,
            max_entries: 1000,
            metadata_max_entries: 1000,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote catalog API
    pub api_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout applied to each remote request
    pub request_timeout: Duration,
    /// Delay before the startup preload pass
    pub preload_delay: Duration,
    /// Cache tuning
    pub cache: CacheSettings,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_API_URL` - Remote API base URL (default: http://localhost:5000/api)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REQUEST_TIMEOUT` - Remote request timeout in seconds (default: 10)
    /// - `PRELOAD_DELAY_MS` - Startup preload delay in milliseconds (default: 1000)
    /// - `CATEGORIES_TTL` - Category list TTL in seconds (default: 300)
    /// - `PRODUCTS_TTL` - Product listing TTL in seconds (default: 180)
    /// - `CATEGORY_PRODUCTS_TTL` - Per-category listing TTL in seconds (default: 120)
    /// - `METADATA_TTL` - Fetch metadata TTL in seconds (default: 180)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `PRELOAD_COUNT` - Categories warmed at startup (default: 3)
    /// - `MAX_ENTRIES` - Maximum entries per listing namespace (default: 1000)
    /// - `METADATA_MAX_ENTRIES` - Maximum fetch metadata records, 0 disables (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let cache = defaults.cache;

        Self {
            api_base_url: env::var("CATALOG_API_URL").unwrap_or(defaults.api_base_url),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            request_timeout: secs_env_or("REQUEST_TIMEOUT", defaults.request_timeout),
            preload_delay: Duration::from_millis(env_or(
                "PRELOAD_DELAY_MS",
                defaults.preload_delay.as_millis() as u64,
            )),
            cache: CacheSettings {
                categories_ttl: secs_env_or("CATEGORIES_TTL", cache.categories_ttl),
                products_ttl: secs_env_or("PRODUCTS_TTL", cache.products_ttl),
                category_products_ttl: secs_env_or(
                    "CATEGORY_PRODUCTS_TTL",
                    cache.category_products_ttl,
                ),
                metadata_ttl: secs_env_or("METADATA_TTL", cache.metadata_ttl),
                sweep_interval: secs_env_or("SWEEP_INTERVAL", cache.sweep_interval),
                preload_count: env_or("PRELOAD_COUNT", cache.preload_count),
                max_entries: env_or("MAX_ENTRIES", cache.max_entries),
                metadata_max_entries: env_or("METADATA_MAX_ENTRIES", cache.metadata_max_entries),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            server_port: 3000,
            request_timeout: Duration::from_secs(10),
            preload_delay: Duration::from_millis(1000),
            cache: CacheSettings::default(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    parse_or(env::var(name).ok(), default)
}

fn secs_env_or(name: &str, default: Duration) -> Duration {
    Duration::from_secs(env_or(name, default.as_secs()))
}

/// Parses a raw value, keeping the default when it is absent or unparseable.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
