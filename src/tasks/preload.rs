//! Startup Preload Task
//!
//! Warms the cache shortly after startup so the first category pages are
//! served from memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::DataCache;

/// Spawns a one-shot task that waits `delay`, then runs
/// [`DataCache::preload_common_products`].
///
/// Failures are logged; nothing is propagated.
pub fn spawn_startup_preload(cache: DataCache, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        info!("Starting product preload");

        if let Err(err) = cache.preload_common_products().await {
            warn!(error = %err, "Product preload task failed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheSettings;
    use crate::source::{MockRemoteSource, StaticCatalog};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_preload_runs_after_delay() {
        let remote = Arc::new(
            MockRemoteSource::new().with_categories(json!([{ "_id": "sofas" }, { "_id": "beds" }])),
        );
        let cache = DataCache::new(
            remote.clone(),
            Arc::new(StaticCatalog::empty()),
            CacheSettings::default(),
        );

        let handle = spawn_startup_preload(cache.clone(), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(remote.calls().await.fetch_categories, 0);

        handle.await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let calls = remote.calls().await;
        assert_eq!(calls.fetch_categories, 1);
        assert_eq!(calls.fetch_products, 2);
        assert!(cache.fetch_metadata("beds", None).await.is_some());
    }
}
