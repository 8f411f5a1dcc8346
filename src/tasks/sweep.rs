//! TTL Sweep Task
//!
//! Background task that periodically drops expired cache entries so keys
//! that are never read again do not accumulate.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::DataCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. Reads check entry validity on their own, so the sweep only
/// bounds memory.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: DataCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired().await;
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
