//! In-flight Fetch Module
//!
//! Coalesces concurrent fetches for the same key into one remote call.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::CacheKey;
use crate::error::CatalogError;

/// Result of a shared fetch. The error is reference-counted so every waiter
/// can receive it.
pub type FetchOutcome<T> = std::result::Result<T, Arc<CatalogError>>;

type SharedFetch<T> = Shared<BoxFuture<'static, FetchOutcome<T>>>;

// == In-flight Table ==
/// Table of pending fetches keyed by cache key.
///
/// The first caller for a key starts the fetch; callers arriving while it is
/// pending await the same future. A fetch removes itself from the table when
/// it completes, so later callers start a new one.
pub struct InFlight<T> {
    pending: Arc<Mutex<HashMap<CacheKey, SharedFetch<T>>>>,
}

impl<T> Clone for InFlight<T> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> InFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fetch` for `key`, or joins the fetch already pending for it.
    ///
    /// `fetch` is only polled when no fetch for `key` is pending.
    pub async fn run<F>(&self, key: CacheKey, fetch: F) -> FetchOutcome<T>
    where
        F: Future<Output = FetchOutcome<T>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock().await;
            match pending.get(&key) {
                Some(existing) => {
                    debug!(key = %key, "Joining in-flight fetch");
                    existing.clone()
                }
                None => {
                    let table = Arc::clone(&self.pending);
                    let owned_key = key.clone();
                    let shared = async move {
                        let outcome = fetch.await;
                        table.lock().await.remove(&owned_key);
                        outcome
                    }
                    .boxed()
                    .shared();
                    pending.insert(key, shared.clone());
                    shared
                }
            }
        };

        shared.await
    }

    /// Number of fetches currently pending.
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
