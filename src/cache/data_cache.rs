//! Data Cache Module
//!
//! Serves category and product collections from memory, fetching from the
//! remote catalog on a miss and degrading to stale, bundled or empty data
//! when the remote is unavailable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::inflight::{FetchOutcome, InFlight};
use crate::cache::{CacheKey, CacheStats, Namespace, NamespaceStore};
use crate::config::CacheSettings;
use crate::error::Result;
use crate::models::{parse_categories, Category, Product, ProductQuery, ProductsPayload};
use crate::source::{LocalFallbackSource, RemoteSource};

/// Shared, immutable category list.
pub type Categories = Arc<Vec<Category>>;

/// Shared, immutable product listing.
pub type Products = Arc<Vec<Product>>;

/// Bookkeeping recorded alongside every successful product fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchMetadata {
    pub item_count: usize,
    pub fetched_at: DateTime<Utc>,
}

// == Cache State ==
/// All namespaces plus counters, guarded by one lock.
#[derive(Debug)]
struct CacheState {
    categories: NamespaceStore<Categories>,
    products: NamespaceStore<Products>,
    category_products: NamespaceStore<Products>,
    metadata: NamespaceStore<FetchMetadata>,
    stats: CacheStats,
}

impl CacheState {
    fn new(settings: &CacheSettings) -> Self {
        fn store<T>(namespace: Namespace, settings: &CacheSettings) -> NamespaceStore<T> {
            NamespaceStore::new(namespace.ttl(settings), namespace.capacity(settings))
        }

        Self {
            categories: store(Namespace::Categories, settings),
            products: store(Namespace::Products, settings),
            category_products: store(Namespace::CategoryProducts, settings),
            metadata: store(Namespace::Metadata, settings),
            stats: CacheStats::new(),
        }
    }

    fn listings(&self, namespace: Namespace) -> &NamespaceStore<Products> {
        match namespace {
            Namespace::Products => &self.products,
            _ => &self.category_products,
        }
    }

    fn listings_mut(&mut self, namespace: Namespace) -> &mut NamespaceStore<Products> {
        match namespace {
            Namespace::Products => &mut self.products,
            _ => &mut self.category_products,
        }
    }

    fn total_entries(&self) -> usize {
        self.categories.len()
            + self.products.len()
            + self.category_products.len()
            + self.metadata.len()
    }

    fn clear(&mut self, namespace: Namespace, key: Option<&CacheKey>) -> usize {
        fn clear_one<T>(store: &mut NamespaceStore<T>, key: Option<&CacheKey>) -> usize {
            match key {
                Some(key) => usize::from(store.remove(key)),
                None => store.clear(),
            }
        }

        match namespace {
            Namespace::Categories => clear_one(&mut self.categories, key),
            Namespace::Products => clear_one(&mut self.products, key),
            Namespace::CategoryProducts => clear_one(&mut self.category_products, key),
            Namespace::Metadata => clear_one(&mut self.metadata, key),
        }
    }

    fn cleanup_expired(&mut self) -> usize {
        self.categories.cleanup_expired()
            + self.products.cleanup_expired()
            + self.category_products.cleanup_expired()
            + self.metadata.cleanup_expired()
    }
}

// == Data Cache ==
/// In-memory catalog cache.
///
/// Cloning is cheap and every clone shares the same state, so one instance
/// is built at startup and handed to the HTTP layer and background tasks.
///
/// The getters never fail: remote errors are logged and answered from the
/// degrade chain (stale entry, then bundled data, then an empty collection).
#[derive(Clone)]
pub struct DataCache {
    state: Arc<RwLock<CacheState>>,
    remote: Arc<dyn RemoteSource>,
    fallback: Arc<dyn LocalFallbackSource>,
    category_fetches: InFlight<Categories>,
    product_fetches: InFlight<Products>,
    settings: Arc<CacheSettings>,
}

impl DataCache {
    // == Constructor ==
    /// Creates an empty cache in front of `remote`, falling back to `fallback`.
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        fallback: Arc<dyn LocalFallbackSource>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::new(&settings))),
            remote,
            fallback,
            category_fetches: InFlight::new(),
            product_fetches: InFlight::new(),
            settings: Arc::new(settings),
        }
    }

    // == Categories ==
    /// Returns the category list.
    ///
    /// A valid cached list is returned without I/O unless `force_refresh` is
    /// set. Otherwise the list is fetched, normalized and cached.
    pub async fn get_categories(&self, force_refresh: bool) -> Categories {
        match self.try_get_categories(force_refresh).await {
            Ok(categories) => categories,
            Err(err) => {
                warn!(error = %err, "Category fetch failed, degrading");
                self.degraded_categories().await
            }
        }
    }

    async fn try_get_categories(&self, force_refresh: bool) -> FetchOutcome<Categories> {
        let key = CacheKey::categories();

        if !force_refresh {
            // Write lock: the lookup updates stats
            let mut state = self.state.write().await;
            if let Some(hit) = state.categories.get_fresh(&key).cloned() {
                state.stats.record_hit();
                debug!(key = %key, "Cache hit");
                return Ok(hit);
            }
            state.stats.record_miss();
        }

        let fetch = self.clone().fetch_categories(key.clone());
        self.category_fetches.run(key, fetch).await
    }

    async fn fetch_categories(self, key: CacheKey) -> FetchOutcome<Categories> {
        let outcome = self.load_categories().await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(categories) => {
                let categories = Arc::new(categories);
                if let Err(err) = state.categories.insert(key.clone(), Arc::clone(&categories)) {
                    warn!(key = %key, error = %err, "Could not cache categories");
                }
                info!(count = categories.len(), "Fetched categories from remote");
                Ok(categories)
            }
            Err(err) => {
                state.stats.record_remote_failure();
                Err(Arc::new(err))
            }
        }
    }

    async fn load_categories(&self) -> Result<Vec<Category>> {
        let body = self.remote.fetch_categories().await?;
        parse_categories(body)
    }

    async fn degraded_categories(&self) -> Categories {
        let key = CacheKey::categories();
        let mut state = self.state.write().await;

        if let Some(stale) = state.categories.get_any(&key).map(|e| Arc::clone(&e.data)) {
            state.stats.record_stale();
            warn!(count = stale.len(), "Serving stale categories");
            return stale;
        }

        let local = self.fallback.categories();
        if !local.is_empty() {
            state.stats.record_fallback();
            warn!(count = local.len(), "Serving bundled fallback categories");
            return Arc::new(local);
        }

        state.stats.record_empty();
        warn!("No category data available, serving empty list");
        Arc::new(Vec::new())
    }

    // == Products ==
    /// Returns the product listing for `category` (or `"all"`), optionally
    /// narrowed to `subcategory`.
    ///
    /// Same cache/fetch/degrade policy as [`DataCache::get_categories`].
    /// Always returns a vector, possibly empty.
    pub async fn get_products(
        &self,
        category: &str,
        subcategory: Option<&str>,
        force_refresh: bool,
    ) -> Products {
        let query = ProductQuery::new(category, subcategory.map(str::to_string));
        self.get_listing(&query, force_refresh).await
    }

    /// [`DataCache::get_products`] for an already-built query.
    pub async fn get_listing(&self, query: &ProductQuery, force_refresh: bool) -> Products {
        match self.try_get_products(query, force_refresh).await {
            Ok(products) => products,
            Err(err) => {
                warn!(
                    category = %query.category,
                    subcategory = ?query.subcategory,
                    error = %err,
                    "Product fetch failed, degrading"
                );
                self.degraded_products(query).await
            }
        }
    }

    async fn try_get_products(
        &self,
        query: &ProductQuery,
        force_refresh: bool,
    ) -> FetchOutcome<Products> {
        let key = CacheKey::for_query(query);
        let namespace = Namespace::for_query(query);

        if !force_refresh {
            let mut state = self.state.write().await;
            if let Some(hit) = state.listings(namespace).get_fresh(&key).cloned() {
                state.stats.record_hit();
                debug!(key = %key, "Cache hit");
                return Ok(hit);
            }
            state.stats.record_miss();
        }

        let fetch = self.clone().fetch_products(query.clone(), key.clone());
        self.product_fetches.run(key, fetch).await
    }

    async fn fetch_products(self, query: ProductQuery, key: CacheKey) -> FetchOutcome<Products> {
        let outcome = self.load_products(&query).await;
        let namespace = Namespace::for_query(&query);

        let mut state = self.state.write().await;
        match outcome {
            Ok(products) => {
                let products = Arc::new(products);
                if let Err(err) = state
                    .listings_mut(namespace)
                    .insert(key.clone(), Arc::clone(&products))
                {
                    warn!(key = %key, error = %err, "Could not cache products");
                }

                let metadata = FetchMetadata {
                    item_count: products.len(),
                    fetched_at: Utc::now(),
                };
                if let Err(err) = state.metadata.insert(key.clone(), metadata) {
                    warn!(key = %key, error = %err, "Could not record fetch metadata");
                }

                info!(
                    key = %key,
                    count = products.len(),
                    "Fetched products from remote"
                );
                Ok(products)
            }
            Err(err) => {
                state.stats.record_remote_failure();
                Err(Arc::new(err))
            }
        }
    }

    async fn load_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let body = self.remote.fetch_products(query).await?;
        ProductsPayload::parse(body)
    }

    async fn degraded_products(&self, query: &ProductQuery) -> Products {
        let key = CacheKey::for_query(query);
        let namespace = Namespace::for_query(query);
        let mut state = self.state.write().await;

        if let Some(stale) = state
            .listings(namespace)
            .get_any(&key)
            .map(|e| Arc::clone(&e.data))
        {
            state.stats.record_stale();
            warn!(key = %key, count = stale.len(), "Serving stale products");
            return stale;
        }

        let local = self.fallback.products(query);
        if !local.is_empty() {
            state.stats.record_fallback();
            warn!(key = %key, count = local.len(), "Serving bundled fallback products");
            return Arc::new(local);
        }

        state.stats.record_empty();
        warn!(key = %key, "No product data available, serving empty list");
        Arc::new(Vec::new())
    }

    /// Metadata recorded by the last successful fetch of a listing.
    pub async fn fetch_metadata(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Option<FetchMetadata> {
        let query = ProductQuery::new(category, subcategory.map(str::to_string));
        let key = CacheKey::for_query(&query);
        let state = self.state.read().await;
        state.metadata.get_fresh(&key).cloned()
    }

    // == Preload ==
    /// Warms the product listings of the first few categories.
    ///
    /// Runs in the background: the returned handle completes once the
    /// category list is known and one fetch per category has been spawned,
    /// without waiting for those fetches. Failures are logged and dropped.
    pub fn preload_common_products(&self) -> JoinHandle<()> {
        let cache = self.clone();

        tokio::spawn(async move {
            let categories = cache.get_categories(false).await;
            let mut dispatched = 0;

            for category in categories
                .iter()
                .filter(|c| !c.id.is_empty())
                .take(cache.settings.preload_count)
            {
                let cache = cache.clone();
                let query = ProductQuery::new(category.id.clone(), None);
                tokio::spawn(async move {
                    match cache.try_get_products(&query, false).await {
                        Ok(products) => debug!(
                            category = %query.category,
                            count = products.len(),
                            "Preloaded products"
                        ),
                        Err(err) => warn!(
                            category = %query.category,
                            error = %err,
                            "Preload failed"
                        ),
                    }
                });
                dispatched += 1;
            }

            info!(categories = dispatched, "Product preload dispatched");
        })
    }

    // == Invalidation ==
    /// Removes one entry of `namespace`, or all of them when `key` is `None`.
    ///
    /// Returns the number of entries removed.
    pub async fn clear_cache(&self, namespace: Namespace, key: Option<&str>) -> usize {
        let key = key.map(CacheKey::from);
        let mut state = self.state.write().await;
        let removed = state.clear(namespace, key.as_ref());
        let total = state.total_entries();
        state.stats.set_total_entries(total);

        info!(namespace = %namespace, key = ?key, removed, "Cache cleared");
        removed
    }

    // == Sweep ==
    /// Drops expired entries from every namespace.
    ///
    /// Returns the number of entries removed. Reads check validity
    /// themselves, so this only bounds memory.
    pub async fn sweep_expired(&self) -> usize {
        let mut state = self.state.write().await;
        let removed = state.cleanup_expired();
        state.stats.record_swept(removed);
        let total = state.total_entries();
        state.stats.set_total_entries(total);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.total_entries());
        stats
    }
}
