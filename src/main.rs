//! Catalog Cache - in-memory cache in front of a furniture catalog API
//!
//! Serves categories and product listings with per-namespace TTLs, and
//! degrades to stale, bundled or empty data when the API is unreachable.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_cache::api::create_router;
use catalog_cache::source::{HttpRemoteSource, StaticCatalog};
use catalog_cache::{spawn_startup_preload, spawn_sweep_task, AppState, Config, DataCache};

/// Main entry point for the catalog cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the remote client and the cache
/// 4. Start the background TTL sweep and the delayed preload
/// 5. Serve the HTTP API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api={}, port={}, categories_ttl={}s, products_ttl={}s, category_products_ttl={}s, sweep_interval={}s",
        config.api_base_url,
        config.server_port,
        config.cache.categories_ttl.as_secs(),
        config.cache.products_ttl.as_secs(),
        config.cache.category_products_ttl.as_secs(),
        config.cache.sweep_interval.as_secs()
    );

    let remote = HttpRemoteSource::new(&config.api_base_url, config.request_timeout)
        .context("Failed to build catalog API client")?;
    let cache = DataCache::new(
        Arc::new(remote),
        Arc::new(StaticCatalog::furniture()),
        config.cache.clone(),
    );
    info!("Cache initialized");

    let sweep_handle = spawn_sweep_task(cache.clone(), config.cache.sweep_interval);
    let preload_handle = spawn_startup_preload(cache.clone(), config.preload_delay);
    info!("Background tasks started");

    let app = create_router(AppState::new(cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(vec![sweep_handle, preload_handle]))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
