//! Redis Proxy - A read-through caching proxy
//!
//! Serves point lookups from a bounded, TTL-expiring local cache and falls
//! back to a Redis backend on a miss.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_proxy::api::create_router;
use redis_proxy::{spawn_cleanup_task, AppState, Config, RedisBackend};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Connect to the Redis backend (optionally seeding fake data)
/// 4. Build the cache, read-through client and admission gate
/// 5. Start background TTL cleanup task
/// 6. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis caching proxy");

    let config = Config::from_env()?;
    config.validate()?;
    info!(
        "Configuration loaded: cache_size={}, cache_expiry={:?}, max_clients={}, port={}, backend={}",
        config.cache_size,
        config.cache_expiry,
        config.max_clients,
        config.server_port,
        config.redis_address
    );

    let backend = RedisBackend::connect(&config.redis_address)
        .await
        .with_context(|| format!("connecting to Redis at {}", config.redis_address))?;
    if config.seed_fake_data {
        backend
            .seed_lowercase_letters()
            .await
            .context("seeding fake data")?;
        info!("Backend seeded with lowercase letters");
    }

    let state = AppState::from_config(&config, Arc::new(backend))?;
    info!("Cache and admission gate initialized");

    let cleanup_handle = spawn_cleanup_task(state.cache().clone(), config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup
/// task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
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

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
