//! Record Cache - a record service fronted by an expiring cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use record_cache::api::create_router;
use record_cache::repository::{seed_demo_records, InMemoryRecordRepository};
use record_cache::{AppState, Config, RecordService, TtlStore};

/// Main entry point for the record service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the backing store, seeding demo data if asked
/// 4. Create the cache, which starts its sweeper
/// 5. Serve the HTTP API until SIGINT/SIGTERM
/// 6. Stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "record_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting record service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, sweep_interval={}s, port={}, seed_demo_data={}",
        config.cache_ttl, config.sweep_interval, config.server_port, config.seed_demo_data
    );

    let repo = Arc::new(InMemoryRecordRepository::new());
    if config.seed_demo_data {
        let seeded = seed_demo_records(repo.as_ref()).await;
        info!("Seeded {} demo records", seeded);
    }

    let cache = Arc::new(TtlStore::with_sweep_interval(
        config.cache_ttl(),
        config.sweep_interval(),
    ));
    info!("Cache initialized");

    let service = Arc::new(RecordService::new(repo, Arc::clone(&cache)));
    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Err(err) = cache.stop().await {
        warn!("Sweeper did not stop cleanly: {}", err);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
