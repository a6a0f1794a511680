//! Dashboard Enricher server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_enricher::cache::{MemoryDocumentStore, TtlCache};
use dashboard_enricher::notify::WebhookNotifier;
use dashboard_enricher::providers::{HttpClient, Providers};
use dashboard_enricher::registry::{MemoryConfigStore, MemoryWebhookStore, Seed};
use dashboard_enricher::{create_router, spawn_purge_task, AppState, Config};

/// Main entry point for the dashboard server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build stores, provider adapters and the webhook notifier
/// 4. Load seed data if configured
/// 5. Start the background cache purge task
/// 6. Serve HTTP until SIGINT/SIGTERM, then stop the purge task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_enricher=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Dashboard Enricher");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, purge_interval={}s, http_timeout={}s",
        config.server_port, config.purge_interval, config.http_timeout
    );

    let http = HttpClient::new(config.http_timeout()).context("building HTTP client")?;
    let cache = Arc::new(TtlCache::new(Arc::new(MemoryDocumentStore::new())));
    let configs = Arc::new(MemoryConfigStore::new());
    let webhooks = Arc::new(MemoryWebhookStore::new());

    if let Some(path) = &config.seed_file {
        Seed::load(path).await?.apply(&configs, &webhooks).await;
        info!(
            "Loaded {} dashboards from {}",
            configs.len().await,
            path.display()
        );
    }

    let notifier = Arc::new(WebhookNotifier::new(webhooks.clone(), http.clone()));
    let state = AppState::new(
        cache.clone(),
        Providers::from_config(&config, http),
        configs,
        webhooks,
        notifier,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let purge_handle = spawn_purge_task(cache, config.purge_interval(), shutdown_rx);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    // Stop the purge loop and wait for an in-flight cycle to finish
    let _ = shutdown_tx.send(true);
    purge_handle.await.context("joining purge task")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
