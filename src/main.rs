//! Funding monitor entry point
//!
//! Orchestrates:
//! 1. Config + logging initialization
//! 2. Venue adapters (Variational, Backpack)
//! 3. Spread engine + aggregate store
//! 4. Poll task
//! 5. axum read API server
//! 6. Ctrl+C graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{error, info};

use funding_monitor::adapters::{BackpackAdapter, VariationalAdapter, VenueAdapter};
use funding_monitor::config::constants::{config_path, log_configuration};
use funding_monitor::config::{init_logging, load_config_or_default};
use funding_monitor::core::{poll_task, AggregateStore, SpreadEngine};
use funding_monitor::server::{self, AppState};

/// Grace period for the poll task after the shutdown signal
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // =========================================================================
    // 1. Config + logging
    // =========================================================================
    dotenvy::dotenv().ok();
    init_logging();

    info!("=== Funding Rate Monitor ===");

    let path = config_path();
    let config = load_config_or_default(&path)?;
    log_configuration(&config);

    // =========================================================================
    // 2. Adapters
    // =========================================================================
    let variational: Arc<dyn VenueAdapter> =
        Arc::new(VariationalAdapter::new(config.variational.clone())?);
    let backpack: Arc<dyn VenueAdapter> = Arc::new(BackpackAdapter::new(config.backpack.clone())?);

    // =========================================================================
    // 3. Engine + store
    // =========================================================================
    let engine = Arc::new(SpreadEngine::new(
        config.symbols.reconciler(),
        config.recommendation,
    ));
    let store = Arc::new(AggregateStore::new());

    // =========================================================================
    // 4. Poll task
    // =========================================================================
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let mut poll_handle = tokio::spawn(poll_task(
        variational,
        backpack,
        engine,
        Arc::clone(&store),
        config.poller.interval(),
        shutdown_rx,
    ));

    // =========================================================================
    // 5. Read API
    // =========================================================================
    let state = AppState {
        store: Arc::clone(&store),
    };
    let port = config.server.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(state, port).await {
            error!(error = %e, "Read API server failed");
        }
    });

    // =========================================================================
    // 6. Wait for Ctrl+C → graceful shutdown
    // =========================================================================
    info!(port, "Monitor running. Press Ctrl+C to shutdown");

    let poll_finished = tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("[SHUTDOWN] Graceful shutdown initiated");
            false
        }
        _ = &mut poll_handle => {
            error!("Poll task exited unexpectedly");
            true
        }
    };

    let _ = shutdown_tx.send(());
    if !poll_finished && tokio::time::timeout(SHUTDOWN_GRACE, &mut poll_handle).await.is_err() {
        poll_handle.abort();
    }
    server_handle.abort();

    info!("Shutdown complete");
    Ok(())
}
