//! factod — facto compute-on-demand daemon.
//!
//! Hosts the two halves of the protocol in one process: the HTTP lookup
//! service and the background compute worker, decoupled through the
//! result store and the work queue.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use facto_core::config::{FactoConfig, StorageBackend};
use facto_services::{worker, ChannelQueue, FsResultStore, MemoryResultStore, ResultStore, WorkQueue};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = FactoConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = FactoConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        FactoConfig::default()
    });

    tracing::info!(
        port = config.api.port,
        backend = config.storage.backend.as_str(),
        "factod starting"
    );

    // Result store
    let store: Arc<dyn ResultStore> = match config.storage.backend {
        StorageBackend::Fs => {
            let path = &config.storage.path;
            tracing::info!(path = %path.display(), "result store path");
            Arc::new(FsResultStore::new(path)?)
        }
        StorageBackend::Memory => {
            tracing::warn!("memory backend selected — results are lost on restart");
            Arc::new(MemoryResultStore::new())
        }
    };

    // Work queue
    let (queue, work_rx) = ChannelQueue::new();
    let queue: Arc<dyn WorkQueue> = Arc::new(queue);

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
            let _ = shutdown.send(());
        });
    }

    // ── Spawn tasks ──────────────────────────────────────────────────────────

    let worker_task = tokio::spawn(worker::run(
        store.clone(),
        work_rx,
        config.worker.clone(),
        shutdown_tx.subscribe(),
    ));

    let api_task = {
        let state = facto_api::ApiState {
            lookup: facto_services::LookupService::new(store.clone(), queue),
            store,
            backend: config.storage.backend.as_str(),
            started_at: Instant::now(),
            shutdown_tx: shutdown_tx.clone(),
        };
        let port = config.api.port;
        tokio::spawn(async move {
            if let Err(e) = facto_api::serve(state, port).await {
                tracing::error!(error = %e, "API server failed");
            }
        })
    };

    // ── Wait for exit ────────────────────────────────────────────────────────

    let mut shutdown_rx = shutdown_tx.subscribe();

    tokio::select! {
        _ = shutdown_rx.recv() => tracing::info!("shutting down"),
        r = worker_task        => tracing::error!("worker task exited: {:?}", r),
        r = api_task           => tracing::error!("API task exited: {:?}", r),
    }

    Ok(())
}
