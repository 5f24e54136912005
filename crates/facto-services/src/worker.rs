//! Compute worker — consumes work items and owns the canonical write.
//!
//! Each item is an independent invocation: parse the key, compute the
//! factorial exactly, overwrite the record. A failed item writes nothing
//! and is simply dropped — redelivery and retry belong to the queue, not
//! to the worker.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, Semaphore};

use facto_core::config::WorkerSettings;
use facto_core::{factorial, ResultRecord};

use crate::queue::WorkItem;
use crate::store::ResultStore;

/// Process one work item: compute and store.
///
/// The key was validated before enqueue, so no domain check is re-applied
/// here; a malformed body is a corrupt message and fails the invocation.
/// The write unconditionally overwrites, which makes duplicate redelivery
/// of the same item a no-op in effect.
pub fn process(store: &dyn ResultStore, item: &WorkItem) -> anyhow::Result<ResultRecord> {
    let number = item.number()?;
    let result = factorial(number).to_string();

    let record = ResultRecord::new(number, result);
    store.put(&record)?;

    tracing::info!(
        number,
        result_digits = record.result.len(),
        "factorial computed and stored"
    );
    Ok(record)
}

/// Runs until the queue closes or shutdown fires, processing items as
/// they arrive. Concurrency is bounded by a semaphore sized from
/// `max_concurrent_jobs` (0 = available parallelism).
pub async fn run(
    store: Arc<dyn ResultStore>,
    mut rx: mpsc::UnboundedReceiver<WorkItem>,
    settings: WorkerSettings,
    mut shutdown: broadcast::Receiver<()>,
) {
    let max_jobs = if settings.max_concurrent_jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        settings.max_concurrent_jobs as usize
    };

    let semaphore = Arc::new(Semaphore::new(max_jobs));
    tracing::info!(max_concurrent = max_jobs, "compute worker started");

    loop {
        let item = tokio::select! {
            item = rx.recv() => match item {
                Some(item) => item,
                None => {
                    tracing::info!("work queue closed, worker exiting");
                    return;
                }
            },
            _ = shutdown.recv() => {
                tracing::info!("shutdown received, worker exiting");
                return;
            }
        };

        let permit = match semaphore.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => return, // semaphore closed
        };

        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            // Computation is CPU-bound and can be large, so it runs off
            // the async threads.
            if let Err(e) = process(store.as_ref(), &item) {
                tracing::error!(body = item.body(), error = %e, "work item failed, dropping");
            }
            drop(permit);
        });
    }
}
