//! facto integration test harness.
//!
//! Each test spins up the real wiring in-process: a memory-backed result
//! store, the channel work queue, the compute worker, and the axum API
//! bound to an ephemeral port. Requests go over real HTTP via reqwest.
//!
//! Tests are independent — every harness instance owns its own store,
//! queue, and server, so they can run in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use facto_core::config::WorkerSettings;
use facto_services::{
    worker, ChannelQueue, LookupService, MemoryResultStore, QueueError, ResultStore, WorkItem,
    WorkQueue,
};

mod lookup;
mod roundtrip;

// ── Harness ───────────────────────────────────────────────────────────────────

/// Queue wrapper that counts enqueues on the way through, so tests can
/// assert side-effect behavior of the lookup path.
pub struct CountingQueue {
    inner: ChannelQueue,
    sent: Arc<AtomicUsize>,
}

impl WorkQueue for CountingQueue {
    fn send(&self, item: WorkItem) -> Result<(), QueueError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        self.inner.send(item)
    }
}

/// One fully-wired daemon on an ephemeral port.
pub struct TestDaemon {
    pub base_url: String,
    pub store: Arc<MemoryResultStore>,
    pub enqueued: Arc<AtomicUsize>,
    pub shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

impl TestDaemon {
    pub fn enqueued_count(&self) -> usize {
        self.enqueued.load(Ordering::SeqCst)
    }
}

/// Start store + queue + worker + API server, all in-process.
pub async fn spawn_daemon() -> Result<TestDaemon> {
    let store = Arc::new(MemoryResultStore::new());
    let (channel_queue, work_rx) = ChannelQueue::new();
    let enqueued = Arc::new(AtomicUsize::new(0));
    let queue: Arc<dyn WorkQueue> = Arc::new(CountingQueue {
        inner: channel_queue,
        sent: enqueued.clone(),
    });

    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    tokio::spawn(worker::run(
        store.clone() as Arc<dyn ResultStore>,
        work_rx,
        WorkerSettings::default(),
        shutdown_tx.subscribe(),
    ));

    let state = facto_api::ApiState {
        lookup: LookupService::new(store.clone(), queue),
        store: store.clone(),
        backend: "memory",
        started_at: Instant::now(),
        shutdown_tx: shutdown_tx.clone(),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, facto_api::router(state)).await;
    });

    Ok(TestDaemon {
        base_url: format!("http://{}/api", addr),
        store,
        enqueued,
        shutdown_tx,
    })
}

/// GET a path, returning (status, parsed JSON body).
pub async fn api_get(daemon: &TestDaemon, path: &str) -> Result<(u16, serde_json::Value)> {
    let resp = reqwest::get(format!("{}{}", daemon.base_url, path))
        .await
        .context("request failed")?;
    let code = resp.status().as_u16();
    let body = resp.json().await.context("response was not JSON")?;
    Ok((code, body))
}

/// POST a path with no body, returning (status, parsed JSON body).
pub async fn api_post(daemon: &TestDaemon, path: &str) -> Result<(u16, serde_json::Value)> {
    let resp = reqwest::Client::new()
        .post(format!("{}{}", daemon.base_url, path))
        .send()
        .await
        .context("request failed")?;
    let code = resp.status().as_u16();
    let body = resp.json().await.context("response was not JSON")?;
    Ok((code, body))
}

/// Poll the factorial endpoint until it reports a cache hit, or time out.
pub async fn wait_for_hit(
    daemon: &TestDaemon,
    number: u64,
    timeout: Duration,
) -> Result<String> {
    let deadline = Instant::now() + timeout;
    loop {
        let (code, body) = api_get(daemon, &format!("/factorial?number={}", number)).await?;
        anyhow::ensure!(code == 200, "unexpected status {code}: {body}");
        let message = body["message"].as_str().context("missing message")?;
        if message.starts_with(&format!("The result for {} is ", number)) {
            return Ok(message.to_string());
        }
        anyhow::ensure!(
            Instant::now() < deadline,
            "result for {number} never became available; last message: {message}"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
