//! Work queue between the lookup service and the worker.
//!
//! The message body is the decimal string of the key — the full wire
//! contract. Delivery is at-least-once; duplicate items for the same key
//! are harmless because the worker's write is idempotent.

use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("work queue closed")]
    Closed,
}

/// One scheduled computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    body: String,
}

impl WorkItem {
    /// Build an item for a key.
    pub fn new(number: u64) -> Self {
        Self {
            body: number.to_string(),
        }
    }

    /// Build an item from a raw payload, e.g. a redelivered message.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Parse the key back out of the payload. The key was validated
    /// before enqueue, so a parse failure means a corrupt message —
    /// fatal for that delivery, not for the worker.
    pub fn number(&self) -> anyhow::Result<u64> {
        self.body
            .parse()
            .map_err(|e| anyhow::anyhow!("malformed work item body {:?}: {}", self.body, e))
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Enqueue-side of the work queue. The lookup service sends at most one
/// item per invocation and never consumes.
pub trait WorkQueue: Send + Sync {
    fn send(&self, item: WorkItem) -> Result<(), QueueError>;
}

/// Production queue backend: an in-process unbounded channel. The
/// receiving half is owned by the worker loop.
#[derive(Clone)]
pub struct ChannelQueue {
    tx: mpsc::UnboundedSender<WorkItem>,
}

impl ChannelQueue {
    /// Create the queue, returning the send half and the receiver the
    /// worker consumes from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkItem>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl WorkQueue for ChannelQueue {
    fn send(&self, item: WorkItem) -> Result<(), QueueError> {
        self.tx.send(item).map_err(|_| QueueError::Closed)
    }
}
