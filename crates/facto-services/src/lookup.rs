//! Lookup service — the cache-or-compute decision.
//!
//! One invocation does at most one store read and at most one queue
//! enqueue, never a store write. Concurrent lookups for the same missing
//! key may each enqueue an item; the worker's idempotent write makes the
//! duplicate work harmless, so no in-flight dedup is attempted.

use std::sync::Arc;

use crate::queue::{QueueError, WorkItem, WorkQueue};
use crate::store::{ResultStore, StoreError};

/// Rejected input. Maps to a client error at the HTTP boundary; causes
/// no side effects and is never retried.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("parameter 'number' missing from request")]
    MissingParameter,
    #[error("parameter 'number' is not an integer: {0:?}")]
    Malformed(String),
    #[error("number {0} out of domain")]
    OutOfDomain(i64),
}

impl ValidationError {
    /// Client-facing message. The out-of-domain text says "smaller
    /// than 1" while the guard rejects below 0 — the wording is kept
    /// from the original service contract.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter | ValidationError::Malformed(_) => {
                "Parameter 'number' is missing from request!"
            }
            ValidationError::OutOfDomain(_) => "Given number is smaller than 1!",
        }
    }
}

/// Failure of a lookup invocation.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// What a successful lookup tells the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Cache hit — the stored result, served synchronously.
    Hit { number: u64, result: String },
    /// Cache miss — work was enqueued; the client should retry later.
    Pending { number: u64 },
}

impl LookupOutcome {
    pub fn message(&self) -> String {
        match self {
            LookupOutcome::Hit { number, result } => {
                format!("The result for {} is {}!", number, result)
            }
            LookupOutcome::Pending { number } => format!(
                "Result for {} could not be found. It will be calculated as soon as possible!",
                number
            ),
        }
    }
}

/// The lookup half of the protocol. Stateless between invocations; the
/// store and queue are the only shared resources.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn ResultStore>,
    queue: Arc<dyn WorkQueue>,
}

impl LookupService {
    pub fn new(store: Arc<dyn ResultStore>, queue: Arc<dyn WorkQueue>) -> Self {
        Self { store, queue }
    }

    /// Serve one lookup for the raw `number` query parameter.
    pub fn lookup(&self, raw: Option<&str>) -> Result<LookupOutcome, LookupError> {
        let number = validate(raw)?;

        if let Some(record) = self.store.get(number)? {
            tracing::debug!(number, "cache hit");
            return Ok(LookupOutcome::Hit {
                number,
                result: record.result,
            });
        }

        self.queue.send(WorkItem::new(number))?;
        tracing::info!(number, "cache miss, work enqueued");
        Ok(LookupOutcome::Pending { number })
    }
}

/// Parse and validate the raw query parameter.
fn validate(raw: Option<&str>) -> Result<u64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingParameter)?;
    let number: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::Malformed(raw.to_string()))?;
    if number < 0 {
        return Err(ValidationError::OutOfDomain(number));
    }
    Ok(number as u64)
}
