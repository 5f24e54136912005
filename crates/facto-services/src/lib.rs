//! facto-services — the cache-or-compute protocol.
//!
//! `LookupService` decides between serving a stored result, enqueueing
//! work, and rejecting input. `worker` consumes the queue and owns the
//! canonical write. The two never talk directly — they share only a
//! `ResultStore` and a `WorkQueue`.

pub mod lookup;
pub mod queue;
pub mod store;
pub mod worker;

pub use lookup::{LookupOutcome, LookupService, ValidationError};
pub use queue::{ChannelQueue, QueueError, WorkItem, WorkQueue};
pub use store::{FsResultStore, MemoryResultStore, ResultStore, StoreError};
