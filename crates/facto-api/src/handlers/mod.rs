//! HTTP API handlers — exposes the lookup protocol and daemon state as JSON.

pub mod factorial;
pub mod status;

use std::sync::Arc;
use std::time::Instant;

use facto_services::{LookupService, ResultStore};

#[derive(Clone)]
pub struct ApiState {
    pub lookup: LookupService,
    pub store: Arc<dyn ResultStore>,
    /// Storage backend name from the active config, e.g. "fs", "memory".
    pub backend: &'static str,
    pub started_at: Instant,
    /// Shutdown broadcast sender — signals graceful daemon shutdown.
    pub shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

// Re-export handler functions for use in router setup.
pub use factorial::handle_factorial;
pub use status::{handle_shutdown, handle_status};
