//! Durable result storage.
//!
//! Records are stored one file per key:
//!   {root}/{number}
//!
//! The file body is the decimal result string. Records are effectively
//! immutable — computation is deterministic, so a rewrite always carries
//! the same bytes. No TTLs, no eviction.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

use facto_core::ResultRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read record {number}: {source}")]
    ReadFailed {
        number: u64,
        source: std::io::Error,
    },
    #[error("failed to write record {number}: {source}")]
    WriteFailed {
        number: u64,
        source: std::io::Error,
    },
}

/// Single-key read/write storage shared by the lookup service and the
/// worker. Implementations provide their own internal consistency
/// (atomic per-key read and write); nothing here adds transactions
/// on top.
pub trait ResultStore: Send + Sync {
    /// Fetch the record for a key, if one has been computed.
    fn get(&self, number: u64) -> Result<Option<ResultRecord>, StoreError>;

    /// Write a record, unconditionally overwriting any existing one.
    /// Repeated writes of the same deterministic result are no-ops
    /// in effect, which makes duplicate queue redelivery safe.
    fn put(&self, record: &ResultRecord) -> Result<(), StoreError>;

    /// Number of records present (for status reporting).
    fn count(&self) -> usize;
}

// ── Filesystem backend ────────────────────────────────────────────────────────

/// Filesystem-backed store.
#[derive(Clone)]
pub struct FsResultStore {
    root: PathBuf,
}

impl FsResultStore {
    /// Create a store rooted at the given directory.
    ///
    /// For production: $XDG_DATA_HOME/facto/results
    /// For testing: /tmp/facto-store-{pid}
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            anyhow::anyhow!("failed to create store root {}: {}", root.display(), e)
        })?;
        Ok(Self { root })
    }

    fn record_path(&self, number: u64) -> PathBuf {
        self.root.join(number.to_string())
    }

    pub fn clear(&self) {
        if let Ok(entries) = fs::read_dir(&self.root) {
            for entry in entries.flatten() {
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}

impl ResultStore for FsResultStore {
    fn get(&self, number: u64) -> Result<Option<ResultRecord>, StoreError> {
        let path = self.record_path(number);
        if !path.exists() {
            return Ok(None);
        }
        let result =
            fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed { number, source })?;
        Ok(Some(ResultRecord::new(number, result)))
    }

    fn put(&self, record: &ResultRecord) -> Result<(), StoreError> {
        let number = record.number;
        let path = self.record_path(number);

        // Atomic write: tmp file → rename. A reader never observes a
        // half-written result.
        let tmp_path = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path)
                .map_err(|source| StoreError::WriteFailed { number, source })?;
            file.write_all(record.result.as_bytes())
                .map_err(|source| StoreError::WriteFailed { number, source })?;
            file.sync_all()
                .map_err(|source| StoreError::WriteFailed { number, source })?;
        }
        fs::rename(&tmp_path, &path)
            .map_err(|source| StoreError::WriteFailed { number, source })?;

        tracing::trace!(number, "record stored");
        Ok(())
    }

    fn count(&self) -> usize {
        fs::read_dir(&self.root)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().extension().is_none())
                    .count()
            })
            .unwrap_or(0)
    }
}

// ── In-memory backend ─────────────────────────────────────────────────────────

/// In-memory store. Contents are lost on restart; used by tests and the
/// `memory` storage backend.
#[derive(Clone, Default)]
pub struct MemoryResultStore {
    /// number → decimal result
    records: Arc<DashMap<u64, String>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }
}

impl ResultStore for MemoryResultStore {
    fn get(&self, number: u64) -> Result<Option<ResultRecord>, StoreError> {
        Ok(self
            .records
            .get(&number)
            .map(|r| ResultRecord::new(number, r.clone())))
    }

    fn put(&self, record: &ResultRecord) -> Result<(), StoreError> {
        self.records.insert(record.number, record.result.clone());
        Ok(())
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}
