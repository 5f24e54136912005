//! The one durable record this system ever writes.

use serde::{Deserialize, Serialize};

/// A computed factorial, keyed by its input.
///
/// At most one record exists per `number`. Records are immutable once
/// written — computation is deterministic, so rewriting the same record
/// is a no-op in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The input value. Unique key.
    pub number: u64,
    /// Exact decimal rendering of `number!`. Stored as text so no
    /// precision is ever lost, regardless of magnitude.
    pub result: String,
}

impl ResultRecord {
    pub fn new(number: u64, result: impl Into<String>) -> Self {
        Self {
            number,
            result: result.into(),
        }
    }
}
