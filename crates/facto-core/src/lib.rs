//! facto-core — shared types, configuration, and exact integer arithmetic.
//! All other facto crates depend on this one.

pub mod config;
pub mod natural;
pub mod record;

pub use natural::{factorial, Natural};
pub use record::ResultRecord;
