//! Text mutation of shared configuration files
//!
//! Two kinds of edits are supported: an installer-owned block delimited by
//! marker lines, and line-wise pattern upserts. Both read the whole file,
//! decide in memory, and write the whole file back.

mod block;
mod persist;
mod upsert;

// Re-export public API
pub use block::{BlockLocation, OwnedBlock, RemoveOutcome};
pub use persist::{read_config, write_config, write_if_changed};
pub use upsert::{UpsertOutcome, UpsertRule, upsert_all, upsert_file};
