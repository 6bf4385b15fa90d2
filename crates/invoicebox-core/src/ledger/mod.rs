//! Idempotent sync ledger.
//!
//! Every processed message leaves exactly one row here, keyed by its
//! Message-ID. The ledger is what makes repeated runs over the same
//! mailbox converge instead of piling up duplicate work.

mod model;
mod repository;

pub use model::{LastSync, SyncRecord, SyncStatus};
pub use repository::{DEFAULT_HISTORY_LIMIT, SqliteLedger};
