//! Outcome of a synchronization run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters and outcome for one synchronization run.
///
/// A run that could not start at all (connection, authentication, or
/// folder selection failure) carries the cause in `error_message` and
/// leaves the counters at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    /// Messages visited this run, including ones that failed or carried
    /// no invoice documents.
    pub messages_processed: u32,
    /// Invoice numbers newly accepted this run, duplicates excluded.
    pub new_invoices: u32,
    /// Messages that hit an error without aborting the run.
    pub errors: u32,
    /// Cause of a run-fatal abort, when one occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SyncSummary {
    /// Whether the run aborted before visiting the mailbox.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.error_message.is_some()
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_message {
            Some(cause) => write!(f, "aborted: {cause}"),
            None => write!(
                f,
                "{} messages, {} new invoices, {} errors",
                self.messages_processed, self.new_invoices, self.errors
            ),
        }
    }
}
