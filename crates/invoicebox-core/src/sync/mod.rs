//! Synchronization runs over an IMAP mailbox.
//!
//! The orchestrator owns the run loop; the collaborator traits are the
//! seams where document processing and the business invoice store plug
//! in.

mod orchestrator;
mod summary;

pub use orchestrator::{
    AttachmentProcessor, InvoiceRegistry, RunMode, SyncOrchestrator, SyncStore,
};
pub use summary::SyncSummary;
