//! # invoicebox-core
//!
//! Invoice ingestion engine for `InvoiceBox`.
//!
//! This crate provides:
//! - Attachment extraction from raw messages, filtered by admission policy
//! - An idempotent sync ledger backed by `SQLite`
//! - A sync orchestrator that walks unseen mail end to end
//!
//! The orchestrator is generic over three collaborator traits: an
//! [`AttachmentProcessor`] that turns documents into invoice numbers, an
//! [`InvoiceRegistry`] that answers duplicate checks against the business
//! database, and a [`SyncStore`] that persists per-message outcomes
//! (implemented here by [`SqliteLedger`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use invoicebox_core::{
//!     AttachmentPolicy, MessageParser, RunMode, SqliteLedger, SyncOrchestrator,
//! };
//! use invoicebox_imap::EmailConfig;
//!
//! # use invoicebox_core::{Attachment, AttachmentProcessor, InvoiceRegistry, Result};
//! # struct MyProcessor;
//! # #[async_trait::async_trait]
//! # impl AttachmentProcessor for MyProcessor {
//! #     async fn process_attachment(&self, _: &Attachment) -> Result<Option<String>> {
//! #         Ok(None)
//! #     }
//! # }
//! # struct MyRegistry;
//! # #[async_trait::async_trait]
//! # impl InvoiceRegistry for MyRegistry {
//! #     async fn is_duplicate_invoice(&self, _: &str) -> bool {
//! #         false
//! #     }
//! # }
//! # async fn run() -> Result<()> {
//! let config = EmailConfig::new("imap.example.com", "ap@fleet.example", "app-password");
//! let ledger = SqliteLedger::open("invoicebox.db").await?;
//!
//! let orchestrator = SyncOrchestrator::new(
//!     config,
//!     MessageParser::new(AttachmentPolicy::default()),
//!     MyProcessor,
//!     MyRegistry,
//!     ledger,
//! );
//! let summary = orchestrator.run(RunMode::Interactive).await;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod ledger;
pub mod message;
pub mod sync;

pub use error::{Error, Result};
pub use ledger::{DEFAULT_HISTORY_LIMIT, LastSync, SqliteLedger, SyncRecord, SyncStatus};
pub use message::{
    ALLOWED_EXTENSIONS, Attachment, AttachmentPolicy, DEFAULT_MAX_ATTACHMENT_BYTES, EmailMessage,
    MessageParser,
};
pub use sync::{
    AttachmentProcessor, InvoiceRegistry, RunMode, SyncOrchestrator, SyncStore, SyncSummary,
};
