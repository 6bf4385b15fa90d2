//! # invoicebox-imap
//!
//! An async IMAP4rev1 client for scanning invoice mailboxes, with full
//! modified UTF-7 folder name support (RFC 3501 §5.1.3).
//!
//! ## Features
//!
//! - **Type-state connection management**: Compile-time enforcement of valid
//!   IMAP state transitions (`NotAuthenticated` → `Authenticated` → `Selected`)
//! - **Folder names in any script**: Transparent modified UTF-7 encoding and
//!   decoding, so `חשבוניות` or `Entwürfe` work like `INBOX`
//! - **TLS via rustls**: Certificate verification always on, no plaintext mode
//! - **Bounded operations**: Configurable connect and command timeouts
//! - **Sans-I/O parser**: Protocol parsing separated from network I/O
//!
//! ## Quick Start
//!
//! ```ignore
//! use invoicebox_imap::{EmailConfig, Provider, Session};
//!
//! #[tokio::main]
//! async fn main() -> invoicebox_imap::Result<()> {
//!     let config = EmailConfig::for_provider(Provider::Gmail, "me@gmail.com", "app-pass")
//!         .folder("Receipts")
//!         .lookback_days(30);
//!
//!     let folder = config.folder.clone();
//!     let mut session = Session::connect(config).await?;
//!     session.select_folder(&folder).await?;
//!
//!     for id in session.search_unseen().await? {
//!         let raw = session.fetch_message(id).await?;
//!         println!("Message {}: {} bytes", id.get(), raw.len());
//!         session.mark_seen(id).await?;
//!     }
//!
//!     session.disconnect().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Connection States
//!
//! The lower-level [`Client`] uses the type-state pattern to enforce valid
//! IMAP operations at compile time:
//!
//! ```text
//! ┌─────────────────────┐
//! │   NotAuthenticated  │ ─── login() ───→ Authenticated
//! └─────────────────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    Authenticated    │ ─── select() ───→ Selected
//! └─────────────────────┘
//! ```
//!
//! [`Session`] wraps the client and manages these transitions internally.
//!
//! ## Modules
//!
//! - [`command`]: IMAP command builders and types
//! - [`config`]: Mailbox connection settings and provider presets
//! - [`connection`]: Connection management and type-state client
//! - [`parser`]: Sans-I/O response parser
//! - [`types`]: Core IMAP types (mailboxes, sequence numbers, tags)
//! - [`utf7`]: Modified UTF-7 folder name codec

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod connection;
mod error;
pub mod parser;
pub mod types;
pub mod utf7;

pub use command::{Command, SearchCriteria, StoreAction, TagGenerator};
pub use config::{EmailConfig, Provider};
pub use connection::{
    Authenticated, Client, FramedStream, ImapStream, NotAuthenticated, ResponseAccumulator,
    Selected, Session,
};
pub use error::{Error, Result};
pub use parser::{FetchItem, Response, ResponseCode, ResponseParser, Status, UntaggedResponse};
pub use types::{
    ListResponse, Mailbox, MailboxAttribute, MailboxFolder, MailboxStatus, SeqNum, Tag,
};

/// IMAP protocol version supported.
pub const IMAP_VERSION: &str = "IMAP4rev1";
