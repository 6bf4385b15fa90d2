//! # invoicebox-mime
//!
//! MIME message parsing and attachment extraction for email ingestion.
//!
//! ## Features
//!
//! - **Message parsing**: Parse MIME messages, flattening arbitrarily nested
//!   multipart sections into leaf parts with an iterative walk
//! - **Attachment detection**: `Content-Disposition` based detection with
//!   filename recovery from either `Content-Disposition` or `Content-Type`
//! - **Decoding**: Base64 and Quoted-Printable transfer encodings, RFC 2047
//!   encoded-word headers with per-word charsets
//! - **Leniency**: malformed structure degrades instead of failing; decoding
//!   a mailbox must survive whatever other people's mailers produce
//!
//! ## Quick Start
//!
//! ```ignore
//! use invoicebox_mime::Message;
//!
//! let message = Message::parse(raw_bytes)?;
//! println!(
//!     "Subject: {}",
//!     message.headers.get_decoded("subject").unwrap_or_default()
//! );
//!
//! for part in message.attachments() {
//!     let filename = part.filename().unwrap_or_default();
//!     let payload = part.decode_body()?;
//!     println!("{filename}: {} bytes", payload.len());
//! }
//! ```
//!
//! ### Header decoding
//!
//! ```ignore
//! use invoicebox_mime::encoding::decode_header;
//!
//! let subject = decode_header("=?UTF-8?B?15fXqdeR15XXoNeZ15XXqg==?=");
//! assert_eq!(subject, "חשבוניות");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod header;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Message, Part, TransferEncoding};
