//! IMAP connection management.
//!
//! This module provides connection handling for IMAP servers, including:
//! - TLS stream setup with certificate verification
//! - Framed I/O for the IMAP protocol
//! - Type-state connection wrapper
//! - High-level session used by sync runs

mod client;
mod framed;
mod session;
mod stream;

pub use client::{Authenticated, Client, NotAuthenticated, Selected};
pub use framed::{FramedStream, ResponseAccumulator};
pub use session::Session;
pub use stream::{ImapStream, connect_tls, create_tls_connector};
