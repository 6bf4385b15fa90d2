//! Invoice attachment extraction from fetched mail.
//!
//! This module reduces raw RFC 5322 messages to the fields the sync run
//! needs: identity headers plus the attachments admitted by policy.

mod model;
mod parser;

pub use model::{
    ALLOWED_EXTENSIONS, Attachment, AttachmentPolicy, DEFAULT_MAX_ATTACHMENT_BYTES, EmailMessage,
};
pub use parser::MessageParser;
