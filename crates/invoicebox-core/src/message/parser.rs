//! Extraction of invoice attachments from raw messages.

use invoicebox_imap::SeqNum;
use invoicebox_mime::Message;

use crate::Result;
use crate::message::{Attachment, AttachmentPolicy, EmailMessage};

/// Turns fetched messages into [`EmailMessage`] values.
///
/// A parser owns an [`AttachmentPolicy`] and applies it to every attachment
/// candidate. Candidates that fail the policy are logged and dropped rather
/// than failing the whole message.
#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    policy: AttachmentPolicy,
}

impl MessageParser {
    /// Creates a parser with the given admission policy.
    #[must_use]
    pub const fn new(policy: AttachmentPolicy) -> Self {
        Self { policy }
    }

    /// Parses a raw message and lifts out its admitted attachments.
    ///
    /// Returns `Ok(None)` when no attachment survives the policy. Such
    /// messages take no further part in a sync run: they stay unseen on
    /// the server and are never recorded in the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error when the raw message is empty or its structure
    /// cannot be parsed at all.
    pub fn parse(&self, id: SeqNum, raw: &[u8]) -> Result<Option<EmailMessage>> {
        let message = Message::parse(raw)?;

        let mut attachments = Vec::new();
        for part in message.attachments() {
            let Some(filename) = part.filename() else {
                continue;
            };
            if !self.policy.allows_extension(&filename) {
                tracing::debug!(filename = %filename, "skipping attachment with unsupported extension");
                continue;
            }
            let data = match part.decode_body() {
                Ok(data) => data,
                Err(error) => {
                    tracing::debug!(filename = %filename, %error, "skipping undecodable attachment");
                    continue;
                }
            };
            if data.is_empty() {
                tracing::debug!(filename = %filename, "skipping empty attachment");
                continue;
            }
            if !self.policy.allows_size(data.len()) {
                tracing::warn!(filename = %filename, bytes = data.len(), "skipping oversized attachment");
                continue;
            }
            let content_type = part
                .content_type()
                .map_or_else(|_| "application/octet-stream".to_string(), |ct| ct.to_string());
            attachments.push(Attachment::new(filename, content_type, data));
        }

        if attachments.is_empty() {
            return Ok(None);
        }

        Ok(Some(EmailMessage {
            id,
            message_id: message.message_id().map(str::to_string),
            subject: message.headers.get_decoded("Subject").unwrap_or_default(),
            sender: message.headers.get_decoded("From").unwrap_or_default(),
            date: message.date().unwrap_or_default().to_string(),
            attachments,
        }))
    }
}
