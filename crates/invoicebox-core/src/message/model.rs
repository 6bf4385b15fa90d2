//! Parsed email and attachment data models.

use invoicebox_imap::SeqNum;

/// Default cap on a single decoded attachment payload, in bytes (10 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// File extensions admitted as invoice documents by default.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".pdf", ".csv", ".xlsx", ".xls"];

/// Admission rules applied to attachment candidates.
#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    extensions: Vec<String>,
    max_bytes: usize,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            extensions: ALLOWED_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
            max_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

impl AttachmentPolicy {
    /// Replaces the admitted extension list.
    #[must_use]
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|ext| ext.to_lowercase()).collect();
        self
    }

    /// Replaces the decoded-size cap.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns true if the filename ends in an admitted extension.
    ///
    /// The comparison is case-insensitive, so `Invoice.PDF` is admitted
    /// alongside `invoice.pdf`.
    #[must_use]
    pub fn allows_extension(&self, filename: &str) -> bool {
        let lowered = filename.to_lowercase();
        self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }

    /// Returns true if a decoded payload of this size fits under the cap.
    #[must_use]
    pub const fn allows_size(&self, bytes: usize) -> bool {
        bytes <= self.max_bytes
    }
}

/// One admitted attachment lifted out of a message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Decoded filename.
    pub filename: String,
    /// Content type as `type/subtype`.
    pub content_type: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates a new attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Decoded payload size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A fetched message reduced to the fields ingestion cares about.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Sequence number the message was fetched under.
    pub id: SeqNum,
    /// RFC 5322 Message-ID header, when present.
    pub message_id: Option<String>,
    /// Decoded Subject header.
    pub subject: String,
    /// Decoded From header.
    pub sender: String,
    /// Raw Date header value.
    pub date: String,
    /// Attachments that passed the admission policy.
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Stable ledger key for this message.
    ///
    /// Prefers the Message-ID header; falls back to the sequence number
    /// when the sender omitted one.
    #[must_use]
    pub fn dedupe_key(&self) -> String {
        self.message_id
            .as_ref()
            .map_or_else(|| self.id.get().to_string(), Clone::clone)
    }
}
