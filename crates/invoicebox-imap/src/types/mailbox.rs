//! Mailbox types.

use crate::utf7;

use super::SeqNum;

/// Mailbox name in its wire form (modified UTF-7).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox(pub String);

impl Mailbox {
    /// Creates a mailbox from a name already in wire form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a mailbox from a Unicode display name, encoding it for the
    /// wire.
    #[must_use]
    pub fn from_display(name: &str) -> Self {
        Self(utf7::encode(name))
    }

    /// The INBOX mailbox (case-insensitive per RFC).
    #[must_use]
    pub fn inbox() -> Self {
        Self("INBOX".to_string())
    }

    /// Returns the wire name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the decoded Unicode display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        utf7::decode(&self.0)
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discoverable folder: Unicode display name plus its wire-encoded form.
///
/// When the wire name cannot be decoded, the display name equals the wire
/// name; listing never fails on a strange server label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxFolder {
    /// Decoded Unicode display name.
    pub name: String,
    /// Modified UTF-7 name as the server sent it.
    pub wire_name: String,
    /// False when the server marked the folder `\Noselect`.
    pub selectable: bool,
}

impl MailboxFolder {
    /// Builds a folder description from a wire name.
    #[must_use]
    pub fn from_wire(wire_name: &str, selectable: bool) -> Self {
        Self {
            name: utf7::decode(wire_name),
            wire_name: wire_name.to_string(),
            selectable,
        }
    }
}

/// Mailbox status information from SELECT.
#[derive(Debug, Clone, Default)]
pub struct MailboxStatus {
    /// Number of messages in the mailbox.
    pub exists: u32,
    /// Number of recent messages.
    pub recent: u32,
    /// First unseen message sequence number.
    pub unseen: Option<SeqNum>,
    /// Next UID to be assigned.
    pub uid_next: Option<u32>,
    /// UIDVALIDITY value.
    pub uid_validity: Option<u32>,
    /// Flags defined for this mailbox.
    pub flags: Vec<String>,
    /// Whether the mailbox is read-only.
    pub read_only: bool,
}

/// LIST response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Mailbox attributes.
    pub attributes: Vec<MailboxAttribute>,
    /// Hierarchy delimiter.
    pub delimiter: Option<char>,
    /// Mailbox name in wire form.
    pub mailbox: Mailbox,
}

impl ListResponse {
    /// Whether the mailbox can be selected.
    #[must_use]
    pub fn selectable(&self) -> bool {
        !self
            .attributes
            .iter()
            .any(|a| matches!(a, MailboxAttribute::NoSelect))
    }
}

/// Mailbox attributes from LIST responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MailboxAttribute {
    /// Mailbox cannot be selected.
    NoSelect,
    /// Mailbox has no children.
    HasNoChildren,
    /// Mailbox has children.
    HasChildren,
    /// Mailbox is marked for attention.
    Marked,
    /// Mailbox is not marked.
    Unmarked,
    /// Any other attribute, kept verbatim.
    Unknown(String),
}

impl MailboxAttribute {
    /// Parses a mailbox attribute string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "\\NOSELECT" => Self::NoSelect,
            "\\HASNOCHILDREN" => Self::HasNoChildren,
            "\\HASCHILDREN" => Self::HasChildren,
            "\\MARKED" => Self::Marked,
            "\\UNMARKED" => Self::Unmarked,
            _ => Self::Unknown(s.to_string()),
        }
    }
}
