//! Type-state markers for IMAP client connection states.
//!
//! These types are used with the type-state pattern to enforce valid IMAP
//! state transitions at compile time. Unlike the marker types, `Selected`
//! carries runtime state about the currently selected mailbox.

use crate::types::{Mailbox, MailboxStatus};

/// Marker type for the not-authenticated state.
///
/// In this state, only the LOGIN command is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotAuthenticated;

/// Marker type for the authenticated state.
///
/// In this state, mailbox operations (SELECT, LIST) are valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticated;

/// State for a selected mailbox.
///
/// Carries the wire-form mailbox name and the status snapshot taken from the
/// SELECT response, so callers can inspect what they are operating on.
#[derive(Debug, Clone)]
pub struct Selected {
    /// The selected mailbox, in wire form.
    pub(crate) mailbox: Mailbox,
    /// Cached mailbox status from the SELECT response.
    pub(crate) status: MailboxStatus,
}

impl Selected {
    /// Creates a new Selected state.
    #[must_use]
    pub const fn new(mailbox: Mailbox, status: MailboxStatus) -> Self {
        Self { mailbox, status }
    }

    /// Returns the selected mailbox.
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Returns true if the mailbox was opened read-only.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.status.read_only
    }

    /// Returns the mailbox status snapshot from SELECT.
    #[must_use]
    pub const fn status(&self) -> &MailboxStatus {
        &self.status
    }

    /// Returns the number of messages in the mailbox.
    #[must_use]
    pub const fn exists(&self) -> u32 {
        self.status.exists
    }

    /// Returns the number of recent messages.
    #[must_use]
    pub const fn recent(&self) -> u32 {
        self.status.recent
    }
}
