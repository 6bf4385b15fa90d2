//! IMAP command builder.
//!
//! Types and serialization for the commands this client sends: LOGIN, LIST,
//! SELECT, SEARCH, FETCH, STORE, and LOGOUT.

mod serialize;
mod tag_generator;

use crate::types::{Mailbox, SeqNum};

pub use tag_generator::TagGenerator;

use serialize::{write_astring, write_search_criteria, write_store_action};

/// IMAP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// LOGIN command.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// LIST command.
    List {
        /// Reference name.
        reference: String,
        /// Mailbox pattern.
        pattern: String,
    },
    /// SELECT command.
    Select {
        /// Mailbox to select, already in wire form.
        mailbox: Mailbox,
    },
    /// SEARCH command.
    Search {
        /// Search criteria.
        criteria: SearchCriteria,
    },
    /// FETCH command for one full message (RFC822).
    Fetch {
        /// Message sequence number.
        sequence: SeqNum,
    },
    /// STORE command.
    Store {
        /// Message sequence number.
        sequence: SeqNum,
        /// Store action.
        action: StoreAction,
        /// Silent mode (no FETCH echo).
        silent: bool,
    },
    /// LOGOUT command.
    Logout,
}

impl Command {
    /// Serializes the command to bytes with the given tag.
    #[must_use]
    pub fn serialize(&self, tag: &str) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(tag.as_bytes());
        buf.push(b' ');

        match self {
            Self::Login { username, password } => {
                buf.extend_from_slice(b"LOGIN ");
                write_astring(&mut buf, username);
                buf.push(b' ');
                write_astring(&mut buf, password);
            }

            Self::List { reference, pattern } => {
                buf.extend_from_slice(b"LIST ");
                write_astring(&mut buf, reference);
                buf.push(b' ');
                write_astring(&mut buf, pattern);
            }

            Self::Select { mailbox } => {
                buf.extend_from_slice(b"SELECT ");
                write_astring(&mut buf, mailbox.as_str());
            }

            Self::Search { criteria } => {
                buf.extend_from_slice(b"SEARCH ");
                write_search_criteria(&mut buf, criteria);
            }

            Self::Fetch { sequence } => {
                buf.extend_from_slice(b"FETCH ");
                buf.extend_from_slice(sequence.to_string().as_bytes());
                buf.extend_from_slice(b" (RFC822)");
            }

            Self::Store {
                sequence,
                action,
                silent,
            } => {
                buf.extend_from_slice(b"STORE ");
                buf.extend_from_slice(sequence.to_string().as_bytes());
                buf.push(b' ');
                write_store_action(&mut buf, action, *silent);
            }

            Self::Logout => buf.extend_from_slice(b"LOGOUT"),
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}

/// SEARCH criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Messages without the `\Seen` flag.
    Unseen,
    /// Messages received since the given date (`d-Mon-yyyy`).
    Since(String),
    /// All criteria must match (IMAP joins them with spaces).
    And(Vec<SearchCriteria>),
}

/// STORE flag actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replace all flags.
    SetFlags(Vec<String>),
    /// Add flags.
    AddFlags(Vec<String>),
    /// Remove flags.
    RemoveFlags(Vec<String>),
}

impl StoreAction {
    /// Action adding the `\Seen` flag.
    #[must_use]
    pub fn mark_seen() -> Self {
        Self::AddFlags(vec!["\\Seen".to_string()])
    }
}
