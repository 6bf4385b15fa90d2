//! Core IMAP identifiers.
//!
//! Types for command tags and message sequence numbers.

use std::num::NonZeroU32;

/// IMAP command tag.
///
/// Tags are alphanumeric prefixes that identify commands and their responses.
/// Each command sent by the client has a unique tag, and the server's response
/// includes the same tag to correlate request and response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    /// Creates a new tag from a string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message sequence number.
///
/// Sequence numbers are assigned to messages in a mailbox starting from 1.
/// They are ephemeral and change when messages are expunged, which is fine
/// for a fetch-and-mark ingestion pass that holds one selected mailbox for
/// its whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqNum(pub NonZeroU32);

impl SeqNum {
    /// Creates a new sequence number.
    ///
    /// Returns `None` if the value is 0.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for SeqNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod tag_tests {
        use super::*;

        #[test]
        fn new_from_str() {
            let tag = Tag::new("A001");
            assert_eq!(tag.as_str(), "A001");
        }

        #[test]
        fn display() {
            let tag = Tag::new("A042");
            assert_eq!(format!("{tag}"), "A042");
        }

        #[test]
        fn equality() {
            assert_eq!(Tag::new("A001"), Tag::new("A001"));
            assert_ne!(Tag::new("A001"), Tag::new("A002"));
        }
    }

    mod seq_num_tests {
        use super::*;

        #[test]
        fn new_valid() {
            let seq = SeqNum::new(1);
            assert!(seq.is_some());
            assert_eq!(seq.unwrap().get(), 1);
        }

        #[test]
        fn new_zero_returns_none() {
            assert!(SeqNum::new(0).is_none());
        }

        #[test]
        fn display() {
            let seq = SeqNum::new(42).unwrap();
            assert_eq!(format!("{seq}"), "42");
        }

        #[test]
        fn ordering() {
            let seq1 = SeqNum::new(1).unwrap();
            let seq2 = SeqNum::new(2).unwrap();
            assert!(seq1 < seq2);
        }
    }
}
