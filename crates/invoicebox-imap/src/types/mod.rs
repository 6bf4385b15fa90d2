//! Core IMAP types.
//!
//! Fundamental types shared by the command builder, the response parser, and
//! the session layer: command tags, message sequence numbers, and mailbox
//! descriptions.

#![allow(clippy::missing_const_for_fn)]

mod identifiers;
mod mailbox;

pub use identifiers::{SeqNum, Tag};
pub use mailbox::{ListResponse, Mailbox, MailboxAttribute, MailboxFolder, MailboxStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_num_new() {
        assert!(SeqNum::new(0).is_none());
        assert!(SeqNum::new(1).is_some());
        assert_eq!(SeqNum::new(42).unwrap().get(), 42);
    }

    #[test]
    fn test_mailbox_attribute_parse() {
        assert_eq!(
            MailboxAttribute::parse("\\NoSelect"),
            MailboxAttribute::NoSelect
        );
        assert_eq!(
            MailboxAttribute::parse("\\HasChildren"),
            MailboxAttribute::HasChildren
        );
    }

    #[test]
    fn test_folder_from_wire() {
        let folder = MailboxFolder::from_wire("Entw&APw-rfe", true);
        assert_eq!(folder.name, "Entw\u{fc}rfe");
        assert_eq!(folder.wire_name, "Entw&APw-rfe");
        assert!(folder.selectable);
    }
}
