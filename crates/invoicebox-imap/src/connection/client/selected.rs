//! Implementation for the selected state.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::Selected;
use crate::command::{Command, SearchCriteria, StoreAction};
use crate::parser::{FetchItem, Response, ResponseParser, UntaggedResponse};
use crate::types::{Mailbox, MailboxStatus, SeqNum};
use crate::{Error, Result};

impl<S> Client<S, Selected>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Returns the currently selected mailbox.
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        self.state.mailbox()
    }

    /// Returns the mailbox status snapshot from SELECT.
    #[must_use]
    pub const fn mailbox_status(&self) -> &MailboxStatus {
        self.state.status()
    }

    /// Selects a different mailbox.
    ///
    /// The previous mailbox is implicitly closed by the server.
    pub async fn select(self, mailbox: Mailbox) -> Result<Self> {
        super::authenticated::select_on(self, mailbox).await
    }

    /// Searches for messages matching the given criteria.
    ///
    /// Returns sequence numbers in the order the server listed them.
    pub async fn search(&mut self, criteria: SearchCriteria) -> Result<Vec<SeqNum>> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::Search { criteria }.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let mut results = Vec::new();

        for response_bytes in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Search(ids))) =
                ResponseParser::parse(response_bytes)
            {
                results.extend(ids);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(results)
    }

    /// Fetches the full RFC 5322 bytes of one message.
    pub async fn fetch(&mut self, sequence: SeqNum) -> Result<Vec<u8>> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::Fetch { sequence }.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let mut body = None;

        for response_bytes in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Fetch { items, .. })) =
                ResponseParser::parse(response_bytes)
            {
                for item in items {
                    if let FetchItem::Rfc822(bytes) = item {
                        body = Some(bytes);
                    }
                }
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        body.ok_or_else(|| Error::Protocol("FETCH response missing message body".to_string()))
    }

    /// Modifies message flags silently (no FETCH echo).
    pub async fn store_silent(&mut self, sequence: SeqNum, action: StoreAction) -> Result<()> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::Store {
            sequence,
            action,
            silent: true,
        }
        .serialize(&tag);

        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        Self::check_tagged_ok(&responses, &tag)?;
        Ok(())
    }

    /// Gracefully disconnects from the server.
    pub async fn logout(mut self) -> Result<()> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::Logout.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let _ = self.read_until_tagged(&tag).await;
        Ok(())
    }
}
