//! Implementation for the authenticated state.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, Selected};
use crate::command::Command;
use crate::parser::{Response, ResponseCode, ResponseParser, UntaggedResponse};
use crate::types::{ListResponse, Mailbox, MailboxStatus};
use crate::{Error, Result};

impl<S> Client<S, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Selects a mailbox for read-write access.
    ///
    /// The mailbox must already be in wire form; use [`Mailbox::from_display`]
    /// to encode a human-readable name. Consumes self and returns a selected
    /// client on success. A NO reply is reported as [`Error::FolderNotFound`]
    /// with the display name of the mailbox.
    pub async fn select(self, mailbox: Mailbox) -> Result<Client<S, Selected>> {
        select_on(self, mailbox).await
    }

    /// Lists mailboxes matching a pattern.
    pub async fn list(&mut self, reference: &str, pattern: &str) -> Result<Vec<ListResponse>> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::List {
            reference: reference.to_string(),
            pattern: pattern.to_string(),
        }
        .serialize(&tag);

        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let mut list_responses = Vec::new();

        for response_bytes in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::List(item))) =
                ResponseParser::parse(response_bytes)
            {
                list_responses.push(item);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        Ok(list_responses)
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

/// Issues SELECT and builds the selected-state client.
///
/// Shared between the authenticated and selected states, since SELECT from
/// either state lands in the same place.
pub(super) async fn select_on<S, State>(
    mut client: Client<S, State>,
    mailbox: Mailbox,
) -> Result<Client<S, Selected>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let tag = client.tag_gen.next_tag();
    let cmd = Command::Select {
        mailbox: mailbox.clone(),
    }
    .serialize(&tag);

    client.stream.write_command(&cmd).await?;

    let responses = client.read_until_tagged(&tag).await?;
    let status = parse_mailbox_status(&responses);
    match Client::<S, State>::check_tagged_ok(&responses, &tag) {
        Ok(()) => {}
        Err(Error::No(_)) => return Err(Error::FolderNotFound(mailbox.display_name())),
        Err(e) => return Err(e),
    }

    Ok(Client {
        stream: client.stream,
        tag_gen: client.tag_gen,
        capabilities: client.capabilities,
        state: Selected::new(mailbox, status),
    })
}

/// Parses mailbox status from SELECT responses.
fn parse_mailbox_status(responses: &[Vec<u8>]) -> MailboxStatus {
    let mut status = MailboxStatus::default();

    for response_bytes in responses {
        match ResponseParser::parse(response_bytes) {
            Ok(Response::Untagged(untagged)) => match untagged {
                UntaggedResponse::Exists(n) => status.exists = n,
                UntaggedResponse::Recent(n) => status.recent = n,
                UntaggedResponse::Flags(flags) => status.flags = flags,
                UntaggedResponse::Ok {
                    code: Some(code), ..
                } => match code {
                    ResponseCode::UidValidity(v) => {
                        status.uid_validity = Some(v);
                    }
                    ResponseCode::UidNext(v) => {
                        status.uid_next = Some(v);
                    }
                    ResponseCode::Unseen(v) => {
                        status.unseen = Some(v);
                    }
                    _ => {}
                },
                _ => {}
            },
            Ok(Response::Tagged {
                code: Some(ResponseCode::ReadOnly),
                ..
            }) => {
                status.read_only = true;
            }
            _ => {}
        }
    }

    status
}
