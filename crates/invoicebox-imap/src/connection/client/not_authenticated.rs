//! Implementation for the not-authenticated state.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, NotAuthenticated};
use crate::command::{Command, TagGenerator};
use crate::connection::framed::FramedStream;
use crate::parser::{Response, ResponseCode, ResponseParser, UntaggedResponse};
use crate::{Error, Result};

impl<S> Client<S, NotAuthenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new client from a connected stream.
    ///
    /// Reads the server greeting and initial capabilities. A BYE greeting
    /// means the server refused the connection and is reported as an error.
    pub async fn from_stream(stream: S) -> Result<Self> {
        let mut framed = FramedStream::new(stream);

        // Read server greeting
        let greeting = framed.read_response().await?;
        let response = ResponseParser::parse(&greeting)?;

        // Extract capabilities from greeting if present
        let mut capabilities = Vec::new();
        if let Response::Untagged(untagged) = response {
            match untagged {
                UntaggedResponse::Ok {
                    code: Some(ResponseCode::Capability(caps)),
                    ..
                }
                | UntaggedResponse::PreAuth {
                    code: Some(ResponseCode::Capability(caps)),
                    ..
                } => {
                    capabilities = caps;
                }
                UntaggedResponse::Bye { text, .. } => {
                    return Err(Error::Bye(text));
                }
                _ => {}
            }
        }

        Ok(Self {
            stream: framed,
            tag_gen: TagGenerator::default(),
            capabilities,
            state: NotAuthenticated,
        })
    }

    /// Authenticates with the server using LOGIN.
    ///
    /// Consumes self and returns an authenticated client on success. A NO
    /// reply means the server rejected the credentials and is reported as
    /// [`Error::Auth`].
    pub async fn login(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<S, Authenticated>> {
        let tag = self.tag_gen.next_tag();
        let cmd = Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
        .serialize(&tag);

        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;

        // Update capabilities if included in response
        for response_bytes in &responses {
            if let Ok(Response::Untagged(UntaggedResponse::Capability(caps))) =
                ResponseParser::parse(response_bytes)
            {
                self.capabilities = caps;
            }
        }

        match Self::check_tagged_ok(&responses, &tag) {
            Ok(()) => {}
            Err(Error::No(text)) => return Err(Error::Auth(text)),
            Err(e) => return Err(e),
        }

        Ok(Client {
            stream: self.stream,
            tag_gen: self.tag_gen,
            capabilities: self.capabilities,
            state: Authenticated,
        })
    }
}
