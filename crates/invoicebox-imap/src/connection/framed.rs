//! Framed I/O for the IMAP protocol.
//!
//! IMAP responses are CRLF-terminated lines that may embed literals of the
//! form `{n}\r\n<n bytes>`. This module provides buffered reading that
//! reassembles a complete response, and buffered command writing.

#![allow(clippy::missing_errors_doc)]

use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::Result;

/// Default buffer size for reading.
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Maximum line length to prevent memory exhaustion.
const MAX_LINE_LENGTH: usize = 1024 * 1024; // 1 MB

/// Maximum literal size to prevent memory exhaustion. Full messages arrive
/// as one literal, so this bounds the largest acceptable email.
const MAX_LITERAL_SIZE: usize = 64 * 1024 * 1024; // 64 MB

/// Framed connection for the IMAP protocol.
pub struct FramedStream<S> {
    reader: BufReader<S>,
    write_buffer: BytesMut,
}

impl<S> FramedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new framed stream.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, stream),
            write_buffer: BytesMut::with_capacity(DEFAULT_BUFFER_SIZE),
        }
    }

    /// Reads one complete response, literals included.
    ///
    /// A line ending in `{n}` announces n literal bytes followed by the
    /// continuation of the same response, so reading loops until a line
    /// without a trailing literal marker.
    pub async fn read_response(&mut self) -> Result<Vec<u8>> {
        let mut response = Vec::new();

        loop {
            let line = self.read_line().await?;
            response.extend_from_slice(&line);

            if let Some(literal_len) = parse_literal_length(&line) {
                if literal_len > MAX_LITERAL_SIZE {
                    return Err(crate::Error::Protocol(format!(
                        "literal too large: {literal_len} bytes (max {MAX_LITERAL_SIZE})"
                    )));
                }
                let mut literal = vec![0u8; literal_len];
                self.reader.read_exact(&mut literal).await?;
                response.extend_from_slice(&literal);
            } else {
                break;
            }
        }

        Ok(response)
    }

    /// Reads a single CRLF-terminated line.
    async fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();

        loop {
            let buf = self.reader.fill_buf().await?;
            if buf.is_empty() {
                return Err(crate::Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed",
                )));
            }

            if let Some(pos) = find_crlf(buf) {
                line.extend_from_slice(&buf[..pos + 2]);
                self.reader.consume(pos + 2);
                break;
            }

            let len = buf.len();
            line.extend_from_slice(buf);
            self.reader.consume(len);

            if line.len() > MAX_LINE_LENGTH {
                return Err(crate::Error::Protocol("line too long".to_string()));
            }
        }

        Ok(line)
    }

    /// Writes a command to the stream.
    pub async fn write_command(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer.clear();
        self.write_buffer.extend_from_slice(data);

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buffer).await?;
        stream.flush().await?;

        Ok(())
    }
}

/// Finds the position of CRLF in a buffer.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Parses a literal length from the end of a line, matching `{123}\r\n`.
///
/// Servers only send synchronizing literals, so the `{123+}` form never
/// appears here.
fn parse_literal_length(line: &[u8]) -> Option<usize> {
    if !line.ends_with(b"\r\n") {
        return None;
    }

    let line = &line[..line.len() - 2];
    if !line.ends_with(b"}") {
        return None;
    }

    let open = line.iter().rposition(|&b| b == b'{')?;
    let num_str = std::str::from_utf8(&line[open + 1..line.len() - 1]).ok()?;
    num_str.parse().ok()
}

/// Accumulates responses until the tagged completion for one command.
pub struct ResponseAccumulator {
    tag: String,
    responses: Vec<Vec<u8>>,
}

impl ResponseAccumulator {
    /// Creates a new response accumulator for the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            responses: Vec::new(),
        }
    }

    /// Reads responses until one starts with our tag followed by a space.
    pub async fn read_until_tagged<S>(
        &mut self,
        framed: &mut FramedStream<S>,
    ) -> Result<Vec<Vec<u8>>>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        loop {
            let response = framed.read_response().await?;

            let is_tagged = response
                .get(..self.tag.len())
                .is_some_and(|prefix| prefix == self.tag.as_bytes())
                && response.get(self.tag.len()).is_some_and(|&b| b == b' ');

            self.responses.push(response);

            if is_tagged {
                break;
            }
        }

        Ok(std::mem::take(&mut self.responses))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_find_crlf() {
        assert_eq!(find_crlf(b"hello\r\n"), Some(5));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"no newline"), None);
        assert_eq!(find_crlf(b"just\n"), None);
    }

    #[test]
    fn test_parse_literal_length() {
        assert_eq!(parse_literal_length(b"RFC822 {123}\r\n"), Some(123));
        assert_eq!(parse_literal_length(b"{0}\r\n"), Some(0));
        assert_eq!(parse_literal_length(b"{999999}\r\n"), Some(999_999));
        assert_eq!(parse_literal_length(b"no literal\r\n"), None);
        assert_eq!(parse_literal_length(b"incomplete {123"), None);
        assert_eq!(parse_literal_length(b"wrong {abc}\r\n"), None);
    }

    #[tokio::test]
    async fn test_read_simple_line() {
        use tokio_test::io::Builder;

        let mock = Builder::new().read(b"* OK ready\r\n").build();
        let mut framed = FramedStream::new(mock);

        let response = framed.read_response().await.unwrap();
        assert_eq!(response, b"* OK ready\r\n");
    }

    #[tokio::test]
    async fn test_read_with_literal() {
        use tokio_test::io::Builder;

        let mock = Builder::new()
            .read(b"* 1 FETCH (RFC822 {5}\r\n")
            .read(b"hello)\r\n")
            .build();
        let mut framed = FramedStream::new(mock);

        let response = framed.read_response().await.unwrap();
        assert_eq!(response, b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n");
    }

    #[tokio::test]
    async fn test_read_split_across_chunks() {
        use tokio_test::io::Builder;

        let mock = Builder::new()
            .read(b"* OK par")
            .read(b"tial line\r\n")
            .build();
        let mut framed = FramedStream::new(mock);

        let response = framed.read_response().await.unwrap();
        assert_eq!(response, b"* OK partial line\r\n");
    }

    #[tokio::test]
    async fn test_write_command() {
        use tokio_test::io::Builder;

        let mock = Builder::new().write(b"A001 LOGIN user pass\r\n").build();
        let mut framed = FramedStream::new(mock);

        framed
            .write_command(b"A001 LOGIN user pass\r\n")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_eof_is_an_error() {
        use tokio_test::io::Builder;

        let mock = Builder::new().build();
        let mut framed = FramedStream::new(mock);

        assert!(framed.read_response().await.is_err());
    }

    #[tokio::test]
    async fn test_accumulator_collects_until_tag() {
        use tokio_test::io::Builder;

        let mock = Builder::new()
            .read(b"* SEARCH 2 5\r\n")
            .read(b"A003 OK SEARCH completed\r\n")
            .build();

        let mut framed = FramedStream::new(mock);
        let mut accumulator = ResponseAccumulator::new("A003");

        let responses = accumulator.read_until_tagged(&mut framed).await.unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0], b"* SEARCH 2 5\r\n");
        assert_eq!(responses[1], b"A003 OK SEARCH completed\r\n");
    }

    #[tokio::test]
    async fn test_accumulator_ignores_tag_prefix_of_longer_tag() {
        use tokio_test::io::Builder;

        let mock = Builder::new()
            .read(b"A0011 OK other command\r\n")
            .read(b"A001 OK ours\r\n")
            .build();

        let mut framed = FramedStream::new(mock);
        let mut accumulator = ResponseAccumulator::new("A001");

        let responses = accumulator.read_until_tagged(&mut framed).await.unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1], b"A001 OK ours\r\n");
    }
}
