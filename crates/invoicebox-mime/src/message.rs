//! MIME message structure and parsing.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64, decode_header, decode_quoted_printable};
use crate::error::{Error, Result};
use crate::header::Headers;

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit binary.
    EightBit,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
    /// Binary (no encoding).
    Binary,
}

impl TransferEncoding {
    /// Parses transfer encoding from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "8bit" => Self::EightBit,
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            "binary" => Self::Binary,
            _ => Self::SevenBit, // Default (includes "7bit")
        }
    }
}

/// One leaf part of a MIME message: its headers and raw (still encoded) body.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body, exactly as transmitted.
    pub body: Vec<u8>,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Gets the content type, defaulting to `text/plain` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type header is present but malformed.
    pub fn content_type(&self) -> Result<ContentType> {
        self.headers
            .get("content-type")
            .map_or_else(|| Ok(ContentType::text_plain()), ContentType::parse)
    }

    /// Gets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.headers
            .get("content-transfer-encoding")
            .map_or(TransferEncoding::SevenBit, TransferEncoding::parse)
    }

    /// Decodes the body according to the transfer encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid under its declared encoding.
    pub fn decode_body(&self) -> Result<Vec<u8>> {
        match self.transfer_encoding() {
            TransferEncoding::Base64 => decode_base64(&String::from_utf8_lossy(&self.body)),
            TransferEncoding::QuotedPrintable => {
                decode_quoted_printable(&String::from_utf8_lossy(&self.body))
            }
            _ => Ok(self.body.clone()),
        }
    }

    /// Returns the part's filename, if any, with RFC 2047 encoded words
    /// decoded.
    ///
    /// Checks the `Content-Disposition` `filename` parameter first, then the
    /// `Content-Type` `name` parameter older mailers use.
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        let raw = self
            .headers
            .get("content-disposition")
            .and_then(|value| parameter(value, "filename"))
            .or_else(|| {
                self.headers
                    .get("content-type")
                    .and_then(|value| parameter(value, "name"))
            })?;
        Some(decode_header(&raw))
    }

    /// Checks whether this part carries an attachment.
    ///
    /// True for an explicit `Content-Disposition: attachment`, and for any
    /// other disposition (e.g. `inline`) that names a file.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        let Some(disposition) = self.headers.get("content-disposition") else {
            return false;
        };
        let kind = disposition.split(';').next().unwrap_or(disposition).trim();
        kind.eq_ignore_ascii_case("attachment") || self.filename().is_some()
    }
}

/// A parsed MIME message: the top-level headers plus the leaf parts of the
/// MIME tree, flattened in traversal order.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message headers.
    pub headers: Headers,
    /// Leaf parts in MIME-tree order. A single-part message yields one part
    /// whose headers are the message headers.
    pub parts: Vec<Part>,
}

impl Message {
    /// Parses a raw RFC 822 message.
    ///
    /// Nested multipart sections are walked iteratively with an explicit
    /// stack; only leaf parts are kept. Structural anomalies degrade rather
    /// than fail: a multipart without a usable boundary becomes an opaque
    /// leaf, and a part with an unparseable content type is treated as
    /// `text/plain`.
    ///
    /// # Errors
    ///
    /// Returns an error only for empty input.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::Parse("Empty message".to_string()));
        }

        let (header_bytes, body) = split_at_blank_line(raw);
        let headers = Headers::parse(&String::from_utf8_lossy(header_bytes));

        let mut parts = Vec::new();
        let mut stack = vec![Part::new(headers.clone(), body.to_vec())];

        while let Some(part) = stack.pop() {
            let content_type = part
                .content_type()
                .unwrap_or_else(|_| ContentType::text_plain());
            if content_type.is_multipart()
                && let Some(boundary) = content_type.boundary()
            {
                let children = split_multipart(&part.body, boundary);
                if children.is_empty() {
                    parts.push(part);
                } else {
                    stack.extend(children.into_iter().rev());
                }
            } else {
                parts.push(part);
            }
        }

        Ok(Self { headers, parts })
    }

    /// Gets the Subject header, undecoded.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.headers.get("subject")
    }

    /// Gets the From header, undecoded.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.headers.get("from")
    }

    /// Gets the Date header.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.headers.get("date")
    }

    /// Gets the Message-ID header.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.headers.get("message-id")
    }

    /// Iterates over the parts that carry attachments.
    pub fn attachments(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|part| part.is_attachment())
    }
}

/// Extracts a `key=value` parameter from a structured header value such as
/// `attachment; filename="invoice.pdf"`.
fn parameter(header_value: &str, name: &str) -> Option<String> {
    header_value.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// Splits a raw message or part into its header block and body at the first
/// blank line. Without a blank line the whole input is the header block.
fn split_at_blank_line(raw: &[u8]) -> (&[u8], &[u8]) {
    if let Some(rest) = raw.strip_prefix(b"\r\n") {
        return (&[], rest);
    }
    if let Some(rest) = raw.strip_prefix(b"\n") {
        return (&[], rest);
    }
    if let Some(pos) = find_subslice(raw, b"\r\n\r\n") {
        (&raw[..pos], &raw[pos + 4..])
    } else if let Some(pos) = find_subslice(raw, b"\n\n") {
        (&raw[..pos], &raw[pos + 2..])
    } else {
        (raw, &[])
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits a multipart body at its `--boundary` delimiter lines (RFC 2046
/// section 5.1.1) and parses each enclosed section. The preamble before the
/// first delimiter and the epilogue after `--boundary--` are discarded. A
/// missing close delimiter is tolerated; the final section runs to the end of
/// the body.
fn split_multipart(body: &[u8], boundary: &str) -> Vec<Part> {
    let delimiter = format!("--{boundary}").into_bytes();
    let mut sections: Vec<(usize, usize)> = Vec::new();
    let mut section_start: Option<usize> = None;
    let mut line_start = 0;

    while line_start < body.len() {
        let line_end = body[line_start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(body.len(), |i| line_start + i);
        let line = &body[line_start..line_end];
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if line.starts_with(&delimiter) {
            if let Some(start) = section_start.take() {
                let end = delimiter_line_prefix(body, line_start).max(start);
                sections.push((start, end));
            }
            if line[delimiter.len()..].starts_with(b"--") {
                break;
            }
            section_start = Some((line_end + 1).min(body.len()));
        }

        line_start = line_end + 1;
    }

    if let Some(start) = section_start {
        sections.push((start, body.len()));
    }

    sections
        .into_iter()
        .filter_map(|(start, end)| parse_section(&body[start..end]))
        .collect()
}

/// The line ending before a delimiter line belongs to the delimiter, not to
/// the preceding part (RFC 2046 section 5.1.1).
fn delimiter_line_prefix(body: &[u8], line_start: usize) -> usize {
    let mut end = line_start;
    if end > 0 && body[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && body[end - 1] == b'\r' {
            end -= 1;
        }
    }
    end
}

fn parse_section(raw: &[u8]) -> Option<Part> {
    if raw.is_empty() {
        return None;
    }
    let (header_bytes, body) = split_at_blank_line(raw);
    let headers = Headers::parse(&String::from_utf8_lossy(header_bytes));
    Some(Part::new(headers, body.to_vec()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // "%PDF-1.4\n"
    const PDF_BASE64: &str = "JVBERi0xLjQK";

    fn invoice_email() -> Vec<u8> {
        concat!(
            "From: billing@vendor.example\r\n",
            "To: fleet@example.com\r\n",
            "Subject: Invoice 4711\r\n",
            "Message-ID: <4711@vendor.example>\r\n",
            "Date: Mon, 3 Jun 2024 10:15:00 +0300\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/mixed; boundary=\"outer\"\r\n",
            "\r\n",
            "This is a multi-part message in MIME format.\r\n",
            "--outer\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Invoice attached.\r\n",
            "--outer\r\n",
            "Content-Type: application/pdf; name=\"invoice-4711.pdf\"\r\n",
            "Content-Transfer-Encoding: base64\r\n",
            "Content-Disposition: attachment; filename=\"invoice-4711.pdf\"\r\n",
            "\r\n",
            "JVBERi0xLjQK\r\n",
            "--outer--\r\n"
        )
        .as_bytes()
        .to_vec()
    }

    mod transfer_encoding_tests {
        use super::*;

        #[test]
        fn test_parse() {
            assert_eq!(TransferEncoding::parse("7bit"), TransferEncoding::SevenBit);
            assert_eq!(TransferEncoding::parse("8BIT"), TransferEncoding::EightBit);
            assert_eq!(TransferEncoding::parse("base64"), TransferEncoding::Base64);
            assert_eq!(
                TransferEncoding::parse(" quoted-printable "),
                TransferEncoding::QuotedPrintable
            );
            assert_eq!(TransferEncoding::parse("binary"), TransferEncoding::Binary);
            assert_eq!(TransferEncoding::parse("x-unknown"), TransferEncoding::SevenBit);
        }
    }

    mod part_tests {
        use super::*;

        fn part_with(headers: &[(&str, &str)], body: &[u8]) -> Part {
            let mut h = Headers::new();
            for (name, value) in headers {
                h.add(*name, *value);
            }
            Part::new(h, body.to_vec())
        }

        #[test]
        fn test_content_type_defaults_to_text_plain() {
            let part = part_with(&[], b"hello");
            assert_eq!(part.content_type().unwrap().to_string(), "text/plain");
        }

        #[test]
        fn test_decode_body_base64() {
            let part = part_with(
                &[("Content-Transfer-Encoding", "base64")],
                PDF_BASE64.as_bytes(),
            );
            assert_eq!(part.decode_body().unwrap(), b"%PDF-1.4\n");
        }

        #[test]
        fn test_decode_body_quoted_printable() {
            let part = part_with(
                &[("Content-Transfer-Encoding", "quoted-printable")],
                b"caf=C3=A9",
            );
            assert_eq!(part.decode_body().unwrap(), "café".as_bytes());
        }

        #[test]
        fn test_decode_body_passthrough() {
            let part = part_with(&[], b"as-is");
            assert_eq!(part.decode_body().unwrap(), b"as-is");
        }

        #[test]
        fn test_is_attachment_explicit_disposition() {
            let part = part_with(&[("Content-Disposition", "attachment")], b"");
            assert!(part.is_attachment());
        }

        #[test]
        fn test_is_attachment_inline_with_filename() {
            let part = part_with(
                &[("Content-Disposition", "inline; filename=\"scan.pdf\"")],
                b"",
            );
            assert!(part.is_attachment());
        }

        #[test]
        fn test_is_attachment_inline_without_filename() {
            let part = part_with(&[("Content-Disposition", "inline")], b"");
            assert!(!part.is_attachment());
        }

        #[test]
        fn test_is_attachment_requires_disposition_header() {
            let part = part_with(
                &[("Content-Type", "application/pdf; name=\"invoice.pdf\"")],
                b"",
            );
            assert!(!part.is_attachment());
        }

        #[test]
        fn test_filename_from_content_type_name() {
            let part = part_with(
                &[
                    ("Content-Type", "application/pdf; name=\"invoice.pdf\""),
                    ("Content-Disposition", "inline"),
                ],
                b"",
            );
            assert_eq!(part.filename().unwrap(), "invoice.pdf");
            assert!(part.is_attachment());
        }

        #[test]
        fn test_filename_decodes_rfc2047() {
            let part = part_with(
                &[(
                    "Content-Disposition",
                    "attachment; filename=\"=?utf-8?B?15fXqdeR15XXoNeZ15XXqg==?=.pdf\"",
                )],
                b"",
            );
            assert_eq!(part.filename().unwrap(), "חשבוניות.pdf");
        }
    }

    mod message_tests {
        use super::*;

        #[test]
        fn test_parse_single_part() {
            let raw = concat!(
                "From: sender@example.com\r\n",
                "Subject: Test\r\n",
                "Content-Type: text/plain\r\n",
                "\r\n",
                "Hello, World!\r\n"
            );

            let message = Message::parse(raw.as_bytes()).unwrap();
            assert_eq!(message.subject(), Some("Test"));
            assert_eq!(message.from(), Some("sender@example.com"));
            assert_eq!(message.parts.len(), 1);
            assert_eq!(message.parts[0].body, b"Hello, World!\r\n");
            assert_eq!(message.attachments().count(), 0);
        }

        #[test]
        fn test_parse_empty_message() {
            assert!(Message::parse(b"").is_err());
        }

        #[test]
        fn test_parse_headers_only() {
            let message = Message::parse(b"Subject: nothing else\r\n\r\n").unwrap();
            assert_eq!(message.subject(), Some("nothing else"));
            assert_eq!(message.parts.len(), 1);
            assert!(message.parts[0].body.is_empty());
        }

        #[test]
        fn test_parse_multipart_invoice() {
            let message = Message::parse(&invoice_email()).unwrap();
            assert_eq!(message.subject(), Some("Invoice 4711"));
            assert_eq!(message.message_id(), Some("<4711@vendor.example>"));
            assert_eq!(message.parts.len(), 2);

            let attachments: Vec<_> = message.attachments().collect();
            assert_eq!(attachments.len(), 1);
            assert_eq!(attachments[0].filename().unwrap(), "invoice-4711.pdf");
            assert_eq!(attachments[0].decode_body().unwrap(), b"%PDF-1.4\n");
            assert_eq!(
                attachments[0].content_type().unwrap().to_string(),
                "application/pdf"
            );
        }

        #[test]
        fn test_parse_nested_multipart_keeps_leaf_order() {
            let raw = concat!(
                "Subject: nested\r\n",
                "Content-Type: multipart/mixed; boundary=\"outer\"\r\n",
                "\r\n",
                "--outer\r\n",
                "Content-Type: multipart/alternative; boundary=\"inner\"\r\n",
                "\r\n",
                "--inner\r\n",
                "Content-Type: text/plain\r\n",
                "\r\n",
                "plain body\r\n",
                "--inner\r\n",
                "Content-Type: text/html\r\n",
                "\r\n",
                "<p>html body</p>\r\n",
                "--inner--\r\n",
                "--outer\r\n",
                "Content-Type: text/csv\r\n",
                "Content-Disposition: attachment; filename=\"rows.csv\"\r\n",
                "\r\n",
                "id,amount\r\n",
                "--outer--\r\n"
            );

            let message = Message::parse(raw.as_bytes()).unwrap();
            let types: Vec<String> = message
                .parts
                .iter()
                .map(|p| p.content_type().unwrap().to_string())
                .collect();
            assert_eq!(types, ["text/plain", "text/html", "text/csv"]);

            let attachments: Vec<_> = message.attachments().collect();
            assert_eq!(attachments.len(), 1);
            assert_eq!(attachments[0].filename().unwrap(), "rows.csv");
        }

        #[test]
        fn test_parse_missing_close_delimiter() {
            let raw = concat!(
                "Content-Type: multipart/mixed; boundary=b\r\n",
                "\r\n",
                "--b\r\n",
                "Content-Disposition: attachment; filename=\"a.csv\"\r\n",
                "\r\n",
                "id\r\n"
            );

            let message = Message::parse(raw.as_bytes()).unwrap();
            assert_eq!(message.parts.len(), 1);
            assert_eq!(message.parts[0].filename().unwrap(), "a.csv");
            assert_eq!(message.parts[0].body, b"id\r\n");
        }

        #[test]
        fn test_parse_multipart_without_boundary_degrades() {
            let raw = concat!(
                "Content-Type: multipart/mixed\r\n",
                "\r\n",
                "opaque body\r\n"
            );

            let message = Message::parse(raw.as_bytes()).unwrap();
            assert_eq!(message.parts.len(), 1);
            assert_eq!(message.parts[0].body, b"opaque body\r\n");
            assert_eq!(message.attachments().count(), 0);
        }

        #[test]
        fn test_parse_preamble_and_epilogue_discarded() {
            let raw = concat!(
                "Content-Type: multipart/mixed; boundary=b\r\n",
                "\r\n",
                "preamble to ignore\r\n",
                "--b\r\n",
                "Content-Type: text/plain\r\n",
                "\r\n",
                "kept\r\n",
                "--b--\r\n",
                "epilogue to ignore\r\n"
            );

            let message = Message::parse(raw.as_bytes()).unwrap();
            assert_eq!(message.parts.len(), 1);
            assert_eq!(message.parts[0].body, b"kept");
        }

        #[test]
        fn test_parse_malformed_content_type_degrades_to_leaf() {
            let raw = concat!("Content-Type: garbage\r\n", "\r\n", "body\r\n");
            let message = Message::parse(raw.as_bytes()).unwrap();
            assert_eq!(message.parts.len(), 1);
        }
    }
}
