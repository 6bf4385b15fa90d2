//! IMAP response parser.
//!
//! Builds structured responses from lexed tokens. The grammar subset covers
//! the responses an ingestion client sees: greetings, tagged completions,
//! LIST/SEARCH/FETCH data, and the mailbox counters SELECT reports.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_continue)]

use crate::parser::lexer::{Lexer, Token};
use crate::types::{ListResponse, Mailbox, MailboxAttribute, SeqNum, Tag};
use crate::{Error, Result};

/// Status of a tagged or condition response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Success.
    Ok,
    /// Operational failure.
    No,
    /// Protocol-level rejection.
    Bad,
    /// Greeting for a pre-authenticated connection.
    PreAuth,
    /// Server is closing the connection.
    Bye,
}

impl Status {
    /// Returns true for `OK` and `PREAUTH`.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok | Self::PreAuth)
    }
}

/// Response code carried in brackets after a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// Mailbox opened read-only.
    ReadOnly,
    /// Mailbox opened read-write.
    ReadWrite,
    /// Next UID to be assigned.
    UidNext(u32),
    /// UIDVALIDITY value.
    UidValidity(u32),
    /// First unseen message.
    Unseen(SeqNum),
    /// Flags that can be stored permanently.
    PermanentFlags(Vec<String>),
    /// Capability list.
    Capability(Vec<String>),
    /// Anything else, kept verbatim.
    Unknown(String),
}

/// Untagged server data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntaggedResponse {
    /// `* OK` condition, possibly with a code.
    Ok {
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// `* NO` condition.
    No {
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// `* BAD` condition.
    Bad {
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// `* PREAUTH` greeting.
    PreAuth {
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// `* BYE` notice.
    Bye {
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// Capability list.
    Capability(Vec<String>),
    /// Flags applicable in the selected mailbox.
    Flags(Vec<String>),
    /// One LIST line.
    List(ListResponse),
    /// SEARCH result sequence numbers.
    Search(Vec<SeqNum>),
    /// Message count.
    Exists(u32),
    /// Recent message count.
    Recent(u32),
    /// A message was expunged.
    Expunge(SeqNum),
    /// FETCH data for one message.
    Fetch {
        /// Message sequence number.
        seq: SeqNum,
        /// Fetched items.
        items: Vec<FetchItem>,
    },
}

/// One item inside a FETCH response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchItem {
    /// Full message bytes.
    Rfc822(Vec<u8>),
    /// Message size in bytes.
    Rfc822Size(u32),
    /// Message flags.
    Flags(Vec<String>),
    /// Message UID.
    Uid(u32),
    /// Server-recorded arrival date.
    InternalDate(String),
}

/// A parsed IMAP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Tagged response (command completion).
    Tagged {
        /// The command tag.
        tag: Tag,
        /// Response status.
        status: Status,
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// Untagged response (server data).
    Untagged(UntaggedResponse),
    /// Continuation request.
    Continuation {
        /// Optional text.
        text: Option<String>,
    },
}

/// Response parser.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a complete response (one line, literals already inlined).
    pub fn parse(input: &[u8]) -> Result<Response> {
        let mut lexer = Lexer::new(input);

        match lexer.next_token()? {
            Token::Asterisk => Self::parse_untagged(&mut lexer),
            Token::Plus => Self::parse_continuation(&mut lexer),
            Token::Atom(tag) => Self::parse_tagged(&mut lexer, tag),
            token => Err(Error::Parse {
                position: 0,
                message: format!("Expected *, +, or tag, got {token:?}"),
            }),
        }
    }

    /// Parses a tagged response.
    fn parse_tagged(lexer: &mut Lexer<'_>, tag_str: &str) -> Result<Response> {
        lexer.expect_space()?;

        let status = Self::parse_status(lexer)?;
        let (code, text) = parse_status_tail(lexer)?;

        Ok(Response::Tagged {
            tag: Tag::new(tag_str),
            status,
            code,
            text,
        })
    }

    /// Parses an untagged response.
    fn parse_untagged(lexer: &mut Lexer<'_>) -> Result<Response> {
        lexer.expect_space()?;

        let token = lexer.next_token()?;

        match token {
            Token::Atom(s) => {
                let upper = s.to_uppercase();
                match upper.as_str() {
                    "OK" => {
                        let (code, text) = parse_status_tail(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Ok { code, text }))
                    }
                    "NO" => {
                        let (code, text) = parse_status_tail(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::No { code, text }))
                    }
                    "BAD" => {
                        let (code, text) = parse_status_tail(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Bad { code, text }))
                    }
                    "PREAUTH" => {
                        let (code, text) = parse_status_tail(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::PreAuth { code, text }))
                    }
                    "BYE" => {
                        let (code, text) = parse_status_tail(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Bye { code, text }))
                    }
                    "CAPABILITY" => {
                        let caps = parse_capability_data(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Capability(caps)))
                    }
                    "FLAGS" => {
                        lexer.expect_space()?;
                        let flags = parse_flag_list(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Flags(flags)))
                    }
                    "LIST" => {
                        lexer.expect_space()?;
                        let list = parse_list_response(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::List(list)))
                    }
                    "SEARCH" => {
                        let nums = parse_search_response(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Search(nums)))
                    }
                    _ => Err(Error::Parse {
                        position: lexer.position(),
                        message: format!("Unknown untagged response: {s}"),
                    }),
                }
            }
            Token::Number(n) => {
                lexer.expect_space()?;
                let keyword = lexer.read_atom_string()?;
                let upper = keyword.to_uppercase();

                match upper.as_str() {
                    "EXISTS" => Ok(Response::Untagged(UntaggedResponse::Exists(n))),
                    "RECENT" => Ok(Response::Untagged(UntaggedResponse::Recent(n))),
                    "EXPUNGE" => {
                        let seq = SeqNum::new(n).ok_or_else(|| Error::Parse {
                            position: lexer.position(),
                            message: "Invalid sequence number 0".to_string(),
                        })?;
                        Ok(Response::Untagged(UntaggedResponse::Expunge(seq)))
                    }
                    "FETCH" => {
                        let seq = SeqNum::new(n).ok_or_else(|| Error::Parse {
                            position: lexer.position(),
                            message: "Invalid sequence number 0".to_string(),
                        })?;
                        lexer.expect_space()?;
                        let items = parse_fetch_items(lexer)?;
                        Ok(Response::Untagged(UntaggedResponse::Fetch { seq, items }))
                    }
                    _ => Err(Error::Parse {
                        position: lexer.position(),
                        message: format!("Unknown message data: {keyword}"),
                    }),
                }
            }
            _ => Err(Error::Parse {
                position: lexer.position(),
                message: format!("Unexpected token in untagged response: {token:?}"),
            }),
        }
    }

    /// Parses a continuation request.
    fn parse_continuation(lexer: &mut Lexer<'_>) -> Result<Response> {
        if lexer.peek() == Some(b' ') {
            lexer.advance();
        }

        let text = read_text_until_crlf(lexer);

        Ok(Response::Continuation {
            text: if text.is_empty() { None } else { Some(text) },
        })
    }

    /// Parses a status keyword.
    fn parse_status(lexer: &mut Lexer<'_>) -> Result<Status> {
        let s = lexer.read_atom_string()?;
        match s.to_uppercase().as_str() {
            "OK" => Ok(Status::Ok),
            "NO" => Ok(Status::No),
            "BAD" => Ok(Status::Bad),
            "PREAUTH" => Ok(Status::PreAuth),
            "BYE" => Ok(Status::Bye),
            _ => Err(Error::Parse {
                position: lexer.position(),
                message: format!("Invalid status: {s}"),
            }),
        }
    }
}

/// Parses what follows a status keyword: either a space and response text,
/// or nothing. Servers may send a bare `* BYE` with no text.
fn parse_status_tail(lexer: &mut Lexer<'_>) -> Result<(Option<ResponseCode>, String)> {
    if lexer.peek() == Some(b' ') {
        lexer.advance();
        parse_resp_text(lexer)
    } else {
        Ok((None, String::new()))
    }
}

/// Parses response text with an optional bracketed response code.
fn parse_resp_text(lexer: &mut Lexer<'_>) -> Result<(Option<ResponseCode>, String)> {
    let code = if lexer.peek() == Some(b'[') {
        Some(parse_response_code(lexer)?)
    } else {
        None
    };

    if lexer.peek() == Some(b' ') {
        lexer.advance();
    }

    let text = read_text_until_crlf(lexer);

    Ok((code, text))
}

/// Parses a bracketed response code.
fn parse_response_code(lexer: &mut Lexer<'_>) -> Result<ResponseCode> {
    lexer.expect(Token::LBracket)?;

    let atom = lexer.read_atom_string()?;
    let upper = atom.to_uppercase();

    let code = match upper.as_str() {
        "READ-ONLY" => ResponseCode::ReadOnly,
        "READ-WRITE" => ResponseCode::ReadWrite,
        "UIDNEXT" => {
            lexer.expect_space()?;
            ResponseCode::UidNext(lexer.read_number()?)
        }
        "UIDVALIDITY" => {
            lexer.expect_space()?;
            ResponseCode::UidValidity(lexer.read_number()?)
        }
        "UNSEEN" => {
            lexer.expect_space()?;
            let n = lexer.read_number()?;
            let seq = SeqNum::new(n).ok_or_else(|| Error::Parse {
                position: lexer.position(),
                message: "Invalid sequence number 0".to_string(),
            })?;
            ResponseCode::Unseen(seq)
        }
        "PERMANENTFLAGS" => {
            lexer.expect_space()?;
            ResponseCode::PermanentFlags(parse_flag_list(lexer)?)
        }
        "CAPABILITY" => ResponseCode::Capability(parse_capability_data(lexer)?),
        _ => {
            while lexer.peek() != Some(b']') && lexer.peek().is_some() {
                lexer.advance();
            }
            ResponseCode::Unknown(atom.to_string())
        }
    };

    // Skip anything left before the closing bracket.
    while lexer.peek() != Some(b']') && lexer.peek().is_some() {
        lexer.advance();
    }
    lexer.expect(Token::RBracket)?;

    Ok(code)
}

/// Parses space-separated capability atoms.
fn parse_capability_data(lexer: &mut Lexer<'_>) -> Result<Vec<String>> {
    let mut caps = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if let Token::Atom(s) = lexer.next_token()? {
            caps.push(s.to_string());
        }
    }

    Ok(caps)
}

/// Parses a parenthesized flag list.
fn parse_flag_list(lexer: &mut Lexer<'_>) -> Result<Vec<String>> {
    lexer.expect(Token::LParen)?;

    let mut flags = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Atom(s) => flags.push(s.to_string()),
            Token::Space => continue,
            token => {
                return Err(Error::Parse {
                    position: lexer.position(),
                    message: format!("Unexpected token in flag list: {token:?}"),
                });
            }
        }
    }

    Ok(flags)
}

/// Parses one LIST line: attributes, delimiter, mailbox name.
fn parse_list_response(lexer: &mut Lexer<'_>) -> Result<ListResponse> {
    lexer.expect(Token::LParen)?;
    let mut attributes = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Atom(s) => attributes.push(MailboxAttribute::parse(s)),
            Token::Space => continue,
            token => {
                return Err(Error::Parse {
                    position: lexer.position(),
                    message: format!("Unexpected token in LIST attributes: {token:?}"),
                });
            }
        }
    }

    lexer.expect_space()?;

    let delimiter = match lexer.next_token()? {
        Token::Nil => None,
        Token::QuotedString(s) => s.chars().next(),
        token => {
            return Err(Error::Parse {
                position: lexer.position(),
                message: format!("Expected delimiter, got {token:?}"),
            });
        }
    };

    lexer.expect_space()?;

    let mailbox_name = lexer.read_astring()?;

    Ok(ListResponse {
        attributes,
        delimiter,
        mailbox: Mailbox::new(mailbox_name),
    })
}

/// Parses SEARCH result numbers.
fn parse_search_response(lexer: &mut Lexer<'_>) -> Result<Vec<SeqNum>> {
    let mut nums = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if let Token::Number(n) = lexer.next_token()?
            && let Some(seq) = SeqNum::new(n)
        {
            nums.push(seq);
        }
    }

    Ok(nums)
}

/// Parses the parenthesized item list of a FETCH response.
fn parse_fetch_items(lexer: &mut Lexer<'_>) -> Result<Vec<FetchItem>> {
    lexer.expect(Token::LParen)?;

    let mut items = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => continue,
            Token::Atom(name) => {
                let upper = name.to_uppercase();
                match upper.as_str() {
                    "RFC822" => {
                        lexer.expect_space()?;
                        push_message_data(lexer, &mut items)?;
                    }
                    // IMAP4rev2 servers answer an RFC822 fetch as BODY[]
                    "BODY" => {
                        lexer.expect(Token::LBracket)?;
                        lexer.expect(Token::RBracket)?;
                        lexer.expect_space()?;
                        push_message_data(lexer, &mut items)?;
                    }
                    "RFC822.SIZE" => {
                        lexer.expect_space()?;
                        items.push(FetchItem::Rfc822Size(lexer.read_number()?));
                    }
                    "FLAGS" => {
                        lexer.expect_space()?;
                        items.push(FetchItem::Flags(parse_flag_list(lexer)?));
                    }
                    "UID" => {
                        lexer.expect_space()?;
                        items.push(FetchItem::Uid(lexer.read_number()?));
                    }
                    "INTERNALDATE" => {
                        lexer.expect_space()?;
                        if let Token::QuotedString(date) = lexer.next_token()? {
                            items.push(FetchItem::InternalDate(date));
                        }
                    }
                    _ => {
                        return Err(Error::Parse {
                            position: lexer.position(),
                            message: format!("Unknown FETCH item: {name}"),
                        });
                    }
                }
            }
            token => {
                return Err(Error::Parse {
                    position: lexer.position(),
                    message: format!("Unexpected token in FETCH items: {token:?}"),
                });
            }
        }
    }

    Ok(items)
}

/// Pushes message bytes from a literal or quoted string onto `items`.
fn push_message_data(lexer: &mut Lexer<'_>, items: &mut Vec<FetchItem>) -> Result<()> {
    match lexer.next_token()? {
        Token::Literal(data) => items.push(FetchItem::Rfc822(data)),
        Token::QuotedString(s) => items.push(FetchItem::Rfc822(s.into_bytes())),
        Token::Nil => {}
        token => {
            return Err(Error::Parse {
                position: lexer.position(),
                message: format!("Expected message literal, got {token:?}"),
            });
        }
    }
    Ok(())
}

/// Reads text until CRLF.
fn read_text_until_crlf(lexer: &mut Lexer<'_>) -> String {
    let remaining = lexer.remaining();

    let end = remaining
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(remaining.len());

    lexer.skip(end);

    if lexer.peek() == Some(b'\r') {
        lexer.skip(2);
    }

    String::from_utf8_lossy(&remaining[..end]).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_greeting_ok() {
        let input = b"* OK IMAP4rev1 Service Ready\r\n";
        let response = ResponseParser::parse(input).unwrap();

        match response {
            Response::Untagged(UntaggedResponse::Ok { code, text }) => {
                assert!(code.is_none());
                assert_eq!(text, "IMAP4rev1 Service Ready");
            }
            _ => panic!("Expected untagged OK"),
        }
    }

    #[test]
    fn test_parse_greeting_with_capability_code() {
        let input = b"* OK [CAPABILITY IMAP4rev1 LITERAL+ ID] Dovecot ready.\r\n";
        let response = ResponseParser::parse(input).unwrap();

        match response {
            Response::Untagged(UntaggedResponse::Ok { code, text }) => {
                match code {
                    Some(ResponseCode::Capability(caps)) => {
                        assert!(caps.iter().any(|c| c == "IMAP4rev1"));
                    }
                    other => panic!("Expected capability code, got {other:?}"),
                }
                assert_eq!(text, "Dovecot ready.");
            }
            _ => panic!("Expected untagged OK"),
        }
    }

    #[test]
    fn test_parse_tagged_ok() {
        let input = b"A001 OK LOGIN completed\r\n";
        let response = ResponseParser::parse(input).unwrap();

        match response {
            Response::Tagged {
                tag,
                status,
                code,
                text,
            } => {
                assert_eq!(tag.as_str(), "A001");
                assert_eq!(status, Status::Ok);
                assert!(code.is_none());
                assert_eq!(text, "LOGIN completed");
            }
            _ => panic!("Expected tagged response"),
        }
    }

    #[test]
    fn test_parse_tagged_no() {
        let input = b"A001 NO [AUTHENTICATIONFAILED] Invalid credentials\r\n";
        let response = ResponseParser::parse(input).unwrap();

        match response {
            Response::Tagged { status, code, .. } => {
                assert_eq!(status, Status::No);
                assert_eq!(
                    code,
                    Some(ResponseCode::Unknown("AUTHENTICATIONFAILED".to_string()))
                );
            }
            _ => panic!("Expected tagged response"),
        }
    }

    #[test]
    fn test_parse_exists_and_recent() {
        match ResponseParser::parse(b"* 23 EXISTS\r\n").unwrap() {
            Response::Untagged(UntaggedResponse::Exists(n)) => assert_eq!(n, 23),
            _ => panic!("Expected EXISTS"),
        }
        match ResponseParser::parse(b"* 2 RECENT\r\n").unwrap() {
            Response::Untagged(UntaggedResponse::Recent(n)) => assert_eq!(n, 2),
            _ => panic!("Expected RECENT"),
        }
    }

    #[test]
    fn test_parse_unseen_code() {
        let input = b"* OK [UNSEEN 12] Message 12 is first unseen\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Ok { code, .. }) => {
                assert_eq!(code, Some(ResponseCode::Unseen(SeqNum::new(12).unwrap())));
            }
            _ => panic!("Expected untagged OK"),
        }
    }

    #[test]
    fn test_parse_list_line() {
        let input = b"* LIST (\\HasNoChildren) \"/\" \"INBOX\"\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::List(list)) => {
                assert_eq!(list.mailbox.as_str(), "INBOX");
                assert_eq!(list.delimiter, Some('/'));
                assert_eq!(list.attributes, vec![MailboxAttribute::HasNoChildren]);
            }
            _ => panic!("Expected LIST"),
        }
    }

    #[test]
    fn test_parse_list_line_encoded_name() {
        let input = b"* LIST (\\HasNoChildren) \"/\" \"&BdcF6QXRBdUF4AXZBdUF6g-\"\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::List(list)) => {
                assert_eq!(list.mailbox.as_str(), "&BdcF6QXRBdUF4AXZBdUF6g-");
            }
            _ => panic!("Expected LIST"),
        }
    }

    #[test]
    fn test_parse_list_nil_delimiter() {
        let input = b"* LIST (\\NoSelect) NIL Foo\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::List(list)) => {
                assert!(list.delimiter.is_none());
                assert!(!list.selectable());
            }
            _ => panic!("Expected LIST"),
        }
    }

    #[test]
    fn test_parse_search_results() {
        let input = b"* SEARCH 2 5 9\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Search(ids)) => {
                let values: Vec<u32> = ids.iter().map(|s| s.get()).collect();
                assert_eq!(values, vec![2, 5, 9]);
            }
            _ => panic!("Expected SEARCH"),
        }
    }

    #[test]
    fn test_parse_search_empty() {
        match ResponseParser::parse(b"* SEARCH\r\n").unwrap() {
            Response::Untagged(UntaggedResponse::Search(ids)) => assert!(ids.is_empty()),
            _ => panic!("Expected SEARCH"),
        }
    }

    #[test]
    fn test_parse_fetch_rfc822() {
        let input = b"* 1 FETCH (RFC822 {15}\r\nSubject: hi\r\n\r\n)\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Fetch { seq, items }) => {
                assert_eq!(seq.get(), 1);
                assert_eq!(
                    items,
                    vec![FetchItem::Rfc822(b"Subject: hi\r\n\r\n".to_vec())]
                );
            }
            _ => panic!("Expected FETCH"),
        }
    }

    #[test]
    fn test_parse_fetch_with_flags_and_size() {
        let input = b"* 3 FETCH (FLAGS (\\Seen) RFC822.SIZE 512 RFC822 {2}\r\nhi)\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Fetch { seq, items }) => {
                assert_eq!(seq.get(), 3);
                assert!(items.contains(&FetchItem::Flags(vec!["\\Seen".to_string()])));
                assert!(items.contains(&FetchItem::Rfc822Size(512)));
                assert!(items.contains(&FetchItem::Rfc822(b"hi".to_vec())));
            }
            _ => panic!("Expected FETCH"),
        }
    }

    #[test]
    fn test_parse_flags_line() {
        let input = b"* FLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft)\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Flags(flags)) => {
                assert_eq!(flags.len(), 5);
                assert!(flags.contains(&"\\Seen".to_string()));
            }
            _ => panic!("Expected FLAGS"),
        }
    }

    #[test]
    fn test_parse_bye() {
        let input = b"* BYE Logging out\r\n";
        match ResponseParser::parse(input).unwrap() {
            Response::Untagged(UntaggedResponse::Bye { text, .. }) => {
                assert_eq!(text, "Logging out");
            }
            _ => panic!("Expected BYE"),
        }
    }

    #[test]
    fn test_parse_bye_without_text() {
        match ResponseParser::parse(b"* BYE\r\n").unwrap() {
            Response::Untagged(UntaggedResponse::Bye { code, text }) => {
                assert!(code.is_none());
                assert!(text.is_empty());
            }
            _ => panic!("Expected BYE"),
        }
    }

    #[test]
    fn test_parse_continuation() {
        match ResponseParser::parse(b"+ Ready for literal\r\n").unwrap() {
            Response::Continuation { text } => {
                assert_eq!(text.as_deref(), Some("Ready for literal"));
            }
            _ => panic!("Expected continuation"),
        }
    }

    #[test]
    fn test_unknown_untagged_errors() {
        assert!(ResponseParser::parse(b"* QUOTAROOT INBOX\r\n").is_err());
    }
}
