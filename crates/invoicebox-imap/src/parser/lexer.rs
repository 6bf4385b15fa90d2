//! IMAP lexer for tokenizing server responses.
//!
//! Breaks raw response bytes into tokens for the response parser. The
//! grammar subset covers everything the servers we talk to send back for
//! LOGIN, LIST, SELECT, SEARCH, FETCH, STORE, and LOGOUT.

#![allow(clippy::missing_errors_doc)]

use crate::{Error, Result};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Atom (unquoted string without special characters).
    Atom(&'a str),
    /// Quoted string.
    QuotedString(String),
    /// Literal string with size prefix {n}.
    Literal(Vec<u8>),
    /// Number.
    Number(u32),
    /// Opening parenthesis.
    LParen,
    /// Closing parenthesis.
    RParen,
    /// Opening bracket.
    LBracket,
    /// Closing bracket.
    RBracket,
    /// Space character.
    Space,
    /// Asterisk (untagged response prefix).
    Asterisk,
    /// Plus (continuation request prefix).
    Plus,
    /// NIL literal.
    Nil,
    /// CRLF line ending.
    Crlf,
    /// End of input.
    Eof,
}

/// IMAP lexer state.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peeks at the byte at offset from the current position.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advances by one byte and returns it.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips n bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Reads the next token.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        let Some(byte) = self.peek() else {
            return Ok(Token::Eof);
        };

        match byte {
            b'\r' => {
                if self.peek_at(1) == Some(b'\n') {
                    self.skip(2);
                    Ok(Token::Crlf)
                } else {
                    Err(self.error("Expected LF after CR"))
                }
            }
            b' ' => {
                self.advance();
                Ok(Token::Space)
            }
            b'(' => {
                self.advance();
                Ok(Token::LParen)
            }
            b')' => {
                self.advance();
                Ok(Token::RParen)
            }
            b'[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            b']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            b'*' => {
                self.advance();
                Ok(Token::Asterisk)
            }
            b'+' => {
                self.advance();
                Ok(Token::Plus)
            }
            b'"' => self.read_quoted_string(),
            b'{' => self.read_literal(),
            b'0'..=b'9' => self.read_number_or_atom(),
            _ if is_atom_char(byte) => self.read_atom(),
            _ => Err(self.error(&format!("Unexpected character: {byte:#04x}"))),
        }
    }

    /// Reads a quoted string token.
    fn read_quoted_string(&mut self) -> Result<Token<'a>> {
        self.advance(); // opening quote

        let mut result = Vec::new();

        loop {
            match self.advance() {
                Some(b'"') => break,
                Some(b'\\') => match self.advance() {
                    Some(b'"') => result.push(b'"'),
                    Some(b'\\') => result.push(b'\\'),
                    Some(c) => {
                        // only " and \ can be escaped
                        return Err(self.error(&format!("Invalid escape: \\{c}")));
                    }
                    None => return Err(self.error("Unexpected EOF in quoted string")),
                },
                Some(c) => result.push(c),
                None => return Err(self.error("Unexpected EOF in quoted string")),
            }
        }

        let s =
            String::from_utf8(result).map_err(|_| self.error("Invalid UTF-8 in quoted string"))?;

        Ok(Token::QuotedString(s))
    }

    /// Reads a literal: {n} CRLF followed by n raw bytes.
    fn read_literal(&mut self) -> Result<Token<'a>> {
        self.advance(); // {

        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {
                    self.advance();
                }
                b'}' => break,
                _ => return Err(self.error("Invalid character in literal size")),
            }
        }

        let size_str = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("Invalid literal size"))?;
        let size: usize = size_str
            .parse()
            .map_err(|_| self.error("Invalid literal size number"))?;

        if self.advance() != Some(b'}') {
            return Err(self.error("Expected } after literal size"));
        }
        if self.advance() != Some(b'\r') || self.advance() != Some(b'\n') {
            return Err(self.error("Expected CRLF after literal size"));
        }

        if self.pos + size > self.input.len() {
            return Err(self.error("Incomplete literal data"));
        }

        let data = self.input[self.pos..self.pos + size].to_vec();
        self.skip(size);

        Ok(Token::Literal(data))
    }

    /// Reads a number or an atom starting with a digit.
    fn read_number_or_atom(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let mut all_digits = true;

        while let Some(b) = self.peek() {
            if is_atom_char(b) {
                if !b.is_ascii_digit() {
                    all_digits = false;
                }
                self.advance();
            } else {
                break;
            }
        }

        let s = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("Invalid UTF-8 in atom"))?;

        if all_digits {
            let n: u32 = s.parse().map_err(|_| self.error("Number too large"))?;
            Ok(Token::Number(n))
        } else {
            Ok(Token::Atom(s))
        }
    }

    /// Reads an atom token.
    fn read_atom(&mut self) -> Result<Token<'a>> {
        let start = self.pos;

        while let Some(b) = self.peek() {
            if is_atom_char(b) {
                self.advance();
            } else {
                break;
            }
        }

        let s = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("Invalid UTF-8 in atom"))?;

        if s.eq_ignore_ascii_case("NIL") {
            Ok(Token::Nil)
        } else {
            Ok(Token::Atom(s))
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        Error::Parse {
            position: self.pos,
            message: message.to_string(),
        }
    }

    /// Expects and consumes a token of the given kind.
    #[allow(clippy::needless_pass_by_value)]
    pub fn expect(&mut self, expected: Token<'_>) -> Result<()> {
        let token = self.next_token()?;
        if std::mem::discriminant(&token) == std::mem::discriminant(&expected) {
            Ok(())
        } else {
            Err(self.error(&format!("Expected {expected:?}, got {token:?}")))
        }
    }

    /// Expects and consumes a space.
    pub fn expect_space(&mut self) -> Result<()> {
        self.expect(Token::Space)
    }

    /// Reads an astring (atom, quoted string, or literal).
    pub fn read_astring(&mut self) -> Result<String> {
        match self.next_token()? {
            Token::Atom(s) => Ok(s.to_string()),
            Token::QuotedString(s) => Ok(s),
            Token::Literal(data) => {
                String::from_utf8(data).map_err(|_| self.error("Invalid UTF-8 in literal"))
            }
            token => Err(self.error(&format!("Expected astring, got {token:?}"))),
        }
    }

    /// Reads a number.
    pub fn read_number(&mut self) -> Result<u32> {
        match self.next_token()? {
            Token::Number(n) => Ok(n),
            token => Err(self.error(&format!("Expected number, got {token:?}"))),
        }
    }

    /// Reads an atom.
    pub fn read_atom_string(&mut self) -> Result<&'a str> {
        match self.next_token()? {
            Token::Atom(s) => Ok(s),
            token => Err(self.error(&format!("Expected atom, got {token:?}"))),
        }
    }
}

/// Returns true if the byte is a valid atom character.
///
/// `\` is included so flags like `\Seen` lex as single tokens, even though
/// the RFC counts it among the quoted-specials.
#[must_use]
pub const fn is_atom_char(b: u8) -> bool {
    matches!(b,
        0x21..=0x27 |
        0x2B..=0x5A |
        0x5C |
        0x5E..=0x7A |
        0x7C |
        0x7E
    ) && b != b'"'
        && b != b'%'
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new(b"* OK");

        assert_eq!(lexer.next_token().unwrap(), Token::Asterisk);
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("OK"));
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_tagged_line() {
        let mut lexer = Lexer::new(b"A001 OK done\r\n");

        assert_eq!(lexer.next_token().unwrap(), Token::Atom("A001"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("OK"));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("done"));
        assert_eq!(lexer.next_token().unwrap(), Token::Crlf);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_quoted_string() {
        let mut lexer = Lexer::new(b"\"hello world\"");
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::QuotedString("hello world".to_string())
        );
    }

    #[test]
    fn test_quoted_string_with_escapes() {
        let mut lexer = Lexer::new(b"\"a \\\"b\\\" c\"");
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::QuotedString("a \"b\" c".to_string())
        );
    }

    #[test]
    fn test_number() {
        let mut lexer = Lexer::new(b"42");
        assert_eq!(lexer.next_token().unwrap(), Token::Number(42));
    }

    #[test]
    fn test_atom_starting_with_digit() {
        let mut lexer = Lexer::new(b"1abc");
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("1abc"));
    }

    #[test]
    fn test_nil() {
        let mut lexer = Lexer::new(b"NIL");
        assert_eq!(lexer.next_token().unwrap(), Token::Nil);

        let mut lexer = Lexer::new(b"nil");
        assert_eq!(lexer.next_token().unwrap(), Token::Nil);
    }

    #[test]
    fn test_literal() {
        let mut lexer = Lexer::new(b"{5}\r\nhello rest");
        assert_eq!(lexer.next_token().unwrap(), Token::Literal(b"hello".to_vec()));
        assert_eq!(lexer.next_token().unwrap(), Token::Space);
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("rest"));
    }

    #[test]
    fn test_incomplete_literal_errors() {
        let mut lexer = Lexer::new(b"{10}\r\nshort");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_flag_atom() {
        let mut lexer = Lexer::new(b"\\Seen");
        assert_eq!(lexer.next_token().unwrap(), Token::Atom("\\Seen"));
    }

    #[test]
    fn test_read_astring_variants() {
        let mut lexer = Lexer::new(b"INBOX");
        assert_eq!(lexer.read_astring().unwrap(), "INBOX");

        let mut lexer = Lexer::new(b"\"All Mail\"");
        assert_eq!(lexer.read_astring().unwrap(), "All Mail");

        let mut lexer = Lexer::new(b"{5}\r\nhello");
        assert_eq!(lexer.read_astring().unwrap(), "hello");
    }

    #[test]
    fn test_expect_mismatch_errors() {
        let mut lexer = Lexer::new(b"OK");
        assert!(lexer.expect(Token::LParen).is_err());
    }
}
