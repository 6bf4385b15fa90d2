//! Decoders for MIME transfer encodings and RFC 2047 headers.
//!
//! Everything here is decode-side: this crate ingests mail, it never
//! generates it. Header decoding is deliberately lenient; a malformed
//! encoded word is passed through verbatim instead of failing the whole
//! header.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;

/// Decodes Base64 data.
///
/// Lenient about the framing mail produces in practice: whitespace (line
/// wrapping) is stripped and trailing `=` padding is optional.
///
/// # Errors
///
/// Returns an error if the remaining input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD_NO_PAD
        .decode(cleaned.trim_end_matches('='))
        .map_err(Into::into)
}

/// Decodes Quoted-Printable text (RFC 2045) into raw bytes.
///
/// Soft line breaks (`=` at end of line) are removed; `=XX` escapes become
/// single bytes. The output is bytes, not text, because the decoded payload
/// may be in any charset or be binary.
///
/// # Errors
///
/// Returns an error on a truncated or non-hex escape sequence.
pub fn decode_quoted_printable(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'=' {
            if bytes.get(i + 1) == Some(&b'\r') && bytes.get(i + 2) == Some(&b'\n') {
                i += 3;
            } else if bytes.get(i + 1) == Some(&b'\n') {
                i += 2;
            } else {
                let (Some(&hi), Some(&lo)) = (bytes.get(i + 1), bytes.get(i + 2)) else {
                    return Err(Error::InvalidEncoding(
                        "Incomplete quoted-printable escape".to_string(),
                    ));
                };
                out.push((hex_digit(hi)? << 4) | hex_digit(lo)?);
                i += 3;
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(out)
}

fn hex_digit(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        _ => Err(Error::InvalidEncoding(format!(
            "Invalid quoted-printable escape byte {byte:#04x}"
        ))),
    }
}

/// Decodes a header value containing RFC 2047 encoded words.
///
/// Format of one word: `=?charset?encoding?encoded-text?=`. A value may mix
/// plain text with any number of encoded words; whitespace between two
/// adjacent encoded words is transparent (RFC 2047 section 6.2). Each word is
/// decoded with its declared charset. A word that does not decode is left in
/// the output verbatim, so this function never fails.
#[must_use]
pub fn decode_header(value: &str) -> String {
    let mut out = String::new();
    let mut rest = value;
    let mut previous_was_word = false;

    while let Some((before, decoded, after)) = next_encoded_word(rest) {
        let gap_is_whitespace =
            !before.is_empty() && before.chars().all(char::is_whitespace);
        if !(previous_was_word && gap_is_whitespace) {
            out.push_str(before);
        }
        out.push_str(&decoded);
        previous_was_word = true;
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Finds the next well-formed encoded word, returning the literal text before
/// it, its decoded value, and the remaining input after it.
fn next_encoded_word(input: &str) -> Option<(&str, String, &str)> {
    let mut search_from = 0;
    while let Some(offset) = input[search_from..].find("=?") {
        let start = search_from + offset;
        if let Some((decoded, consumed)) = decode_encoded_word(&input[start..]) {
            return Some((&input[..start], decoded, &input[start + consumed..]));
        }
        search_from = start + 2;
    }
    None
}

/// Decodes one encoded word at the start of `input`. Returns the decoded text
/// and the number of bytes consumed, or `None` if the candidate is malformed.
fn decode_encoded_word(input: &str) -> Option<(String, usize)> {
    let body = input.strip_prefix("=?")?;
    let (charset, body) = body.split_once('?')?;
    let (encoding, body) = body.split_once('?')?;
    let payload_len = body.find("?=")?;
    let payload = &body[..payload_len];

    let bytes = match encoding {
        "B" | "b" => decode_base64(payload).ok()?,
        "Q" | "q" => decode_quoted_printable(&payload.replace('_', " ")).ok()?,
        _ => return None,
    };

    let consumed = 2 + charset.len() + 1 + encoding.len() + 1 + payload_len + 2;

    // RFC 2231 permits a language tag after the charset, e.g. "utf-8*he".
    let charset = charset.split_once('*').map_or(charset, |(cs, _)| cs);

    Some((decode_charset(&bytes, charset), consumed))
}

/// Decodes bytes under a declared charset name.
///
/// UTF-8 and US-ASCII decode natively; ISO-8859-1 and Windows-1252 are mapped
/// directly. Any other charset falls back to lossy UTF-8, substituting
/// invalid bytes rather than failing.
fn decode_charset(bytes: &[u8], charset: &str) -> String {
    match charset.trim().to_ascii_lowercase().as_str() {
        "iso-8859-1" | "latin1" | "latin-1" => bytes.iter().map(|&b| char::from(b)).collect(),
        "windows-1252" | "cp1252" => bytes.iter().map(|&b| windows_1252_char(b)).collect(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Maps a Windows-1252 byte to its character. 0x80-0x9F is the only range
/// where the codepage departs from Latin-1; unassigned bytes in that range
/// pass through as their Latin-1 value.
fn windows_1252_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        other => char::from(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod base64_tests {
        use super::*;

        #[test]
        fn test_decode_base64() {
            assert_eq!(decode_base64("SGVsbG8sIFdvcmxkIQ==").unwrap(), b"Hello, World!");
        }

        #[test]
        fn test_decode_base64_without_padding() {
            assert_eq!(decode_base64("SGVsbG8sIFdvcmxkIQ").unwrap(), b"Hello, World!");
        }

        #[test]
        fn test_decode_base64_line_wrapped() {
            assert_eq!(decode_base64("SGVs\r\nbG8s\r\nIFdv\r\ncmxkIQ==").unwrap(), b"Hello, World!");
        }

        #[test]
        fn test_decode_base64_rejects_garbage() {
            assert!(decode_base64("not*base64!").is_err());
        }
    }

    mod quoted_printable_tests {
        use super::*;

        #[test]
        fn test_decode_plain_text() {
            assert_eq!(decode_quoted_printable("Hello, World!").unwrap(), b"Hello, World!");
        }

        #[test]
        fn test_decode_hex_escape() {
            assert_eq!(decode_quoted_printable("H=C3=A9llo").unwrap(), "Héllo".as_bytes());
        }

        #[test]
        fn test_decode_lowercase_hex() {
            assert_eq!(decode_quoted_printable("=c3=a9").unwrap(), "é".as_bytes());
        }

        #[test]
        fn test_decode_soft_line_break() {
            assert_eq!(decode_quoted_printable("Hello=\r\nWorld").unwrap(), b"HelloWorld");
            assert_eq!(decode_quoted_printable("Hello=\nWorld").unwrap(), b"HelloWorld");
        }

        #[test]
        fn test_decode_non_utf8_bytes() {
            // Latin-1 e-acute is not valid UTF-8 on its own; the decoder must
            // still hand the byte back.
            assert_eq!(decode_quoted_printable("caf=E9").unwrap(), b"caf\xE9");
        }

        #[test]
        fn test_decode_truncated_escape() {
            assert!(decode_quoted_printable("abc=4").is_err());
        }

        #[test]
        fn test_decode_invalid_hex() {
            assert!(decode_quoted_printable("=ZZ").is_err());
        }
    }

    mod header_tests {
        use super::*;

        #[test]
        fn test_plain_value_unchanged() {
            assert_eq!(decode_header("Invoice 4711"), "Invoice 4711");
        }

        #[test]
        fn test_b_encoded_utf8() {
            assert_eq!(decode_header("=?utf-8?B?SMOpbGxv?="), "Héllo");
        }

        #[test]
        fn test_q_encoded_utf8() {
            assert_eq!(decode_header("=?utf-8?Q?H=C3=A9llo?="), "Héllo");
        }

        #[test]
        fn test_q_encoding_underscore_is_space() {
            assert_eq!(decode_header("=?utf-8?Q?Invoice_4711?="), "Invoice 4711");
        }

        #[test]
        fn test_hebrew_subject() {
            assert_eq!(
                decode_header("=?UTF-8?B?15fXqdeR15XXoNeZ15XXqg==?="),
                "חשבוניות"
            );
        }

        #[test]
        fn test_mixed_literal_and_encoded() {
            assert_eq!(
                decode_header("Re: =?utf-8?Q?caf=C3=A9?= order"),
                "Re: café order"
            );
        }

        #[test]
        fn test_whitespace_between_words_is_dropped() {
            assert_eq!(
                decode_header("=?utf-8?Q?one?= =?utf-8?Q?two?="),
                "onetwo"
            );
            assert_eq!(
                decode_header("=?utf-8?Q?one?=\r\n =?utf-8?Q?two?="),
                "onetwo"
            );
        }

        #[test]
        fn test_whitespace_before_literal_is_kept() {
            assert_eq!(decode_header("=?utf-8?Q?one?= two"), "one two");
        }

        #[test]
        fn test_latin1_charset() {
            assert_eq!(decode_header("=?iso-8859-1?Q?caf=E9?="), "café");
        }

        #[test]
        fn test_windows_1252_charset() {
            assert_eq!(decode_header("=?windows-1252?Q?=80100?="), "€100");
        }

        #[test]
        fn test_unknown_charset_falls_back_to_lossy_utf8() {
            // The bytes happen to be valid UTF-8, so they decode cleanly.
            assert_eq!(decode_header("=?x-mystery?B?SMOpbGxv?="), "Héllo");
            // Invalid UTF-8 under an unknown charset degrades to replacement.
            assert_eq!(decode_header("=?x-mystery?Q?=FF?="), "\u{FFFD}");
        }

        #[test]
        fn test_malformed_word_passes_through() {
            assert_eq!(decode_header("=?utf-8?X?abc?="), "=?utf-8?X?abc?=");
            assert_eq!(decode_header("=?utf-8?B?***?="), "=?utf-8?B?***?=");
            assert_eq!(decode_header("=?utf-8?B?dangling"), "=?utf-8?B?dangling");
        }

        #[test]
        fn test_charset_language_tag() {
            assert_eq!(decode_header("=?utf-8*he?B?15fXqdeR15XXoNeZ15XXqg==?="), "חשבוניות");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_header_never_panics(s in "\\PC*") {
                let _ = decode_header(&s);
            }

            #[test]
            fn values_without_encoded_words_pass_through(s in "[a-zA-Z0-9 .,:;@-]*") {
                prop_assert_eq!(decode_header(&s), s);
            }

            #[test]
            fn b_encoded_utf8_round_trips(s in "\\PC{1,40}") {
                let payload = base64::engine::general_purpose::STANDARD.encode(s.as_bytes());
                let header = format!("=?utf-8?B?{payload}?=");
                prop_assert_eq!(decode_header(&header), s);
            }
        }
    }
}
