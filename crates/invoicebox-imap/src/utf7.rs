//! Modified UTF-7 mailbox name encoding (RFC 3501 section 5.1.3).
//!
//! IMAP transmits mailbox names in a 7-bit-safe encoding: printable ASCII is
//! carried as-is, `&` shifts into a base64 section holding UTF-16BE code
//! units, `-` shifts back out, and the base64 alphabet replaces `/` with `,`.
//! A literal `&` is written as the two-character escape `&-`.
//!
//! [`encode`] never fails. [`decode`] never fails either: a malformed base64
//! section is kept verbatim in the output so that folder listings degrade to
//! showing the wire name instead of aborting.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes a Unicode mailbox name into its modified UTF-7 wire form.
///
/// `INBOX` (in any capitalization) and names made purely of printable ASCII
/// without `&` pass through unchanged. Everything else is encoded: runs of
/// characters outside 0x20..=0x7E become `&<base64>-` sections and literal
/// `&` becomes `&-`.
///
/// # Examples
///
/// ```
/// use invoicebox_imap::utf7;
///
/// assert_eq!(utf7::encode("INBOX"), "INBOX");
/// assert_eq!(utf7::encode("Invoices/2024"), "Invoices/2024");
/// assert_eq!(utf7::encode("Entw\u{fc}rfe"), "Entw&APw-rfe");
/// ```
#[must_use]
pub fn encode(name: &str) -> String {
    if name.eq_ignore_ascii_case("INBOX") {
        return name.to_string();
    }
    if name.chars().all(is_direct_char) && !name.contains('&') {
        return name.to_string();
    }

    let mut encoded = String::with_capacity(name.len() + 8);
    let mut pending = String::new();

    for ch in name.chars() {
        if is_direct_char(ch) {
            flush_shifted(&mut encoded, &mut pending);
            if ch == '&' {
                encoded.push_str("&-");
            } else {
                encoded.push(ch);
            }
        } else {
            pending.push(ch);
        }
    }
    flush_shifted(&mut encoded, &mut pending);

    encoded
}

/// Decodes a modified UTF-7 wire name back into Unicode.
///
/// The inverse of [`encode`] for anything [`encode`] produces. Arbitrary
/// wire input is handled leniently: a section whose base64 payload cannot be
/// decoded (bad alphabet, impossible padding, odd UTF-16 byte count) is
/// copied through unchanged, terminator included, and scanning continues
/// after it.
///
/// # Examples
///
/// ```
/// use invoicebox_imap::utf7;
///
/// assert_eq!(utf7::decode("Entw&APw-rfe"), "Entw\u{fc}rfe");
/// assert_eq!(utf7::decode("a&-b"), "a&b");
/// assert_eq!(utf7::decode("&!!!-"), "&!!!-");
/// ```
#[must_use]
pub fn decode(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut decoded = String::with_capacity(name.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '&' {
            decoded.push(chars[i]);
            i += 1;
            continue;
        }

        // Section runs to the next '-', or to the end of input when the
        // terminator is missing.
        let end = chars[i + 1..]
            .iter()
            .position(|&c| c == '-')
            .map_or(chars.len(), |off| i + 1 + off);

        if end == i + 1 {
            // "&-" is the escaped literal ampersand.
            decoded.push('&');
            i = end + 1;
            continue;
        }

        let section: String = chars[i + 1..end].iter().collect();
        match decode_section(&section) {
            Some(text) => decoded.push_str(&text),
            None => {
                let keep_until = chars.len().min(end + 1);
                decoded.extend(chars[i..keep_until].iter());
            }
        }
        i = end + 1;
    }

    decoded
}

/// Returns true for characters carried directly on the wire.
const fn is_direct_char(ch: char) -> bool {
    matches!(ch, '\x20'..='\x7e')
}

/// Appends the pending non-ASCII run as an `&<base64>-` section.
fn flush_shifted(encoded: &mut String, pending: &mut String) {
    if pending.is_empty() {
        return;
    }

    let utf16: Vec<u8> = pending
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();
    let payload = STANDARD
        .encode(&utf16)
        .trim_end_matches('=')
        .replace('/', ",");

    encoded.push('&');
    encoded.push_str(&payload);
    encoded.push('-');
    pending.clear();
}

/// Decodes one base64 section body, or `None` if it is malformed.
fn decode_section(section: &str) -> Option<String> {
    let mut b64 = section.replace(',', "/");
    match b64.len() % 4 {
        0 => {}
        1 => return None,
        n => b64.push_str(&"=".repeat(4 - n)),
    }

    let bytes = STANDARD.decode(b64.as_bytes()).ok()?;
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
