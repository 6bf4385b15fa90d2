//! Command serialization helpers.

use super::{SearchCriteria, StoreAction};

/// Writes an astring (atom or quoted string).
pub fn write_astring(buf: &mut Vec<u8>, s: &str) {
    if s.is_empty() || s.bytes().any(needs_quoting) {
        buf.push(b'"');
        for b in s.bytes() {
            if b == b'"' || b == b'\\' {
                buf.push(b'\\');
            }
            buf.push(b);
        }
        buf.push(b'"');
    } else {
        buf.extend_from_slice(s.as_bytes());
    }
}

/// Returns true if the byte needs quoting.
const fn needs_quoting(b: u8) -> bool {
    matches!(b, b' ' | b'"' | b'\\' | b'(' | b')' | b'{' | b'%' | b'*') || b < 0x20 || b == 0x7F
}

/// Writes SEARCH criteria.
pub fn write_search_criteria(buf: &mut Vec<u8>, criteria: &SearchCriteria) {
    match criteria {
        SearchCriteria::Unseen => buf.extend_from_slice(b"UNSEEN"),
        SearchCriteria::Since(date) => {
            buf.extend_from_slice(b"SINCE ");
            buf.extend_from_slice(date.as_bytes());
        }
        SearchCriteria::And(parts) => {
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    buf.push(b' ');
                }
                write_search_criteria(buf, part);
            }
        }
    }
}

/// Writes a STORE action.
pub fn write_store_action(buf: &mut Vec<u8>, action: &StoreAction, silent: bool) {
    let (prefix, flags) = match action {
        StoreAction::SetFlags(f) => ("FLAGS", f),
        StoreAction::AddFlags(f) => ("+FLAGS", f),
        StoreAction::RemoveFlags(f) => ("-FLAGS", f),
    };

    buf.extend_from_slice(prefix.as_bytes());
    if silent {
        buf.extend_from_slice(b".SILENT");
    }
    buf.extend_from_slice(b" (");
    for (i, flag) in flags.iter().enumerate() {
        if i > 0 {
            buf.push(b' ');
        }
        buf.extend_from_slice(flag.as_bytes());
    }
    buf.push(b')');
}
