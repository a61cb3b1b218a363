//! Assertion value escaping.
//!
//! RFC 4515 reserves five characters inside assertion values. Each is written
//! as a backslash followed by two hex digits:
//!
//! | Raw | Escaped |
//! |-----|---------|
//! | `*` | `\2A` |
//! | `(` | `\28` |
//! | `)` | `\29` |
//! | `\` | `\5C` |
//! | NUL | `\00` |
//!
//! Everything else, non-ASCII included, is copied through untouched. The table
//! is fixed. Escaping is not idempotent, so filters escape values exactly once,
//! when they are rendered.

use crate::error::{FilterError, Result};

/// Encodes a raw value for use inside a filter.
///
/// # Examples
/// ```
/// use ldapfilter::escape::escape;
///
/// assert_eq!(escape("a*b(c)"), r"a\2Ab\28c\29");
/// assert_eq!(escape("plain"), "plain");
/// assert_eq!(escape(""), "");
/// ```
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '*' => escaped.push_str(r"\2A"),
            '(' => escaped.push_str(r"\28"),
            ')' => escaped.push_str(r"\29"),
            '\\' => escaped.push_str(r"\5C"),
            '\0' => escaped.push_str(r"\00"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decodes an escaped assertion value back into the raw string.
///
/// Accepts any `\XX` hex pair (either case), not just the five that
/// [`escape`] produces, so values copied out of hand-written filters decode
/// too. Reserved characters must not appear unescaped.
pub fn unescape(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let (Some(&hi), Some(&lo)) = (bytes.get(i + 1), bytes.get(i + 2)) else {
                    return Err(malformed(i, "truncated escape sequence"));
                };
                let (Some(hi), Some(lo)) = (hex_value(hi), hex_value(lo)) else {
                    return Err(malformed(i, "escape is not two hex digits"));
                };
                decoded.push((hi << 4) | lo);
                i += 3;
            }
            b'*' | b'(' | b')' | b'\0' => {
                return Err(malformed(i, "reserved character must be escaped"));
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded)
        .map_err(|e| malformed(e.utf8_error().valid_up_to(), "decoded bytes are not UTF-8"))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn malformed(position: usize, reason: &'static str) -> FilterError {
    FilterError::MalformedValue { position, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("*", r"\2A" ; "asterisk")]
    #[test_case("(", r"\28" ; "open paren")]
    #[test_case(")", r"\29" ; "close paren")]
    #[test_case("\\", r"\5C" ; "backslash")]
    #[test_case("\0", r"\00" ; "nul")]
    fn escapes_reserved_character(raw: &str, expected: &str) {
        assert_eq!(escape(raw), expected);
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape("John Smith"), "John Smith");
        assert_eq!(escape("user@example.com"), "user@example.com");
        assert_eq!(escape("a=b~c>d<e:f|g&h!i"), "a=b~c>d<e:f|g&h!i");
    }

    #[test]
    fn passes_non_ascii_through() {
        assert_eq!(escape("Lučić"), "Lučić");
        assert_eq!(escape("日本(語)"), r"日本\28語\29");
    }

    #[test]
    fn empty_input_escapes_to_empty() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn mixed_input() {
        assert_eq!(escape(r"C:\dir\*"), r"C:\5Cdir\5C\2A");
    }

    #[test]
    fn escaping_twice_double_escapes() {
        let once = escape("*");
        assert_eq!(escape(&once), r"\5C2A");
    }

    #[test]
    fn unescape_reverses_escape() {
        for raw in ["", "plain", "a*b(c)", "\\\0", "日本(語)", r"\2A"] {
            assert_eq!(unescape(&escape(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn unescape_accepts_lowercase_and_arbitrary_hex() {
        assert_eq!(unescape(r"\2a\28").unwrap(), "*(");
        assert_eq!(unescape(r"\41BC").unwrap(), "ABC");
        assert_eq!(unescape(r"\c3\a9").unwrap(), "é");
    }

    #[test_case(r"abc\" ; "trailing backslash")]
    #[test_case(r"abc\2" ; "single hex digit")]
    #[test_case(r"\zz" ; "non hex digits")]
    #[test_case("a*b" ; "bare asterisk")]
    #[test_case("a(b" ; "bare paren")]
    #[test_case(r"\ff" ; "invalid utf8")]
    fn unescape_rejects(encoded: &str) {
        assert!(matches!(
            unescape(encoded),
            Err(FilterError::MalformedValue { .. })
        ));
    }

    #[test]
    fn unescape_reports_position() {
        match unescape(r"ab\q1") {
            Err(FilterError::MalformedValue { position, .. }) => assert_eq!(position, 2),
            other => panic!("expected MalformedValue, got {:?}", other),
        }
    }
}
