//! Text escaping for SpreadsheetML string items

use std::borrow::Cow;
use std::fmt::Write;

/// Escape `s` for use as `<t>` element text.
///
/// Markup characters become entities. Code points XML 1.0 cannot carry are
/// written as `_xHHHH_`, and a literal `_xHHHH_` sequence in the input is
/// protected with `_x005F_` so it is not decoded on read.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    let clean = !s
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || is_restricted(c))
        && !s.contains("_x");
    if clean {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '_' if looks_like_hex_escape(&s[i..]) => out.push_str("_x005F_"),
            c if is_restricted(c) => push_hex_escape(&mut out, c as u32),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Write a single UTF-16 code unit as `<t>` text.
///
/// Lone surrogates have no `char` form and use the `_xHHHH_` escape.
pub fn push_code_unit(out: &mut String, code: u16) {
    match char::from_u32(code as u32) {
        Some(c) => {
            let mut buf = [0u8; 4];
            out.push_str(&escape_text(c.encode_utf8(&mut buf)));
        }
        None => push_hex_escape(out, code as u32),
    }
}

/// Check if `s` needs `xml:space="preserve"` to keep its whitespace
pub fn needs_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

fn push_hex_escape(out: &mut String, code: u32) {
    let _ = write!(out, "_x{:04X}_", code);
}

fn is_restricted(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

fn looks_like_hex_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7 && b[1] == b'x' && b[2..6].iter().all(u8::is_ascii_hexdigit) && b[6] == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_text("hello world"), Cow::Borrowed(_)));
        assert!(matches!(escape_text("中文"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(escape_text("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_restricted_characters() {
        assert_eq!(escape_text("a\u{1}b"), "a_x0001_b");
        assert_eq!(escape_text("tab\tok"), "tab\tok");
        assert_eq!(escape_text("\u{FFFF}"), "_xFFFF_");
        assert_eq!(escape_text("_x0041_"), "_x005F_x0041_");
        assert_eq!(escape_text("snake_xcase"), "snake_xcase");
    }

    #[test]
    fn test_code_units() {
        let mut out = String::new();
        push_code_unit(&mut out, 0x4E2D);
        push_code_unit(&mut out, 0xD800);
        push_code_unit(&mut out, b'&' as u16);
        assert_eq!(out, "中_xD800_&amp;");
    }

    #[test]
    fn test_needs_preserve() {
        assert!(needs_preserve(" lead"));
        assert!(needs_preserve("trail\n"));
        assert!(!needs_preserve("in side"));
        assert!(!needs_preserve(""));
    }
}
