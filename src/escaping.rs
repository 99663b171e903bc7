//! Quote escaping for quoted INI values
//!
//! Values wrapped in double quotes may carry literal quotes written as `\"`.
//! This is the only escape sequence: backslashes on their own are literal, so a
//! value such as `C:\temp\` survives a write/read cycle untouched.
//!
//! - [`escape_quotes`] is applied by the writer when it wraps a value in quotes.
//! - [`unescape_quotes`] is its exact inverse, applied by the line parsers.
//!
//! Line breaks have no escape. Values set through the API are flattened to one
//! line, and keys the parser could not read back are refused.

/// The escape sequence for a literal quote inside a quoted value.
pub const ESCAPED_QUOTE: &str = "\\\"";

/// Replace every `"` with `\"`.
pub fn escape_quotes(value: &str) -> String {
    if !value.contains('"') {
        return value.to_string();
    }
    value.replace('"', ESCAPED_QUOTE)
}

/// Replace every `\"` with `"`, scanning left to right.
pub fn unescape_quotes(value: &str) -> String {
    if !value.contains(ESCAPED_QUOTE) {
        return value.to_string();
    }
    value.replace(ESCAPED_QUOTE, "\"")
}

/// Byte index of the first `"` at or after `from` that is not preceded by a backslash.
pub fn find_unescaped_quote(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    (from..bytes.len()).find(|&i| bytes[i] == b'"' && (i == 0 || bytes[i - 1] != b'\\'))
}

/// Byte index of the last `"` in the text, if it lies after `after`.
pub fn find_last_quote(text: &str, after: usize) -> Option<usize> {
    text.rfind('"').filter(|&i| i > after)
}

/// Replace each line break (`\r\n`, `\r` or `\n`) with a single space.
pub(crate) fn single_line(text: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text.to_string();
    }
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Whether `key` reads back as the same key once written as `key=...`.
pub(crate) fn is_writable_key(key: &str, delimiter: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.starts_with('[')
        && !key.contains(['=', '"', '\r', '\n'])
        && !key.contains(delimiter)
}
