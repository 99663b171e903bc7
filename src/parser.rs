//! Line parsers
//!
//! A line parser turns one physical line into a [`ParsedLine`]. The document
//! engine drives a parser over every line of the input and folds the results into
//! sections and settings; it never looks at the raw text itself beyond keeping
//! comment lines verbatim.
//!
//! Both built-in parsers close a quoted value at the first unescaped quote when
//! only a comment (or nothing) follows it, so whatever the writer produces reads
//! back unchanged. They differ on hand-written lines with raw quotes embedded in the
//! value:
//!
//! - [`StrictParser`] honors `\"` escapes and closes the value at the last quote
//!   that is followed by a comment or the end of the line.
//! - [`BestEffortParser`] closes the value at the last quote on the line.
//!
//! Anything implementing [`LineParser`] can be installed as a custom parser; the
//! closure-based [`FunctionParser`] covers most needs.

use crate::escaping::{find_last_quote, find_unescaped_quote, unescape_quotes};
use std::fmt;
use std::rc::Rc;

/// The default comment delimiter.
pub const DEFAULT_COMMENT_DELIMITER: &str = ";";

/// Result of parsing one line.
///
/// A line with an empty `key` is noise as far as settings go. If it still carries
/// a `comment` it is a pure comment line, otherwise it is blank or unrecognizable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// Setting key, or the bracketed header for section lines (e.g. `[general]`)
    pub key: String,

    /// `None` for key-only lines, `Some("")` for `key=`
    pub value: Option<String>,

    /// Comment text following the delimiter (delimiter excluded)
    pub comment: Option<String>,

    /// Whether this line opens a section
    pub is_section_header: bool,
}

impl ParsedLine {
    /// A blank or unrecognizable line
    pub fn noise() -> Self {
        Self::default()
    }

    /// A pure comment line
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            comment: Some(text.into()),
            ..Self::default()
        }
    }

    /// A section header line; `key` includes the brackets
    pub fn section(key: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            comment,
            is_section_header: true,
        }
    }

    /// A `key=value` line
    pub fn setting(key: impl Into<String>, value: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            comment,
            is_section_header: false,
        }
    }

    /// A line holding only a key, without `=`
    pub fn key_only(key: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            comment,
            is_section_header: false,
        }
    }

    /// Whether this is a pure comment line
    pub fn is_comment(&self) -> bool {
        self.key.is_empty() && self.comment.is_some()
    }

    /// Whether this line carries nothing at all
    pub fn is_noise(&self) -> bool {
        self.key.is_empty() && self.comment.is_none()
    }

    /// Section name for a header line: the text between the brackets, trimmed.
    /// Custom parsers may hand back the name without brackets.
    pub fn section_name(&self) -> &str {
        let key = self.key.trim();
        let key = key.strip_prefix('[').unwrap_or(key);
        let key = key.strip_suffix(']').unwrap_or(key);
        key.trim()
    }
}

/// Trait for implementing line parsers
pub trait LineParser: fmt::Debug {
    /// Parse a single physical line (without its line terminator)
    fn parse(&self, line: &str) -> ParsedLine;
}

/// Which parser a document uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStrategy {
    /// Forgiving quote handling for hand-edited files
    #[default]
    BestEffort,
    /// Escape-aware quote handling
    Strict,
    /// A caller-supplied [`LineParser`]
    Custom,
}

/// How a quoted value picks its closing quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteMode {
    Strict,
    BestEffort,
}

/// Escape-aware parser
#[derive(Debug, Clone)]
pub struct StrictParser {
    delimiter: String,
}

impl StrictParser {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: non_empty_delimiter(delimiter.into()),
        }
    }
}

impl Default for StrictParser {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_DELIMITER)
    }
}

impl LineParser for StrictParser {
    fn parse(&self, line: &str) -> ParsedLine {
        parse_line(line, &self.delimiter, QuoteMode::Strict)
    }
}

/// Forgiving parser
#[derive(Debug, Clone)]
pub struct BestEffortParser {
    delimiter: String,
}

impl BestEffortParser {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: non_empty_delimiter(delimiter.into()),
        }
    }
}

impl Default for BestEffortParser {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_DELIMITER)
    }
}

impl LineParser for BestEffortParser {
    fn parse(&self, line: &str) -> ParsedLine {
        parse_line(line, &self.delimiter, QuoteMode::BestEffort)
    }
}

/// Function-based parser wrapper
#[derive(Clone)]
pub struct FunctionParser {
    name: String,
    parser: Rc<dyn Fn(&str) -> ParsedLine>,
}

impl FunctionParser {
    pub fn new<F>(name: impl Into<String>, parser: F) -> Self
    where
        F: Fn(&str) -> ParsedLine + 'static,
    {
        Self {
            name: name.into(),
            parser: Rc::new(parser),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LineParser for FunctionParser {
    fn parse(&self, line: &str) -> ParsedLine {
        (self.parser)(line)
    }
}

impl fmt::Debug for FunctionParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionParser")
            .field("name", &self.name)
            .finish()
    }
}

fn non_empty_delimiter(delimiter: String) -> String {
    if delimiter.is_empty() {
        DEFAULT_COMMENT_DELIMITER.to_string()
    } else {
        delimiter
    }
}

fn parse_line(line: &str, delimiter: &str, mode: QuoteMode) -> ParsedLine {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return ParsedLine::noise();
    }

    if let Some(comment) = trimmed.strip_prefix(delimiter) {
        return ParsedLine::comment(comment);
    }

    if trimmed.starts_with('[') {
        if let Some(close) = trimmed.find(']') {
            let rest = &trimmed[close + 1..];
            return ParsedLine::section(&trimmed[..=close], comment_after(rest, delimiter));
        }
    }

    match find_assignment(trimmed, delimiter) {
        Assignment::Equals(eq) => {
            let key = trimmed[..eq].trim();
            if key.is_empty() {
                return ParsedLine::noise();
            }
            let (value, comment) = parse_value(&trimmed[eq + 1..], delimiter, mode);
            ParsedLine::setting(key, value, comment)
        }
        Assignment::Comment(pos) => {
            let key = trimmed[..pos].trim();
            let comment = Some(trimmed[pos + delimiter.len()..].to_string());
            if key.is_empty() {
                return ParsedLine::noise();
            }
            ParsedLine::key_only(key, comment)
        }
        Assignment::None => ParsedLine::key_only(trimmed, None),
    }
}

enum Assignment {
    /// Byte index of the first unquoted `=`
    Equals(usize),
    /// A comment delimiter came before any `=`
    Comment(usize),
    None,
}

fn find_assignment(line: &str, delimiter: &str) -> Assignment {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '=' if !in_quotes => return Assignment::Equals(i),
            _ if !in_quotes && line[i..].starts_with(delimiter) => return Assignment::Comment(i),
            _ => {}
        }
    }

    Assignment::None
}

/// Split the text after `=` into value and inline comment.
fn parse_value(raw: &str, delimiter: &str, mode: QuoteMode) -> (String, Option<String>) {
    let rest = raw.trim_start();

    if rest.trim_end().is_empty() {
        return (String::new(), None);
    }

    if rest.starts_with('"') {
        if let Some(close) = closing_quote(rest, delimiter, mode) {
            let value = unescape_quotes(&rest[1..close]);
            return (value, comment_after(&rest[close + 1..], delimiter));
        }
    }

    // Unquoted, or an opening quote that is never closed: take the text literally.
    match rest.find(delimiter) {
        Some(pos) => (
            rest[..pos].trim().to_string(),
            Some(rest[pos + delimiter.len()..].to_string()),
        ),
        None => (rest.trim().to_string(), None),
    }
}

/// Byte index of the quote closing a value that starts with `"`.
///
/// The first unescaped quote closes the value when only a comment or nothing
/// follows it. Stray text after it means raw quotes were embedded in the value:
/// BestEffort then takes the last quote on the line, Strict the last unescaped
/// quote that is itself followed by a comment or nothing.
fn closing_quote(rest: &str, delimiter: &str, mode: QuoteMode) -> Option<usize> {
    let Some(first) = find_unescaped_quote(rest, 1) else {
        return find_last_quote(rest, 0);
    };
    if ends_value(rest, first, delimiter) {
        return Some(first);
    }

    let fallback = match mode {
        QuoteMode::BestEffort => find_last_quote(rest, first),
        QuoteMode::Strict => {
            std::iter::successors(Some(first), |&q| find_unescaped_quote(rest, q + 1))
                .filter(|&q| ends_value(rest, q, delimiter))
                .last()
        }
    };
    fallback.or_else(|| find_last_quote(rest, first)).or(Some(first))
}

/// Whether only whitespace or a comment follows the quote at `quote`
fn ends_value(rest: &str, quote: usize, delimiter: &str) -> bool {
    let after = rest[quote + 1..].trim_start();
    after.is_empty() || after.starts_with(delimiter)
}

/// Comment text following the first delimiter in `rest`, if any.
fn comment_after(rest: &str, delimiter: &str) -> Option<String> {
    rest.find(delimiter)
        .map(|pos| rest[pos + delimiter.len()..].to_string())
}
