use crate::encoding::Encoding;
use crate::parser::{DEFAULT_COMMENT_DELIMITER, ParseStrategy};

/// Document options
#[derive(Debug, Clone)]
pub struct IniOptions {
    /// Marks pure comment lines and trailing comments
    pub comment_delimiter: String,

    /// Text written between sections. `Some("")` writes a blank line, `None` writes
    /// nothing, any other text is written as a comment line.
    pub section_separator: Option<String>,

    /// Write every value as `key="value"`
    pub wrap_values_in_quotes: bool,

    /// End persisted output with a newline
    pub append_trailing_newline: bool,

    /// Encoding used for byte output
    pub encoding: Encoding,

    /// Parser used for each line
    pub parse_strategy: ParseStrategy,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            comment_delimiter: DEFAULT_COMMENT_DELIMITER.to_string(),
            section_separator: Some(String::new()),
            wrap_values_in_quotes: true,
            append_trailing_newline: false,
            encoding: Encoding::default(),
            parse_strategy: ParseStrategy::default(),
        }
    }
}

impl IniOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        if !delimiter.is_empty() {
            self.comment_delimiter = delimiter;
        }
        self
    }

    pub fn with_section_separator(mut self, separator: Option<String>) -> Self {
        self.section_separator = separator;
        self
    }

    pub fn with_wrap_values_in_quotes(mut self, wrap: bool) -> Self {
        self.wrap_values_in_quotes = wrap;
        self
    }

    pub fn with_trailing_newline(mut self, append: bool) -> Self {
        self.append_trailing_newline = append;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_parse_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.parse_strategy = strategy;
        self
    }

    /// The separator line exactly as persistence writes it.
    ///
    /// Blank separators stay blank; anything else is prefixed with the comment
    /// delimiter unless it already starts with it, so it reads back as a comment.
    pub fn resolved_separator(&self) -> Option<String> {
        let separator = self.section_separator.as_ref()?;
        if separator.trim().is_empty() {
            Some(String::new())
        } else if separator.starts_with(&self.comment_delimiter) {
            Some(separator.clone())
        } else {
            Some(format!("{}{}", self.comment_delimiter, separator))
        }
    }
}
