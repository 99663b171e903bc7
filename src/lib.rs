//! # inidoc
//!
//! A format-preserving INI document engine.
//!
//! INI has no formal grammar, so this crate reads it the way people write it:
//! line by line, dropping what it cannot understand instead of failing. Whatever it
//! does understand is kept together with the comments around it, so a document can
//! be edited and written back without losing its author's annotations.
//!
//! ## Features
//!
//! - **Pluggable line parsing**: best-effort, strict, or any [`LineParser`] you supply
//! - **Case-insensitive, order-preserving** sections and keys
//! - **Key-only entries**: `flag` is distinct from `flag=`
//! - **Comment preservation**: block comments, inline comments and trailing comments
//! - **Layered merges**: add missing values or override them, without writing merged
//!   content back to the original file
//! - **Persistence**: configurable quoting, separators, trailing newline and encoding
//! - **Reload**: re-read the source and replay every merge
//!
//! ## Example
//!
//! ```rust
//! use inidoc::{IniDocument, MergeStrategy, PersistStrategy};
//!
//! let mut doc = IniDocument::parse_str(r#"
//! ; application settings
//! [general]
//! name = demo
//! verbose
//!
//! [server]
//! port = 8080 ; default port
//! "#);
//!
//! assert_eq!(doc.get_value("General", "NAME"), Some("demo"));
//! assert_eq!(doc.get_raw("general", "verbose"), Some(&None));
//! assert_eq!(doc.get_value("server", "port"), Some("8080"));
//!
//! // Layer machine-local overrides on top
//! let local = IniDocument::parse_str("[server]\nport=9090\nhost=localhost");
//! doc.merge(&local, MergeStrategy::Override);
//! assert_eq!(doc.get_value("server", "port"), Some("9090"));
//!
//! // Only content owned by this document is written by default
//! let text = doc.render(PersistStrategy::ExcludeMerged);
//! assert!(text.contains("port=\"8080\" ; default port"));
//! assert!(!text.contains("host"));
//! ```
//!
//! ## Advanced Usage
//!
//! ### Custom Line Parsers
//!
//! ```rust
//! use inidoc::{FunctionParser, IniDocument, ParseStrategy, ParsedLine};
//!
//! // Treat `key: value` as an assignment
//! let parser = FunctionParser::new("colon", |line: &str| {
//!     let line = line.trim();
//!     if line.starts_with('[') && line.ends_with(']') {
//!         ParsedLine::section(line, None)
//!     } else if let Some((key, value)) = line.split_once(':') {
//!         ParsedLine::setting(key.trim(), value.trim(), None)
//!     } else {
//!         ParsedLine::noise()
//!     }
//! });
//!
//! let mut doc = IniDocument::new().with_custom_parser(parser);
//! doc.parse("[server]\nport: 8080");
//!
//! assert_eq!(doc.parse_strategy(), ParseStrategy::Custom);
//! assert_eq!(doc.get_value("server", "port"), Some("8080"));
//! ```
//!
//! ### Files
//!
//! ```rust,no_run
//! use inidoc::{IniDocument, IniOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = IniOptions::new()
//!     .with_section_separator(Some("----------".to_string()))
//!     .with_trailing_newline(true);
//!
//! // A missing file is an empty document that will be created on persist
//! let mut doc = IniDocument::load_with_options("settings.ini", options)?;
//! doc.set_value("window", "width", "800");
//! doc.persist()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod encoding;
mod error;
mod escaping;
mod merge;
mod mutation;
mod ordered_map;
mod parser;
mod section;
mod types;
mod writer;

pub use config::IniOptions;
pub use document::IniDocument;
pub use encoding::{Encoding, decode};
pub use error::{IniError, IniResult};
pub use escaping::{escape_quotes, unescape_quotes};
pub use mutation::SectionMut;
pub use parser::{
    BestEffortParser, DEFAULT_COMMENT_DELIMITER, FunctionParser, LineParser, ParseStrategy,
    ParsedLine, StrictParser,
};
pub use section::Section;
pub use types::{MergeStrategy, Origin, PersistStrategy, Setting, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
