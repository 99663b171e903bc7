//! Section-level mutation handle.
//!
//! [`SectionMut`] is what [`IniDocument::section_mut`](crate::IniDocument::section_mut)
//! returns: a borrowed view of one section that reads and writes keys without
//! repeating the section name on every call.
//!
//! Every write goes through the same path as
//! [`IniDocument::set_value`](crate::IniDocument::set_value), so a key written here
//! stops being merged-in and is persisted like any other owned setting. Line
//! breaks in values become spaces, and a key that could not be read back (one
//! holding `=`, a quote, a line break or the comment delimiter, or starting with
//! `[`) is ignored with a warning.
//!
//! # Examples
//!
//! ```
//! use inidoc::IniDocument;
//!
//! let mut doc = IniDocument::parse_str("[server]\nport=8080");
//!
//! let mut server = doc.section_mut("Server");
//! server.set("port", "9090");
//! server.set_key_only("verbose");
//! assert!(!server.remove("missing"));
//!
//! assert_eq!(doc.get_value("server", "port"), Some("9090"));
//! assert!(doc.has_setting("server", "verbose"));
//! ```

use crate::escaping::{is_writable_key, single_line};
use crate::section::Section;
use crate::types::Value;
use log::warn;

/// The single write path for API mutations
pub(crate) fn write_setting(section: &mut Section, key: &str, value: Value, delimiter: &str) {
    let key = key.trim();
    if key.is_empty() {
        return;
    }
    if !is_writable_key(key, delimiter) {
        warn!("ignoring key {:?} in [{}]: it cannot be written back", key, section.name());
        return;
    }
    section.set(key, value.map(|v| single_line(&v)));
}

/// A mutable handle to one section of a document.
///
/// The section exists for as long as the handle does; obtaining a handle for a
/// name that was not present creates an empty section.
///
/// # Examples
///
/// ```
/// use inidoc::{IniDocument, MergeStrategy};
///
/// let mut doc = IniDocument::new();
/// doc.merge(&IniDocument::parse_str("[shared]\ntheme=dark"), MergeStrategy::AddIfMissing);
///
/// // Writing to a merged key makes it part of this document.
/// doc.section_mut("shared").set("theme", "light");
/// assert_eq!(doc.to_string(), "[shared]\ntheme=\"light\"");
/// ```
pub struct SectionMut<'a> {
    section: &'a mut Section,
    delimiter: String,
}

impl<'a> SectionMut<'a> {
    pub(crate) fn new(section: &'a mut Section, delimiter: String) -> Self {
        Self { section, delimiter }
    }

    /// The section name as first seen (empty for the default section)
    pub fn name(&self) -> &str {
        self.section.name()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.section.get(key)
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.section.get_raw(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.section.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.section.keys()
    }

    /// Upsert a value
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.set_raw(key, Some(value.into()))
    }

    /// Upsert a key with no value
    pub fn set_key_only(&mut self, key: &str) -> &mut Self {
        self.set_raw(key, None)
    }

    pub fn set_raw(&mut self, key: &str, value: Value) -> &mut Self {
        write_setting(self.section, key, value, &self.delimiter);
        self
    }

    /// Remove one setting. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.section.remove(key).is_some()
    }

    /// Read-only view of the underlying section
    pub fn as_section(&self) -> &Section {
        self.section
    }
}
