//! The in-memory INI document.
//!
//! An [`IniDocument`] owns its sections in first-seen order, with the default
//! (unnamed) section always present and always first. Text is folded into it one
//! line at a time by the active [`LineParser`]; comment lines are kept verbatim and
//! attached to whatever header or key follows them.
//!
//! Merging lives in the `merge` module, persistence in `writer`.

use crate::config::IniOptions;
use crate::encoding::{self, BOM_CHAR};
use crate::error::{IniError, IniResult};
use crate::escaping::single_line;
use crate::merge::MergeSource;
use crate::mutation::{SectionMut, write_setting};
use crate::ordered_map::CaseInsensitiveMap;
use crate::parser::{BestEffortParser, LineParser, ParseStrategy, StrictParser};
use crate::section::Section;
use crate::types::{Origin, Setting, Value};
use log::{debug, trace, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Where a document's own content was read from, for [`IniDocument::reload`]
#[derive(Debug, Clone)]
pub(crate) enum Source {
    Path(PathBuf),
    Text(Vec<String>),
}

/// An INI document
#[derive(Debug, Clone)]
pub struct IniDocument {
    pub(crate) sections: CaseInsensitiveMap<Section>,
    pub(crate) options: IniOptions,
    pub(crate) custom_parser: Option<Rc<dyn LineParser>>,
    pub(crate) source: Option<Source>,
    pub(crate) merge_sources: Vec<MergeSource>,
}

impl IniDocument {
    /// Create an empty document with default options
    pub fn new() -> Self {
        Self::with_options(IniOptions::default())
    }

    /// Create an empty document with custom options
    pub fn with_options(options: IniOptions) -> Self {
        Self {
            sections: default_sections(),
            options,
            custom_parser: None,
            source: None,
            merge_sources: Vec::new(),
        }
    }

    /// Parse a document from text with default options
    pub fn parse_str(text: &str) -> Self {
        let mut doc = Self::new();
        doc.parse(text);
        doc
    }

    /// Load a document from a file. A missing file yields an empty document that
    /// still persists to `path`.
    pub fn load(path: impl AsRef<Path>) -> IniResult<Self> {
        Self::load_with_options(path, IniOptions::default())
    }

    /// Load a document from a file with custom options
    pub fn load_with_options(path: impl AsRef<Path>, options: IniOptions) -> IniResult<Self> {
        let mut doc = Self::with_options(options);
        doc.load_path(path)?;
        Ok(doc)
    }

    /// Replace the content with the file at `path`, which becomes the persist
    /// and reload target
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> IniResult<()> {
        let path = path.as_ref().to_path_buf();
        self.sections = default_sections();
        self.source = Some(Source::Path(path.clone()));
        if let Some(text) = read_text(&path)? {
            self.fold_text(&text);
        }
        Ok(())
    }

    /// Install a custom line parser and switch to [`ParseStrategy::Custom`]
    pub fn with_custom_parser<P>(mut self, parser: P) -> Self
    where
        P: LineParser + 'static,
    {
        self.set_custom_parser(parser);
        self
    }

    /// Install a custom line parser and switch to [`ParseStrategy::Custom`]
    pub fn set_custom_parser<P>(&mut self, parser: P)
    where
        P: LineParser + 'static,
    {
        self.custom_parser = Some(Rc::new(parser));
        self.options.parse_strategy = ParseStrategy::Custom;
    }

    pub fn options(&self) -> &IniOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut IniOptions {
        &mut self.options
    }

    pub fn parse_strategy(&self) -> ParseStrategy {
        self.options.parse_strategy
    }

    /// Path used by [`IniDocument::persist`] and [`IniDocument::reload`]
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            Some(Source::Path(path)) => Some(path),
            _ => None,
        }
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source = Some(Source::Path(path.into()));
    }

    /// Fold text into the document. Never fails: unrecognizable lines are dropped.
    pub fn parse(&mut self, text: &str) {
        if let Some(Source::Text(texts)) = &mut self.source {
            texts.push(text.to_string());
        } else if self.source.is_none() {
            self.source = Some(Source::Text(vec![text.to_string()]));
        }
        self.fold_text(text);
    }

    fn active_parser(&self) -> Rc<dyn LineParser> {
        let delimiter = self.options.comment_delimiter.clone();
        match (self.options.parse_strategy, &self.custom_parser) {
            (ParseStrategy::Custom, Some(parser)) => Rc::clone(parser),
            (ParseStrategy::Strict, _) => Rc::new(StrictParser::new(delimiter)),
            _ => Rc::new(BestEffortParser::new(delimiter)),
        }
    }

    /// Single pass over the lines of `text`.
    pub(crate) fn fold_text(&mut self, text: &str) {
        let parser = self.active_parser();
        let delimiter = self.options.comment_delimiter.clone();
        let separator = self.options.resolved_separator().filter(|s| !s.is_empty());

        let mut current = String::new();
        let mut pending: Vec<String> = Vec::new();
        let mut settings = 0usize;

        for (index, line) in text.lines().enumerate() {
            let line = if index == 0 {
                line.strip_prefix(BOM_CHAR).unwrap_or(line)
            } else {
                line
            };

            let parsed = parser.parse(line);
            trace!("line {}: {:?}", index + 1, parsed);

            if parsed.is_section_header {
                let name = parsed.section_name().to_string();
                let mut comments = std::mem::take(&mut pending);
                if separator.is_some() && comments.last() == separator.as_ref() {
                    comments.pop();
                }

                let section = self.sections.get_or_insert_with(&name, || Section::new(&name));
                section.origin = Origin::Owned;
                section.comments_above.extend(comments);
                current = section.name().to_string();

                if let Some(comment) = parsed.comment {
                    pending.push(format!("{}{}", delimiter, comment));
                }
                continue;
            }

            if parsed.is_comment() {
                pending.push(line.to_string());
                continue;
            }

            if parsed.is_noise() {
                if !line.trim().is_empty() {
                    debug!("dropping unrecognized line {}: {:?}", index + 1, line);
                }
                continue;
            }

            let comments = std::mem::take(&mut pending);
            let section = self
                .sections
                .get_or_insert_with(&current, || Section::new(&current));
            section.origin = Origin::Owned;
            section.upsert_parsed(&parsed.key, parsed.value, comments, parsed.comment);
            settings += 1;
        }

        if !pending.is_empty() {
            let section = self
                .sections
                .get_or_insert_with(&current, || Section::new(&current));
            section.trailing_comments.extend(pending);
        }

        debug!(
            "parsed {} settings into {} sections",
            settings,
            self.sections.len()
        );
    }

    /// Discard in-memory state, re-read the document's own source and re-apply
    /// every merge source in the order it was first merged.
    ///
    /// On error the document is left exactly as it was before the call.
    pub fn reload(&mut self) -> IniResult<()> {
        let previous = std::mem::replace(&mut self.sections, default_sections());
        if let Err(err) = self.rebuild_from_sources() {
            warn!("reload failed, keeping previous state: {}", err);
            self.sections = previous;
            return Err(err);
        }

        debug!("reloaded document with {} sections", self.sections.len());
        Ok(())
    }

    fn rebuild_from_sources(&mut self) -> IniResult<()> {
        match self.source.clone() {
            Some(Source::Path(path)) => {
                if let Some(text) = read_text(&path)? {
                    self.fold_text(&text);
                }
            }
            Some(Source::Text(texts)) => {
                for text in &texts {
                    self.fold_text(text);
                }
            }
            None => {}
        }

        for source in self.merge_sources.clone() {
            self.apply_merge_source(&source)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Value of a setting. Missing sections, missing keys and key-only entries
    /// all read as `None`.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Value of a setting, or `default` when it has none
    pub fn get_value_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get_value(section, key).unwrap_or(default)
    }

    /// `None` if the setting is absent, otherwise its value (which is `None` for key-only entries)
    pub fn get_raw(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section).and_then(|s| s.get_raw(key))
    }

    pub fn get_setting(&self, section: &str, key: &str) -> Option<&Setting> {
        self.section(section).and_then(|s| s.setting(key))
    }

    /// Section by name; case and surrounding whitespace are ignored
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// The section holding settings that precede any header
    pub fn default_section(&self) -> Option<&Section> {
        self.sections.get("")
    }

    pub fn has_section(&self, name: &str) -> bool {
        name.trim().is_empty() || self.sections.contains_key(name)
    }

    pub fn has_setting(&self, section: &str, key: &str) -> bool {
        self.section(section).is_some_and(|s| s.contains(key))
    }

    /// Named sections persisted by default (not merged-in), in first-seen order
    pub fn section_names(&self) -> Vec<&str> {
        self.sections
            .values()
            .filter(|s| !s.is_default() && !s.is_merged())
            .map(|s| s.name())
            .collect()
    }

    /// Every named section, merged-in ones included
    pub fn all_section_names(&self) -> Vec<&str> {
        self.sections
            .values()
            .filter(|s| !s.is_default())
            .map(|s| s.name())
            .collect()
    }

    /// Named sections that only exist because of a merge
    pub fn merged_section_names(&self) -> Vec<&str> {
        self.sections
            .values()
            .filter(|s| s.is_merged())
            .map(|s| s.name())
            .collect()
    }

    pub fn has_merged_section(&self, name: &str) -> bool {
        self.section(name).is_some_and(|s| s.is_merged())
    }

    /// All sections, default first
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Add a section if it does not exist yet. An empty name means the default
    /// section, which always exists. Adding a merged-in section makes it owned,
    /// so its header is persisted.
    pub fn add_section(&mut self, name: &str) {
        self.section_entry(name).origin = Origin::Owned;
    }

    /// Add a section with a comment line rendered above its header. An existing
    /// section keeps its comments and only becomes owned.
    pub fn add_section_with_comment(&mut self, name: &str, comment: &str) {
        let name = single_line(name.trim());
        let name = name.as_str();
        let comment = single_line(comment);
        if let Some(section) = self.sections.get_mut(name) {
            section.origin = Origin::Owned;
            return;
        }

        let mut section = Section::new(name);
        if !comment.is_empty() {
            let line = if comment.starts_with(&self.options.comment_delimiter) {
                comment.to_string()
            } else {
                format!("{}{}", self.options.comment_delimiter, comment)
            };
            section.comments_above.push(line);
        }
        self.sections.insert(name, section);
    }

    /// Remove a section. Removing the default section only empties it.
    pub fn remove_section(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            if let Some(section) = self.sections.get_mut("") {
                section.clear();
            }
            return;
        }
        self.sections.remove(name);
    }

    /// Rename a section, keeping its settings, comments and position. Renaming onto
    /// an existing section merges into it, with the renamed section's values winning.
    pub fn rename_section(&mut self, old_name: &str, new_name: &str) {
        let old_name = old_name.trim();
        let new_name = single_line(new_name.trim());
        let new_name = new_name.as_str();
        if !self.sections.contains_key(old_name) {
            return;
        }

        let same_section = old_name.to_lowercase() == new_name.to_lowercase();

        if same_section {
            if !old_name.is_empty() {
                self.sections.rename(old_name, new_name);
                if let Some(section) = self.sections.get_mut(new_name) {
                    section.set_name(new_name);
                }
            }
            return;
        }

        let moved = if old_name.is_empty() {
            match self.sections.get_mut("") {
                Some(default) => std::mem::replace(default, Section::new("")),
                None => return,
            }
        } else if self.sections.contains_key(new_name) {
            match self.sections.remove(old_name) {
                Some(section) => section,
                None => return,
            }
        } else {
            self.sections.rename(old_name, new_name);
            if let Some(section) = self.sections.get_mut(new_name) {
                section.set_name(new_name);
            }
            return;
        };

        let target = self
            .sections
            .get_or_insert_with(new_name, || Section::new(new_name));
        target.absorb(moved);
    }

    /// Set a value, creating the section if needed. The setting becomes owned.
    pub fn set_value(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.set_raw_value(section, key, Some(value.into()));
    }

    /// Set a key without a value (written without `=`)
    pub fn set_key_only(&mut self, section: &str, key: &str) {
        self.set_raw_value(section, key, None);
    }

    /// Upsert a setting. Line breaks in the value become spaces; a key that
    /// could not be read back from the written file is ignored.
    pub fn set_raw_value(&mut self, section: &str, key: &str, value: Value) {
        let delimiter = self.options.comment_delimiter.clone();
        write_setting(self.section_entry(section), key, value, &delimiter);
    }

    /// Remove one setting. Returns whether it existed.
    pub fn remove_value(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .get_mut(section)
            .is_some_and(|s| s.remove(key).is_some())
    }

    /// Handle to one section, creating it if needed
    pub fn section_mut(&mut self, name: &str) -> SectionMut<'_> {
        let delimiter = self.options.comment_delimiter.clone();
        SectionMut::new(self.section_entry(name), delimiter)
    }

    /// Section by name, created if absent. Line breaks in a new name become spaces.
    pub(crate) fn section_entry(&mut self, name: &str) -> &mut Section {
        let name = single_line(name.trim());
        self.sections
            .get_or_insert_with(&name, || Section::new(name.as_str()))
    }
}

impl Default for IniDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn default_sections() -> CaseInsensitiveMap<Section> {
    let mut sections = CaseInsensitiveMap::new();
    sections.insert("", Section::new(""));
    sections
}

/// Read and decode a file; `None` if it does not exist.
pub(crate) fn read_text(path: &Path) -> IniResult<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => encoding::decode(&bytes).map(Some),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, starting empty", path.display());
            Ok(None)
        }
        Err(err) => Err(IniError::io(path.display().to_string(), err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MergeStrategy;

    #[test]
    fn test_empty_document_has_default_section() {
        let doc = IniDocument::new();
        assert!(doc.has_section(""));
        assert!(doc.default_section().is_some());
        assert!(doc.section_names().is_empty());
    }

    #[test]
    fn test_parse_section_with_two_keys() {
        let doc = IniDocument::parse_str("[general]\nkey=value\nsomething=");
        assert_eq!(doc.section_names(), vec!["general"]);
        assert_eq!(doc.get_value("general", "key"), Some("value"));
        assert_eq!(doc.get_value("general", "something"), Some(""));
        assert_eq!(doc.section("general").unwrap().len(), 2);
    }

    #[test]
    fn test_settings_before_header_go_to_default_section() {
        let doc = IniDocument::parse_str("top=1\n[s]\nk=v");
        assert_eq!(doc.get_value("", "top"), Some("1"));
        assert_eq!(doc.get_value("s", "top"), None);
    }

    #[test]
    fn test_crlf_and_lf_are_both_accepted() {
        let doc = IniDocument::parse_str("[a]\r\nx=1\r\n[b]\ny=2\n");
        assert_eq!(doc.get_value("a", "x"), Some("1"));
        assert_eq!(doc.get_value("b", "y"), Some("2"));
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let doc = IniDocument::parse_str("\u{feff}[section]\nkey=value");
        assert_eq!(doc.section_names(), vec!["section"]);
        assert_eq!(doc.get_value("section", "key"), Some("value"));
    }

    #[test]
    fn test_comment_block_attaches_to_next_key() {
        let doc = IniDocument::parse_str("[s]\n; one\n\n; two\nkey=value");
        let setting = doc.get_setting("s", "key").unwrap();
        assert_eq!(setting.comments_above, vec!["; one".to_string(), "; two".to_string()]);
    }

    #[test]
    fn test_comment_block_attaches_to_next_header() {
        let doc = IniDocument::parse_str(";about s\n[s]\nk=v");
        let section = doc.section("s").unwrap();
        assert_eq!(section.comments_above(), &[";about s".to_string()]);
        assert!(doc.get_setting("s", "k").unwrap().comments_above.is_empty());
    }

    #[test]
    fn test_header_comment_moves_to_first_key() {
        let doc = IniDocument::parse_str("[s] ;note\nk=v");
        assert!(doc.section("s").unwrap().comments_above().is_empty());
        assert_eq!(
            doc.get_setting("s", "k").unwrap().comments_above,
            vec![";note".to_string()]
        );
    }

    #[test]
    fn test_trailing_comments_are_kept() {
        let doc = IniDocument::parse_str("[s]\nk=v\n; the end");
        assert_eq!(
            doc.section("s").unwrap().trailing_comments(),
            &["; the end".to_string()]
        );
    }

    #[test]
    fn test_repeated_section_header_continues_section() {
        let doc = IniDocument::parse_str("[S]\na=1\n[other]\n[s]\nb=2");
        assert_eq!(doc.section_names(), vec!["S", "other"]);
        assert_eq!(doc.get_value("s", "a"), Some("1"));
        assert_eq!(doc.get_value("s", "b"), Some("2"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut doc = IniDocument::new();
        doc.set_value("Section", "Key", "v");
        assert_eq!(doc.get_value("SECTION", "KEY"), doc.get_value("section", "key"));
        assert_eq!(doc.get_value("section", "key"), Some("v"));
        assert!(doc.has_setting("sEcTiOn", "kEy"));
    }

    #[test]
    fn test_get_value_or() {
        let doc = IniDocument::parse_str("[s]\nflag");
        assert_eq!(doc.get_value_or("s", "missing", "fallback"), "fallback");
        assert_eq!(doc.get_value_or("nope", "k", "fallback"), "fallback");
        assert_eq!(doc.get_raw("s", "flag"), Some(&None));
    }

    #[test]
    fn test_add_section_is_idempotent() {
        let mut doc = IniDocument::parse_str("[s]\nk=v");
        doc.add_section("S");
        doc.add_section("");
        assert_eq!(doc.section_names(), vec!["s"]);
        assert_eq!(doc.get_value("s", "k"), Some("v"));
    }

    #[test]
    fn test_add_section_claims_merged_section() {
        let mut doc = IniDocument::parse_str("[own]\nk=v");
        doc.merge(
            &IniDocument::parse_str("[layer]\nx=1\n[other]\ny=2"),
            MergeStrategy::AddIfMissing,
        );
        assert!(doc.has_merged_section("layer"));

        doc.add_section("Layer");
        doc.add_section_with_comment("other", "kept");
        assert!(!doc.has_merged_section("layer"));
        assert!(!doc.has_merged_section("other"));
        assert_eq!(doc.section_names(), vec!["own", "layer", "other"]);
        assert_eq!(doc.to_string(), "[own]\nk=\"v\"\n\n[layer]\n\n[other]");
    }

    #[test]
    fn test_section_names_ignore_surrounding_whitespace() {
        let mut doc = IniDocument::parse_str("[net]\nhost=a\n[old]\nx=1\n[gone]\ny=2");
        assert!(doc.has_section(" net "));
        assert!(doc.has_section("  "));
        assert_eq!(doc.section(" NET").unwrap().name(), "net");
        assert_eq!(doc.get_value(" net ", " host "), Some("a"));

        assert!(doc.remove_value("net ", "host"));
        doc.rename_section(" old ", "new");
        doc.remove_section(" gone ");
        assert_eq!(doc.section_names(), vec!["net", "new"]);
        assert_eq!(doc.get_value("new", "x"), Some("1"));
    }

    #[test]
    fn test_add_section_with_comment() {
        let mut doc = IniDocument::new();
        doc.add_section_with_comment("new", "made by hand");
        assert_eq!(
            doc.section("new").unwrap().comments_above(),
            &[";made by hand".to_string()]
        );
    }

    #[test]
    fn test_remove_section() {
        let mut doc = IniDocument::parse_str("top=1\n[a]\nx=1\n[b]\ny=2");
        doc.remove_section("A");
        doc.remove_section("missing");
        assert_eq!(doc.section_names(), vec!["b"]);

        doc.remove_section("");
        assert!(doc.has_section(""));
        assert_eq!(doc.get_value("", "top"), None);
    }

    #[test]
    fn test_rename_section_keeps_position() {
        let mut doc = IniDocument::parse_str("[a]\nx=1\n[b]\ny=2");
        doc.rename_section("a", "renamed");
        assert_eq!(doc.section_names(), vec!["renamed", "b"]);
        assert_eq!(doc.get_value("renamed", "x"), Some("1"));
        assert!(!doc.has_section("a"));

        doc.rename_section("missing", "whatever");
        assert_eq!(doc.section_names(), vec!["renamed", "b"]);
    }

    #[test]
    fn test_rename_section_onto_existing() {
        let mut doc = IniDocument::parse_str("[a]\nx=1\nshared=a\n[b]\ny=2\nshared=b");
        doc.rename_section("a", "b");
        assert_eq!(doc.section_names(), vec!["b"]);
        assert_eq!(doc.get_value("b", "x"), Some("1"));
        assert_eq!(doc.get_value("b", "y"), Some("2"));
        assert_eq!(doc.get_value("b", "shared"), Some("a"));
    }

    #[test]
    fn test_rename_section_case_only() {
        let mut doc = IniDocument::parse_str("[section]\nk=v");
        doc.rename_section("section", "Section");
        assert_eq!(doc.section_names(), vec!["Section"]);
    }

    #[test]
    fn test_set_value_creates_section() {
        let mut doc = IniDocument::new();
        doc.set_value("new", "key", "value");
        assert!(doc.has_section("new"));
        assert_eq!(doc.get_value("new", "key"), Some("value"));
    }

    #[test]
    fn test_remove_value() {
        let mut doc = IniDocument::parse_str("[s]\na=1\nb=2");
        assert!(doc.remove_value("s", "A"));
        assert!(!doc.remove_value("s", "a"));
        assert!(!doc.remove_value("missing", "a"));
        assert_eq!(doc.section("s").unwrap().keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_strict_strategy_from_options() {
        let options = IniOptions::default().with_parse_strategy(ParseStrategy::Strict);
        let mut doc = IniDocument::with_options(options);
        doc.parse(r#"key="a" ; say "hi""#);
        assert_eq!(doc.get_value("", "key"), Some("a"));
        assert_eq!(
            doc.get_setting("", "key").unwrap().inline_comment.as_deref(),
            Some(r#" say "hi""#)
        );
    }
}
