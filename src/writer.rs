//! Rendering and persisting documents.
//!
//! Sections are written in first-seen order with the default section first and
//! headerless. Comment lines are written back exactly as they were read. The
//! configured separator sits between a section's own comments and its header,
//! for every section that follows earlier output.

use crate::document::IniDocument;
use crate::error::{IniError, IniResult};
use crate::escaping::escape_quotes;
use crate::section::Section;
use crate::types::{PersistStrategy, Setting};
use log::debug;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

impl IniDocument {
    /// Render the document as text
    pub fn render(&self, strategy: PersistStrategy) -> String {
        let separator = self.options.resolved_separator();
        let mut lines: Vec<String> = Vec::new();

        for section in self.sections.values() {
            if !should_write_section(section, strategy) {
                continue;
            }

            if !section.is_default() {
                let follows_output = !lines.is_empty();
                lines.extend(section.comments_above.iter().cloned());
                if let Some(separator) = &separator {
                    if follows_output {
                        lines.push(separator.clone());
                    }
                }
                lines.push(format!("[{}]", section.name()));
            }

            for setting in section.settings() {
                if strategy == PersistStrategy::ExcludeMerged && setting.is_merged() {
                    continue;
                }
                lines.extend(setting.comments_above.iter().cloned());
                lines.push(self.format_setting(setting, strategy));
            }

            lines.extend(section.trailing_comments.iter().cloned());
        }

        let mut text = lines.join("\n");
        if self.options.append_trailing_newline {
            text.push('\n');
        }
        text
    }

    fn format_setting(&self, setting: &Setting, strategy: PersistStrategy) -> String {
        let mut line = match setting.persisted_value(strategy) {
            None => setting.key.clone(),
            Some(value) if self.options.wrap_values_in_quotes => {
                format!("{}=\"{}\"", setting.key, escape_quotes(value))
            }
            Some(value) => format!("{}={}", setting.key, value),
        };

        if let Some(comment) = &setting.inline_comment {
            line.push(' ');
            line.push_str(&self.options.comment_delimiter);
            line.push_str(comment);
        }
        line
    }

    /// Write back to the path the document was loaded from, leaving merged
    /// content out
    pub fn persist(&self) -> IniResult<()> {
        self.persist_with(PersistStrategy::ExcludeMerged)
    }

    /// Write back to the path the document was loaded from
    pub fn persist_with(&self, strategy: PersistStrategy) -> IniResult<()> {
        let path = self.source_path().ok_or_else(IniError::no_persist_target)?;
        self.persist_to(path, strategy)
    }

    /// Write to `path` using the configured encoding
    pub fn persist_to(&self, path: impl AsRef<Path>, strategy: PersistStrategy) -> IniResult<()> {
        let path = path.as_ref();
        let bytes = self.options.encoding.encode(&self.render(strategy));
        fs::write(path, &bytes)
            .map_err(|e| IniError::io(path.display().to_string(), e.to_string()))?;

        debug!("persisted {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Write to any byte sink using the configured encoding
    pub fn persist_to_writer<W: Write>(&self, writer: &mut W, strategy: PersistStrategy) -> IniResult<()> {
        let bytes = self.options.encoding.encode(&self.render(strategy));
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// Merged sections only appear in default output once they own a setting
fn should_write_section(section: &Section, strategy: PersistStrategy) -> bool {
    match strategy {
        PersistStrategy::IncludeMerged => true,
        PersistStrategy::ExcludeMerged => !section.is_merged() || section.has_owned_settings(),
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(PersistStrategy::ExcludeMerged))
    }
}
