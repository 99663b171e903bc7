//! Layering one document over another.
//!
//! Merged content is readable like any other setting but is tagged
//! [`Origin::Merged`], so default persistence leaves it out. An
//! [`MergeStrategy::Override`] merge changes what reads return for keys the document
//! already owned, while their owned values stay the ones written back.
//!
//! Every merge is remembered so [`IniDocument::reload`] can replay it.

use crate::document::{IniDocument, read_text};
use crate::error::IniResult;
use crate::section::Section;
use crate::types::{MergeStrategy, Origin};
use log::debug;
use std::path::{Path, PathBuf};

/// A merge layer remembered for reload
#[derive(Debug, Clone)]
pub(crate) enum MergeSource {
    /// Re-read from disk on every reload
    Path {
        path: PathBuf,
        strategy: MergeStrategy,
    },
    /// Snapshot of an in-memory document taken at merge time
    Document {
        document: Box<IniDocument>,
        strategy: MergeStrategy,
    },
}

impl IniDocument {
    /// Layer `other` over this document.
    ///
    /// Sections and keys missing here are copied in and tagged as merged. Keys
    /// present on both sides keep their value under
    /// [`MergeStrategy::AddIfMissing`] and read the incoming value under
    /// [`MergeStrategy::Override`].
    pub fn merge(&mut self, other: &IniDocument, strategy: MergeStrategy) {
        self.merge_sections(other, strategy);

        let mut snapshot = other.clone();
        snapshot.merge_sources.clear();
        self.merge_sources.push(MergeSource::Document {
            document: Box::new(snapshot),
            strategy,
        });
    }

    /// Layer the file at `path` over this document. A missing file is ignored.
    pub fn merge_file(&mut self, path: impl AsRef<Path>, strategy: MergeStrategy) -> IniResult<()> {
        let path = path.as_ref();
        let Some(layer) = self.load_layer(path)? else {
            return Ok(());
        };

        self.merge_sections(&layer, strategy);
        self.merge_sources.push(MergeSource::Path {
            path: path.to_path_buf(),
            strategy,
        });
        Ok(())
    }

    pub(crate) fn apply_merge_source(&mut self, source: &MergeSource) -> IniResult<()> {
        match source {
            MergeSource::Path { path, strategy } => {
                if let Some(layer) = self.load_layer(path)? {
                    self.merge_sections(&layer, *strategy);
                }
            }
            MergeSource::Document { document, strategy } => {
                self.merge_sections(document, *strategy);
            }
        }
        Ok(())
    }

    /// Parse a merge layer with this document's options and parser
    fn load_layer(&self, path: &Path) -> IniResult<Option<IniDocument>> {
        let Some(text) = read_text(path)? else {
            debug!("merge source {} not found, skipping", path.display());
            return Ok(None);
        };

        let mut layer = IniDocument::with_options(self.options.clone());
        layer.custom_parser = self.custom_parser.clone();
        layer.fold_text(&text);
        Ok(Some(layer))
    }

    fn merge_sections(&mut self, other: &IniDocument, strategy: MergeStrategy) {
        let mut added = 0usize;
        let mut overridden = 0usize;

        for incoming in other.sections.values() {
            if !self.sections.contains_key(incoming.name()) {
                let mut section = Section::new(incoming.name());
                section.origin = Origin::Merged;
                section.comments_above = incoming.comments_above.clone();
                section.trailing_comments = incoming.trailing_comments.clone();
                self.sections.insert(incoming.name(), section);
            }

            let Some(target) = self.sections.get_mut(incoming.name()) else {
                continue;
            };

            for setting in incoming.settings() {
                match target.setting_mut(&setting.key) {
                    None => {
                        target.insert_setting(setting.merged_copy());
                        added += 1;
                    }
                    Some(existing) => {
                        if strategy == MergeStrategy::Override {
                            existing.overlay(setting.value.clone());
                            overridden += 1;
                        }
                    }
                }
            }
        }

        debug!(
            "merged with {:?}: {} settings added, {} overridden",
            strategy, added, overridden
        );
    }
}
