use crate::ordered_map::CaseInsensitiveMap;
use crate::types::{Origin, Setting, Value};

/// A named group of settings.
///
/// The default section has an empty name and holds settings that appear before
/// any header.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    settings: CaseInsensitiveMap<Setting>,
    /// Full comment lines rendered just above the header
    pub(crate) comments_above: Vec<String>,
    /// Full comment lines rendered after the last setting
    pub(crate) trailing_comments: Vec<String>,
    pub(crate) origin: Origin,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: CaseInsensitiveMap::new(),
            comments_above: Vec::new(),
            trailing_comments: Vec::new(),
            origin: Origin::Owned,
        }
    }

    /// The name as first seen
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_merged(&self) -> bool {
        self.origin == Origin::Merged
    }

    pub fn comments_above(&self) -> &[String] {
        &self.comments_above
    }

    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    /// Value of a key. Key-only entries and missing keys both read as `None`;
    /// use [`Section::get_raw`] to tell them apart.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|s| s.value.as_deref())
    }

    /// `None` if the key is absent, otherwise its value
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.settings.get(key).map(|s| &s.value)
    }

    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.settings.get(key)
    }

    pub(crate) fn setting_mut(&mut self, key: &str) -> Option<&mut Setting> {
        self.settings.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys()
    }

    /// Settings in first-seen order
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Upsert through the mutation API. The setting, and the section holding it,
    /// become owned.
    pub(crate) fn set(&mut self, key: &str, value: Value) {
        self.origin = Origin::Owned;
        match self.settings.get_mut(key) {
            Some(setting) => setting.assign(value),
            None => {
                self.settings.insert(key, Setting::new(key, value));
            }
        }
    }

    /// Remove a single setting
    pub fn remove(&mut self, key: &str) -> Option<Setting> {
        self.settings.remove(key)
    }

    /// Upsert a setting read from source text
    pub(crate) fn upsert_parsed(
        &mut self,
        key: &str,
        value: Value,
        comments_above: Vec<String>,
        inline_comment: Option<String>,
    ) {
        let setting = self
            .settings
            .get_or_insert_with(key, || Setting::new(key, None));
        setting.assign(value);
        setting.comments_above.extend(comments_above);
        if inline_comment.is_some() {
            setting.inline_comment = inline_comment;
        }
    }

    /// Insert a setting as-is (used by merges)
    pub(crate) fn insert_setting(&mut self, setting: Setting) {
        self.settings.insert(setting.key.clone(), setting);
    }

    /// Move every setting and comment of `other` into this section; incoming
    /// values win.
    pub(crate) fn absorb(&mut self, other: Section) {
        self.comments_above.extend(other.comments_above);
        self.trailing_comments.extend(other.trailing_comments);
        for setting in other.settings.values() {
            self.settings.insert(setting.key.clone(), setting.clone());
        }
        if other.origin == Origin::Owned {
            self.origin = Origin::Owned;
        }
    }

    /// Forget settings and comments
    pub(crate) fn clear(&mut self) {
        self.settings.clear();
        self.comments_above.clear();
        self.trailing_comments.clear();
    }

    /// Whether any setting would be written under default persistence
    pub(crate) fn has_owned_settings(&self) -> bool {
        self.settings.values().any(|s| s.origin == Origin::Owned)
    }
}
