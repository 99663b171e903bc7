/// A setting value.
///
/// `None` is a key written without `=`; `Some("")` is `key=` with nothing after it.
pub type Value = Option<String>;

/// Where a section or setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Parsed from the document's own source or written through the mutation API
    #[default]
    Owned,
    /// Brought in by a merge; left out of default persistence
    Merged,
}

/// How [`IniDocument::merge`](crate::IniDocument::merge) treats keys present on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Only copy sections and keys this document lacks
    #[default]
    AddIfMissing,
    /// Incoming values replace what is read, while persistence keeps owned values
    Override,
}

/// What persistence writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistStrategy {
    /// Owned content only, with the owned value of keys a merge overrode
    #[default]
    ExcludeMerged,
    /// Everything currently readable, merged content included
    IncludeMerged,
}

/// A key and its value within a section, with attached comments
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    /// The key as first seen
    pub key: String,

    /// The value reads see
    pub value: Value,

    /// Full comment lines (delimiter included) rendered above the key
    pub comments_above: Vec<String>,

    /// Trailing comment text (delimiter excluded)
    pub inline_comment: Option<String>,

    /// Where this setting came from
    pub origin: Origin,

    /// The owned value an override merge replaced; this is what default persistence writes
    pub(crate) overridden: Option<Value>,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            comments_above: Vec::new(),
            inline_comment: None,
            origin: Origin::Owned,
            overridden: None,
        }
    }

    /// Whether the key is written without `=`
    pub fn is_key_only(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_merged(&self) -> bool {
        self.origin == Origin::Merged
    }

    /// Whether a merge replaced the value this setting persists
    pub fn is_overridden(&self) -> bool {
        self.overridden.is_some()
    }

    /// Value written by persistence under the given strategy
    pub fn persisted_value(&self, strategy: PersistStrategy) -> &Value {
        match (strategy, &self.overridden) {
            (PersistStrategy::ExcludeMerged, Some(original)) => original,
            _ => &self.value,
        }
    }

    /// Assign through the mutation API: the setting becomes owned and forgets
    /// any merge overlay.
    pub(crate) fn assign(&mut self, value: Value) {
        self.value = value;
        self.origin = Origin::Owned;
        self.overridden = None;
    }

    /// Apply an override merge
    pub(crate) fn overlay(&mut self, value: Value) {
        if self.origin == Origin::Owned && self.overridden.is_none() {
            self.overridden = Some(std::mem::replace(&mut self.value, value));
        } else {
            self.value = value;
        }
    }

    /// Copy of this setting tagged as merged-in
    pub(crate) fn merged_copy(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            comments_above: self.comments_above.clone(),
            inline_comment: self.inline_comment.clone(),
            origin: Origin::Merged,
            overridden: None,
        }
    }
}
