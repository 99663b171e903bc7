//! Insertion-ordered map with case-insensitive keys.
//!
//! Entries live in a `Vec` in the order they were first inserted; a side index maps
//! the trimmed, lowercased key to its position. The casing of the first insertion is
//! the one kept, later upserts under a differently cased key only replace the value.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

impl<V> CaseInsensitiveMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(&normalize(key))
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(&normalize(key)).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(&normalize(key)) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Insert or replace. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let normalized = normalize(&key);

        if let Some(&i) = self.index.get(&normalized) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }

        self.index.insert(normalized, self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Get the value for `key`, inserting one built by `make` if absent.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let normalized = normalize(key);
        let i = match self.index.get(&normalized) {
            Some(&i) => i,
            None => {
                self.index.insert(normalized, self.entries.len());
                self.entries.push((key.to_string(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self.index.remove(&normalize(key))?;
        let (_, value) = self.entries.remove(i);
        self.rebuild_index();
        Some(value)
    }

    /// Rename an entry in place; its position is kept. No-op if `from` is absent
    /// or `to` already names a different entry.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
        let to = to.into();
        let Some(&i) = self.index.get(&normalize(from)) else {
            return false;
        };
        if let Some(&j) = self.index.get(&normalize(&to)) {
            if i != j {
                return false;
            }
        }
        self.entries[i].0 = to;
        self.rebuild_index();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(normalize(key), i);
        }
    }
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
