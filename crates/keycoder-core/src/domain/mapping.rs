//! Character to key code mapping for the active keyboard layout.
//!
//! A [`KeyCodeMap`] answers "which key do I press to type `é`?" for one
//! specific keyboard layout.  It is rebuilt from scratch every time it is
//! requested and is never cached: switching from US to Dvorak makes any
//! previously built map stale.
//!
//! # Invariant
//!
//! A map never contains a layout-invariant key code (`65..=92`).  The
//! insertion API refuses those codes, so there is no way to build a map
//! that violates this.

use std::collections::BTreeMap;

use serde::Serialize;

use super::keycode::{dynamic_key_codes, KeyCode, LAYOUT_INVARIANT_CODES};

/// Mapping from the string a key types to the key code that types it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyCodeMap {
    entries: BTreeMap<String, KeyCode>,
}

impl KeyCodeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map by translating every layout-dependent key code.
    ///
    /// `translate` is called once per code from [`dynamic_key_codes`], in
    /// ascending order.  Returning `None` (or an empty string) leaves the
    /// code out of the map.  When two codes produce the same string, the
    /// higher code wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use keycoder_core::KeyCodeMap;
    ///
    /// let map = KeyCodeMap::build(|code| (code == 0).then(|| "a".to_string()));
    /// assert_eq!(map.get("a"), Some(0));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn build<F>(mut translate: F) -> Self
    where
        F: FnMut(KeyCode) -> Option<String>,
    {
        let mut map = Self::new();
        for code in dynamic_key_codes() {
            if let Some(text) = translate(code) {
                map.insert_translation(text, code);
            }
        }
        map
    }

    /// Records that `key_code` types `text`.
    ///
    /// Returns `false` and leaves the map unchanged when `text` is empty or
    /// `key_code` is layout-invariant.  An existing entry for `text` is
    /// overwritten.
    pub fn insert_translation(&mut self, text: impl Into<String>, key_code: KeyCode) -> bool {
        let text = text.into();
        if text.is_empty() || LAYOUT_INVARIANT_CODES.contains(&key_code) {
            return false;
        }
        self.entries.insert(text, key_code);
        true
    }

    /// Returns the key code that types `text`, if any.
    pub fn get(&self, text: &str) -> Option<KeyCode> {
        self.entries.get(text).copied()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Reverse lookup: the string typed by `key_code`, if it is in the map.
    ///
    /// This is a linear scan; maps hold at most 99 entries.
    pub fn char_for_code(&self, key_code: KeyCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, &code)| code == key_code)
            .map(|(text, _)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(text, key_code)` pairs in lexical order of `text`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, KeyCode)> {
        self.entries.iter().map(|(text, &code)| (text.as_str(), code))
    }

    /// Entries sorted by key code, the order a keyboard scan produces.
    pub fn sorted_by_code(&self) -> Vec<(&str, KeyCode)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by_key(|&(text, code)| (code, text));
        pairs
    }
}

impl<'a> IntoIterator for &'a KeyCodeMap {
    type Item = (&'a String, &'a KeyCode);
    type IntoIter = std::collections::btree_map::Iter<'a, String, KeyCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
