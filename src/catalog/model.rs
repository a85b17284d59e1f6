//! Catalog value types.
//!
//! Every map is a `BTreeMap`, so iteration and serialization follow
//! lexicographic key order without a separate sort step. The constructors
//! refuse empty groups; a `Catalog` assembled through them never holds an
//! empty `TopGroup` or `SubGroup`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Leaf identifier, unique within its (top-key, sub-key) scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogEntry(pub String);

impl CatalogEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogEntry {
    fn from(value: &str) -> Self {
        CatalogEntry(value.to_string())
    }
}

/// Sorted, non-empty list of leaves under one sub-key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubGroup {
    entries: Vec<CatalogEntry>,
}

impl SubGroup {
    /// Sort the entries and wrap them; `None` when there are none.
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        entries.sort();
        entries.dedup();
        Some(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries
            .binary_search_by(|entry| entry.as_str().cmp(identifier))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sub-key to leaves mapping for one top-key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopGroup {
    subs: BTreeMap<String, SubGroup>,
}

impl TopGroup {
    pub fn insert(&mut self, sub_key: String, group: SubGroup) {
        self.subs.insert(sub_key, group);
    }

    pub fn get(&self, sub_key: &str) -> Option<&SubGroup> {
        self.subs.get(sub_key)
    }

    /// Sub-keys in lexicographic order.
    pub fn sub_keys(&self) -> impl Iterator<Item = &str> {
        self.subs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubGroup)> {
        self.subs.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.subs.values().map(SubGroup::len).sum()
    }
}

/// The full two-level catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: BTreeMap<String, TopGroup>,
}

impl Catalog {
    /// Add a top-level group; empty groups are dropped and `false` is returned.
    pub fn insert(&mut self, top_key: String, group: TopGroup) -> bool {
        if group.is_empty() {
            return false;
        }
        self.groups.insert(top_key, group);
        true
    }

    pub fn get(&self, top_key: &str) -> Option<&TopGroup> {
        self.groups.get(top_key)
    }

    /// Resolve a (top-key, sub-key) pair.
    pub fn sub_group(&self, top_key: &str, sub_key: &str) -> Option<&SubGroup> {
        self.groups.get(top_key)?.get(sub_key)
    }

    /// Top-keys in lexicographic order.
    pub fn top_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopGroup)> {
        self.groups.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            top_keys: self.groups.len(),
            sub_keys: self.groups.values().map(TopGroup::len).sum(),
            leaves: self.groups.values().map(TopGroup::leaf_count).sum(),
        }
    }
}

/// Session-invariant counts shown next to the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub top_keys: usize,
    pub sub_keys: usize,
    pub leaves: usize,
}
