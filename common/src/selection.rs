//! Active facet selections, per facet group.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Lowercases and trims a slug so it matches how facet buckets report slugs.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Group key to selected slugs.
///
/// Each group behaves as a set: inserting a slug twice keeps one copy. The
/// insertion order is kept for rendering chips but equality ignores it, and a
/// group with no slugs is equal to an absent group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionMap {
    groups: BTreeMap<String, Vec<String>>,
}

impl PartialEq for SelectionMap {
    fn eq(&self, other: &Self) -> bool {
        self.as_sets() == other.as_sets()
    }
}

impl Eq for SelectionMap {}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups<'a>(groups: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        let mut map = Self::new();
        for (group, slugs) in groups {
            map.set_group(group, slugs);
        }
        map
    }

    fn as_sets(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        self.groups
            .iter()
            .filter(|(_, slugs)| !slugs.is_empty())
            .map(|(group, slugs)| (group.as_str(), slugs.iter().map(String::as_str).collect()))
            .collect()
    }

    pub fn get(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, group: &str, slug: &str) -> bool {
        let slug = normalize_slug(slug);
        self.get(group).iter().any(|selected| *selected == slug)
    }

    pub fn has_any(&self, group: &str) -> bool {
        !self.get(group).is_empty()
    }

    /// True when no group holds a slug.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    pub fn insert(&mut self, group: &str, slug: &str) -> bool {
        let slug = normalize_slug(slug);
        if slug.is_empty() {
            return false;
        }
        let entry = self.groups.entry(group.to_string()).or_default();
        if entry.contains(&slug) {
            return false;
        }
        entry.push(slug);
        true
    }

    pub fn remove(&mut self, group: &str, slug: &str) -> bool {
        let slug = normalize_slug(slug);
        let Some(entry) = self.groups.get_mut(group) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|selected| *selected != slug);
        let removed = entry.len() != before;
        if entry.is_empty() {
            self.groups.remove(group);
        }
        removed
    }

    /// Adds the slug if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, group: &str, slug: &str) -> bool {
        if self.contains(group, slug) {
            self.remove(group, slug);
            false
        } else {
            self.insert(group, slug)
        }
    }

    /// Replaces a group's slugs, normalizing and deduplicating them.
    pub fn set_group<S: AsRef<str>>(&mut self, group: &str, slugs: impl IntoIterator<Item = S>) {
        self.groups.remove(group);
        for slug in slugs {
            self.insert(group, slug.as_ref());
        }
    }

    pub fn clear_group(&mut self, group: &str) {
        self.groups.remove(group);
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Non-empty groups with their slugs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .filter(|(_, slugs)| !slugs.is_empty())
            .map(|(group, slugs)| (group.as_str(), slugs.as_slice()))
    }
}
