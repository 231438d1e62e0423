//! Ordered frequency counts used for chart datasets.
//!
//! Keys keep first-seen order: the engine does not impose chronological or
//! alphabetical order on chart labels. Consumers that want sorted labels call
//! [`CountSeries::sorted_by_key`] or [`CountSeries::sorted_by_count`].

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered `key -> count` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSeries {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CountSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`.
    pub fn bump(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Add `count` occurrences of `key`, appending the key if unseen.
    pub fn add(&mut self, key: &str, count: usize) {
        if let Some(&pos) = self.index.get(key) {
            self.entries[pos].1 += count;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), count));
        }
    }

    /// Fold another partial series into this one.
    ///
    /// Counts are summed per key. Keys new to `self` are appended in
    /// `other`'s order, so merging shards in input order reproduces the
    /// first-seen order of a single pass.
    pub fn merge(&mut self, other: &Self) {
        for (key, count) in &other.entries {
            self.add(key, *count);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, count)| *count)
    }

    /// Entries ordered by key ascending. For month keys this is chronological.
    #[must_use]
    pub fn sorted_by_key(&self) -> Vec<(&str, usize)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable_by(|(ka, _), (kb, _)| ka.cmp(kb));
        rows
    }

    /// Entries ordered by count descending, ties broken by key ascending.
    #[must_use]
    pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));
        rows
    }
}

impl<'a> FromIterator<&'a str> for CountSeries {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut series = Self::new();
        for key in iter {
            series.bump(key);
        }
        series
    }
}

/// Serializes as a JSON object whose key order is the first-seen order.
impl Serialize for CountSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
