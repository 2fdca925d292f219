// src/count/counts.rs
// =============================================================================
// WordCount: word -> number of occurrences.
//
// The same type is used for the delta produced by one article and for the
// accumulated totals in the store. A BTreeMap keeps the persisted JSON
// sorted by word, which makes the store file diff-friendly.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCount(BTreeMap<String, u64>);

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` occurrences of `word`.
    pub fn add(&mut self, word: impl Into<String>, n: u64) {
        *self.0.entry(word.into()).or_insert(0) += n;
    }

    /// Adds every count in `other` to this one, key by key.
    ///
    /// No deduplication: merging the same delta twice counts it twice.
    pub fn merge(&mut self, other: &WordCount) {
        for (word, n) in &other.0 {
            *self.0.entry(word.clone()).or_insert(0) += n;
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.0.get(word).copied().unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains_key(word)
    }

    /// Sum of all occurrences.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(word, n)| (word.as_str(), *n))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordCount {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = WordCount::new();
        for (word, n) in iter {
            counts.add(word, n);
        }
        counts
    }
}
