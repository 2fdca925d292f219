// src/score/baseline.rs
// =============================================================================
// Reference word frequencies for a language.
//
// FrequencyBaseline is the scorer's view of a language corpus: how often a
// word occurs (a fraction in [0, 1]) and which words are the most common.
// A frequency of 0.0 means "the baseline does not know this word".
//
// TableBaseline is the bundled implementation: one language, loaded from a
// JSON object such as
//   { "the": 0.0537, "of": 0.0269, "and": 0.0251, ... }
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::BaselineError;

pub trait FrequencyBaseline {
    /// Frequency of `word` in `language`, 0.0 if unknown.
    fn frequency(&self, word: &str, language: &str) -> f64;

    /// The `n` most frequent words of `language`, most frequent first.
    fn top_n(&self, language: &str, n: usize) -> Vec<String>;
}

/// In-memory frequency table for a single language.
#[derive(Debug, Clone)]
pub struct TableBaseline {
    language: String,
    frequencies: HashMap<String, f64>,
    // Words sorted by frequency descending, ties by word.
    ranked: Vec<String>,
}

impl TableBaseline {
    pub fn new(
        language: impl Into<String>,
        frequencies: HashMap<String, f64>,
    ) -> Result<Self, BaselineError> {
        if let Some((word, &frequency)) = frequencies
            .iter()
            .find(|(_, f)| !(0.0..=1.0).contains(*f))
        {
            return Err(BaselineError::OutOfRange {
                word: word.clone(),
                frequency,
            });
        }

        let mut ranked: Vec<String> = frequencies.keys().cloned().collect();
        ranked.sort_by(|a, b| {
            frequencies[b]
                .partial_cmp(&frequencies[a])
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(b))
        });

        Ok(Self {
            language: language.into(),
            frequencies,
            ranked,
        })
    }

    pub fn from_pairs<'a>(
        language: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, BaselineError> {
        let frequencies = pairs.into_iter().map(|(w, f)| (w.to_lowercase(), f)).collect();
        Self::new(language, frequencies)
    }

    /// Loads a JSON object of word -> frequency.
    pub fn from_json_file(
        language: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, BaselineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let frequencies: HashMap<String, f64> =
            serde_json::from_str(&raw).map_err(|source| BaselineError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let frequencies = frequencies.into_iter().map(|(w, f)| (w.to_lowercase(), f)).collect();
        Self::new(language, frequencies)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl FrequencyBaseline for TableBaseline {
    fn frequency(&self, word: &str, language: &str) -> f64 {
        if language != self.language {
            return 0.0;
        }
        self.frequencies.get(word).copied().unwrap_or(0.0)
    }

    fn top_n(&self, language: &str, n: usize) -> Vec<String> {
        if language != self.language {
            return Vec::new();
        }
        self.ranked.iter().take(n).cloned().collect()
    }
}
