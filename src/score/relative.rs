// src/score/relative.rs
// =============================================================================
// Relative frequency table: article vocabulary next to a language baseline.
//
// Each row holds a word with
//   article_frequency  = count(word) / total occurrences in the store
//   baseline_frequency = frequency of the word in the language
// Either side may be undefined (None): a word the language baseline does
// not know, or a common language word the crawl never saw. None is kept
// distinct from 0.0, which would claim a measured zero.
//
// Two ranking modes:
// - Article:  the store's most frequent words, top N
// - Language: the baseline's top 2N words joined with the store, sorted by
//             baseline frequency, top N. Fetching 2N is only a cushion for
//             baseline words missing from the store; it does not guarantee
//             N rows with a defined article frequency.
//
// For display both columns are then scaled by their column maximum so the
// largest value in each is 1.0.
// =============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::FrequencyBaseline;
use crate::count::WordCount;

/// How rows are chosen and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
    /// By frequency in the crawled articles.
    Article,
    /// By frequency in the language baseline.
    Language,
}

impl FromStr for RankMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" => Ok(Self::Article),
            "language" => Ok(Self::Language),
            _ => Err(format!("Invalid mode: {}. Valid options: article, language", s)),
        }
    }
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMode::Article => f.write_str("article"),
            RankMode::Language => f.write_str("language"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub word: String,
    pub article_frequency: Option<f64>,
    pub baseline_frequency: Option<f64>,
}

/// Rows without display scaling.
pub fn raw_frequency_table(
    counts: &WordCount,
    baseline: &dyn FrequencyBaseline,
    language: &str,
    mode: RankMode,
    top_n: usize,
) -> Vec<FrequencyRow> {
    let total = counts.total();
    let article_frequency = |word: &str| -> Option<f64> {
        let n = counts.get(word);
        (total > 0 && n > 0).then(|| n as f64 / total as f64)
    };
    let baseline_frequency = |word: &str| -> Option<f64> {
        let f = baseline.frequency(word, language);
        (f > 0.0).then_some(f)
    };

    let mut rows: Vec<FrequencyRow> = match mode {
        RankMode::Article => counts
            .iter()
            .map(|(word, _)| FrequencyRow {
                word: word.to_string(),
                article_frequency: article_frequency(word),
                baseline_frequency: baseline_frequency(word),
            })
            .collect(),
        RankMode::Language => baseline
            .top_n(language, top_n.saturating_mul(2))
            .into_iter()
            .map(|word| FrequencyRow {
                article_frequency: article_frequency(&word),
                baseline_frequency: baseline_frequency(&word),
                word,
            })
            .collect(),
    };

    match mode {
        RankMode::Article => rows.sort_by(|a, b| {
            descending(a.article_frequency, b.article_frequency).then_with(|| a.word.cmp(&b.word))
        }),
        // Stable sort keeps the baseline's own order among equal values.
        RankMode::Language => {
            rows.sort_by(|a, b| descending(a.baseline_frequency, b.baseline_frequency))
        }
    }

    rows.truncate(top_n);
    rows
}

/// Rows scaled for display: each column divided by its maximum.
pub fn relative_frequency_table(
    counts: &WordCount,
    baseline: &dyn FrequencyBaseline,
    language: &str,
    mode: RankMode,
    top_n: usize,
) -> Vec<FrequencyRow> {
    let mut rows = raw_frequency_table(counts, baseline, language, mode, top_n);
    normalize(&mut rows);
    rows
}

/// Divides both frequency columns by their column maximum (scale 0-1).
///
/// Undefined cells stay undefined; a column whose maximum is 0 or that
/// has no defined values is left as is.
pub fn normalize(rows: &mut [FrequencyRow]) {
    let article_max = column_max(rows.iter().map(|r| r.article_frequency));
    let baseline_max = column_max(rows.iter().map(|r| r.baseline_frequency));

    for row in rows.iter_mut() {
        if let Some(max) = article_max {
            row.article_frequency = row.article_frequency.map(|f| f / max);
        }
        if let Some(max) = baseline_max {
            row.baseline_frequency = row.baseline_frequency.map(|f| f / max);
        }
    }
}

fn column_max(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values
        .flatten()
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
        .filter(|max| *max > 0.0)
}

// Descending by value, undefined last.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
