// src/count/tokenize.rs
// =============================================================================
// Word tokenizer.
//
// Text is lowercased, then every maximal run of word characters becomes a
// token. "Word characters" follow the regex crate's Unicode \w class:
// letters, digits, combining marks and connector punctuation like '_'.
// Everything else (spaces, punctuation, symbols) only separates tokens.
//
// The page source has already stripped scripts, styles and tables, so the
// tokenizer assumes it is looking at prose.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

use super::WordCount;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Lazily yields the lowercased word tokens of `text`, in order.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    // The lowercase form of a word character is still a word character,
    // so matching first and lowering each token gives the same runs.
    WORD.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Counts the word tokens of `text`.
///
/// Text without any word characters gives an empty count, not an error.
pub fn tokenize(text: &str) -> WordCount {
    let mut counts = WordCount::new();
    for word in words(text) {
        counts.add(word, 1);
    }
    counts
}
