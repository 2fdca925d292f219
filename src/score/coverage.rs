// src/score/coverage.rs
// =============================================================================
// Coverage score: what share of the observed words a language "knows".
//
//   score = occurrences of words in the reference set
//           / all occurrences * 100
//
// If a text is written in a language, most of its running words should be
// among that language's most common words, so a high score against the
// top-k list of a language suggests the text is in that language.
// =============================================================================

use std::collections::HashSet;

use super::FrequencyBaseline;
use crate::count::WordCount;

/// Percentage (0-100) of word occurrences in `counts` whose word is in
/// `reference`. Empty counts score exactly 0.0.
pub fn coverage_score(counts: &WordCount, reference: &HashSet<String>) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 0.0;
    }

    let covered: u64 = counts
        .iter()
        .filter(|(word, _)| reference.contains(*word))
        .map(|(_, n)| n)
        .sum();

    covered as f64 / total as f64 * 100.0
}

/// Coverage of `counts` by the `top_k` most frequent words of `language`.
pub fn coverage_against(
    counts: &WordCount,
    baseline: &dyn FrequencyBaseline,
    language: &str,
    top_k: usize,
) -> f64 {
    let reference: HashSet<String> = baseline.top_n(language, top_k).into_iter().collect();
    coverage_score(counts, &reference)
}
