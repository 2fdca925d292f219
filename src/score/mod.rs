// src/score/mod.rs
// =============================================================================
// Scoring accumulated word counts against a language baseline.
//
// Submodules:
// - baseline: FrequencyBaseline trait and a JSON-backed implementation
// - coverage: share of word occurrences covered by a reference word set
// - relative: per-word article vs. language frequency tables
// =============================================================================

mod baseline;
mod coverage;
mod relative;

pub use baseline::{FrequencyBaseline, TableBaseline};
pub use coverage::{coverage_against, coverage_score};
pub use relative::{
    normalize, raw_frequency_table, relative_frequency_table, FrequencyRow, RankMode,
};
