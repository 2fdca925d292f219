// src/count/mod.rs
// =============================================================================
// Word counting and the persistent accumulator.
//
// Submodules:
// - counts:      WordCount, the word -> occurrences mapping
// - tokenize:    turns article text into a WordCount
// - store:       CountStore backends (JSON file, in-memory)
// - accumulator: merges deltas into a store, load -> add -> save
// =============================================================================

mod accumulator;
mod counts;
mod store;
mod tokenize;

pub use accumulator::Accumulator;
pub use counts::WordCount;
pub use store::{CountStore, JsonFileStore, MemoryStore, DEFAULT_STORE_FILE};
pub use tokenize::{tokenize, words};
