// src/count/accumulator.rs
// =============================================================================
// The accumulator merges per-article word counts into a durable store.
//
// merge() is load -> add -> save under a lock:
// - the store is read fresh on every merge, so counts written by an earlier
//   run (or another process between our merges) are never lost
// - the lock serializes merges coming from different tasks in this process
// - save() is an atomic overwrite, so either the old or the new totals are
//   on disk, never a mix
//
// Merging is additive, not idempotent: the same delta merged twice is
// counted twice. Visiting an article again in a later run adds its words
// again.
// =============================================================================

use std::sync::Mutex;

use super::{CountStore, WordCount};
use crate::error::StoreError;

pub struct Accumulator<S> {
    store: S,
    merge_lock: Mutex<()>,
}

impl<S: CountStore> Accumulator<S> {
    pub fn new(store: S) -> Self {
        Self { store, merge_lock: Mutex::new(()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current persisted totals (empty if nothing was saved yet).
    pub fn load(&self) -> Result<WordCount, StoreError> {
        self.store.load()
    }

    /// Replaces the persisted totals.
    pub fn save(&self, counts: &WordCount) -> Result<(), StoreError> {
        let _guard = self.merge_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.store.save(counts)
    }

    /// Adds `delta` to the persisted totals and returns the new totals.
    ///
    /// On error nothing has been written and `delta` is still owned by the
    /// caller, so it can be retried.
    pub fn merge(&self, delta: &WordCount) -> Result<WordCount, StoreError> {
        let _guard = self.merge_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut totals = self.store.load()?;
        totals.merge(delta);
        self.store.save(&totals)?;

        tracing::debug!(
            added_words = delta.len(),
            added_occurrences = delta.total(),
            total_words = totals.len(),
            "merged word counts"
        );
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    fn delta_a3() -> WordCount {
        [("a", 3)].into_iter().collect()
    }

    #[test]
    fn test_merge_twice_doubles_counts() {
        // Repeated merges are deliberately not deduplicated.
        let acc = Accumulator::new(MemoryStore::new());
        acc.merge(&delta_a3()).unwrap();
        acc.merge(&delta_a3()).unwrap();
        assert_eq!(acc.load().unwrap().get("a"), 6);
    }

    #[test]
    fn test_merge_into_existing_store() {
        let existing: WordCount = [("a", 1)].into_iter().collect();
        let acc = Accumulator::new(MemoryStore::with_counts(existing));
        acc.merge(&delta_a3()).unwrap();
        acc.merge(&delta_a3()).unwrap();
        assert_eq!(acc.load().unwrap().get("a"), 7);
    }

    #[test]
    fn test_merge_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("word-counts.json");

        Accumulator::new(JsonFileStore::new(&path)).merge(&delta_a3()).unwrap();

        // A fresh accumulator over the same file picks up the prior totals.
        let acc = Accumulator::new(JsonFileStore::new(&path));
        let totals = acc.merge(&[("b", 2)].into_iter().collect()).unwrap();
        assert_eq!(totals.get("a"), 3);
        assert_eq!(totals.get("b"), 2);
    }

    struct BrokenStore;

    impl CountStore for BrokenStore {
        fn load(&self) -> Result<WordCount, StoreError> {
            Ok(WordCount::new())
        }

        fn save(&self, _counts: &WordCount) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "broken".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }
    }

    #[test]
    fn test_save_failure_is_surfaced() {
        let acc = Accumulator::new(BrokenStore);
        let delta = delta_a3();
        let result = acc.merge(&delta);
        assert!(matches!(result, Err(StoreError::Io { .. })));
        // The caller still has the delta.
        assert_eq!(delta.get("a"), 3);
    }
}
