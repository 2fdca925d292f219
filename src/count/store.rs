// src/count/store.rs
// =============================================================================
// Persistence backends for accumulated word counts.
//
// A CountStore only has to do two things:
//   load()  -> the stored counts, or an empty WordCount if nothing is stored
//   save()  -> replace the stored counts atomically
//
// JsonFileStore keeps the counts in a pretty-printed JSON object. Writes go
// to a temporary file in the same directory which is then renamed over the
// target, so a crash mid-write leaves the previous file untouched.
//
// MemoryStore keeps everything in memory and is what the tests use.
// =============================================================================

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::WordCount;
use crate::error::StoreError;

/// Default file name of the word-count store.
pub const DEFAULT_STORE_FILE: &str = "word-counts.json";

/// Durable word -> count mapping.
pub trait CountStore: Send + Sync {
    /// Returns the stored counts, or an empty mapping if none were saved yet.
    fn load(&self) -> Result<WordCount, StoreError>;

    /// Atomically replaces the stored counts.
    fn save(&self, counts: &WordCount) -> Result<(), StoreError>;
}

/// Word counts stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

impl CountStore for JsonFileStore {
    fn load(&self) -> Result<WordCount, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(WordCount::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    fn save(&self, counts: &WordCount) -> Result<(), StoreError> {
        // "word-counts.json".parent() is Some(""), which is not a directory
        // tempfile can create files in.
        let parent_dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir).map_err(|e| self.io_error(e))?;

        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| self.io_error(e))?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, counts)
                .map_err(|e| self.io_error(std::io::Error::new(ErrorKind::Other, e)))?;
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        temp_file.as_file().sync_all().map_err(|e| self.io_error(e))?;

        temp_file.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        tracing::debug!(path = %self.path.display(), words = counts.len(), "word counts saved");
        Ok(())
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    counts: Mutex<Option<WordCount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `counts`, as if saved by an earlier run.
    pub fn with_counts(counts: WordCount) -> Self {
        Self { counts: Mutex::new(Some(counts)) }
    }

    /// Whether anything has ever been saved.
    pub fn is_saved(&self) -> bool {
        self.counts.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

impl CountStore for MemoryStore {
    fn load(&self) -> Result<WordCount, StoreError> {
        let guard = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, counts: &WordCount) -> Result<(), StoreError> {
        let mut guard = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(counts.clone());
        Ok(())
    }
}
