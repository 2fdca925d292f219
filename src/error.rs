// src/error.rs
// =============================================================================
// Error types for the crawl / count / score core.
//
// Each layer gets its own enum so callers can tell a local failure (one
// article could not be fetched) from a fatal one (the word-count store
// could not be written):
//
// - FetchError:    one article failed; the crawl logs it and moves on
// - StoreError:    reading or writing persisted counts failed; fatal for
//                  the merge and surfaced to the caller
// - BaselineError: the frequency baseline could not be loaded
// - ConfigError:   invalid crawl or source configuration
// - CrawlError:    what actually stops a crawl (store or config failure)
//
// The binary wraps all of these in anyhow::Error at the edge.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve one article from a page source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The article does not exist (HTTP 404 or missing offline file).
    #[error("article not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection, DNS, TLS and other transport failures.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be turned into a page (bad URL, undecodable body).
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The page has no article content container, so there is neither
    /// text to count nor links to follow.
    #[error("no article content in {0}")]
    EmptyContent(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Failure to load or persist the accumulated word counts.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("word-count store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store exists but is not a JSON object of word -> count.
    #[error("word-count store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to load a frequency baseline.
#[derive(Error, Debug)]
pub enum BaselineError {
    #[error("failed to read baseline {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("baseline {path} is not a JSON object of word -> frequency: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("frequency {frequency} for '{word}' is outside [0, 1]")]
    OutOfRange { word: String, frequency: f64 },
}

/// Invalid configuration, detected before any request is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("crawl concurrency must be greater than 0, got {0}")]
    InvalidConcurrency(usize),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid content selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid seed article '{0}'")]
    InvalidSeed(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors that abort a whole crawl.
///
/// Single-article failures never show up here; they are recorded in the
/// crawl report instead.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
