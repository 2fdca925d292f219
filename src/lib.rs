//! Breadth-first wiki crawler that accumulates word frequencies and
//! compares them with a language baseline.
//!
//! The pieces fit together like this:
//!
//! - a [`PageSource`] hands out article text and links ([`WikiSource`] over
//!   HTTP, [`DirectorySource`] from saved pages)
//! - the [`Crawler`] walks the link graph breadth-first and tokenizes every
//!   article it reaches
//! - an [`Accumulator`] merges each article's [`WordCount`] into a durable
//!   [`CountStore`]
//! - the `score` functions compare the stored counts with a
//!   [`FrequencyBaseline`]

pub mod article;
pub mod count;
pub mod crawl;
pub mod error;
pub mod score;
pub mod source;

pub use article::{article_links, ArticleId};
pub use count::{tokenize, Accumulator, CountStore, JsonFileStore, MemoryStore, WordCount};
pub use crawl::{CrawlConfig, CrawlReport, Crawler, Visit, VisitOutcome};
pub use error::{BaselineError, ConfigError, CrawlError, FetchError, StoreError};
pub use score::{
    coverage_against, coverage_score, raw_frequency_table, relative_frequency_table,
    FrequencyBaseline, FrequencyRow, RankMode, TableBaseline,
};
pub use source::{DirectorySource, Page, PageSource, SourceConfig, WikiSource};
