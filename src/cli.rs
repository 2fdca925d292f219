// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Subcommands:
//   summary  print the first paragraph of one article
//   count    count the words of one article into the store
//   crawl    breadth-first crawl from a seed article, counting every page
//   analyze  compare stored word frequencies with a language baseline
//   score    how much of the stored vocabulary a language's top words cover
//
// Options shared by all subcommands (store path, wiki URL, offline
// directory, timeout, verbosity) are declared `global` so they can go
// before or after the subcommand name.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use wiki_wordfreq::count::DEFAULT_STORE_FILE;
use wiki_wordfreq::source::DEFAULT_BASE_URL;
use wiki_wordfreq::RankMode;

#[derive(Parser, Debug)]
#[command(
    name = "wiki-wordfreq",
    version,
    about = "Crawl a wiki, count words, and compare them with a language",
    long_about = "wiki-wordfreq crawls a MediaWiki site breadth-first, accumulates word \
                  counts of every article it visits into a JSON store, and compares those \
                  counts with a reference word-frequency list for a language."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON file holding the accumulated word counts
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE, value_name = "FILE")]
    pub store: PathBuf,

    /// Article base URL of the wiki
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,

    /// Read articles from saved .html files in this directory instead of the network
    #[arg(long, global = true, value_name = "DIR")]
    pub offline_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the first paragraph of an article
    ///
    /// Example: wiki-wordfreq summary "Team Rocket"
    Summary {
        /// Article title
        phrase: String,
    },

    /// Count the words of one article and add them to the store
    ///
    /// Example: wiki-wordfreq count "Team Rocket"
    Count {
        /// Article title
        phrase: String,
    },

    /// Crawl breadth-first from an article and count every page reached
    ///
    /// Example: wiki-wordfreq crawl Lugia --depth 2 --wait 0.5
    Crawl {
        /// Title of the article to start from
        seed: String,

        /// How many links away from the seed to go (0 = seed only)
        #[arg(long, default_value_t = 1)]
        depth: usize,

        /// Seconds to wait between requests
        #[arg(long, default_value = "0.1", value_parser = parse_seconds, value_name = "SECS")]
        wait: Duration,

        /// Number of articles fetched at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Compare stored word frequencies with a language baseline
    ///
    /// Example: wiki-wordfreq analyze --mode article --count 20 --baseline en.json
    Analyze {
        /// Rank rows by frequency in the articles or in the language
        #[arg(long, value_name = "article|language")]
        mode: RankMode,

        /// Number of rows to show
        #[arg(long, value_name = "N")]
        count: usize,

        /// JSON object of word -> frequency for the language
        #[arg(long, value_name = "FILE")]
        baseline: PathBuf,

        /// Language tag of the baseline
        #[arg(long, default_value = "en")]
        lang: String,

        /// Output the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score how much of the stored text the language's top words cover
    ///
    /// Example: wiki-wordfreq score --baseline en.json --top-k 1000
    Score {
        /// JSON object of word -> frequency for the language
        #[arg(long, value_name = "FILE")]
        baseline: PathBuf,

        /// Language tag of the baseline
        #[arg(long, default_value = "en")]
        lang: String,

        /// Size of the reference set taken from the top of the baseline
        #[arg(long, default_value_t = 1000)]
        top_k: usize,
    },
}

// Durations are given in (fractional) seconds, as in "--wait 0.25".
fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw.parse().map_err(|_| format!("'{}' is not a number of seconds", raw))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("'{}' must be a non-negative number of seconds", raw));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("'{}' {}", raw, e))
}
