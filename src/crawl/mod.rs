// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the wiki.
//
// Features:
// - Breadth-first traversal from a seed article
// - Configurable depth limit
// - Polite crawling with a delay between requests
// - Optional bounded parallel fetching
// - Cancellation (Ctrl-C in the CLI) without corrupting the word counts
// =============================================================================

mod frontier;
mod queue;
mod throttle;

pub use frontier::{Frontier, FrontierEntry};
pub use queue::{CrawlConfig, CrawlReport, Crawler, Visit, VisitOutcome};
pub use throttle::Throttle;
