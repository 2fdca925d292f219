// src/crawl/queue.rs
// =============================================================================
// Breadth-first crawl that feeds article words into the accumulator.
//
// How it works:
// 1. Start with the seed article at depth 0 in the frontier
// 2. Take the next entries from the head of the frontier and fetch them
// 3. Tokenize each page and merge its counts into the accumulator
// 4. If the entry is shallower than max_depth, enqueue its unseen links
//    at depth + 1
// 5. Sleep for the politeness delay, repeat until the frontier is empty
//
// Failures are local: an article that cannot be fetched is logged, kept in
// the report and skipped. Only a store failure or bad configuration stops
// the crawl.
//
// Concurrency:
// - with concurrency = 1 one article is completely processed before the
//   next fetch starts
// - with concurrency = n up to n fetches overlap, but their results are
//   still processed one by one in dequeue order, so the frontier and the
//   accumulator only ever have one writer
// - the Throttle spaces request starts by the delay either way
// =============================================================================

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use super::frontier::{Frontier, FrontierEntry};
use super::throttle::Throttle;
use crate::article::{article_links, ArticleId};
use crate::count::{tokenize, Accumulator, CountStore};
use crate::error::{ConfigError, CrawlError, FetchError, StoreError};
use crate::source::{Page, PageSource};

/// Crawl limits and pacing.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Links are followed from entries shallower than this. 0 = seed only.
    pub max_depth: usize,
    /// Pause between articles (and minimum spacing between request starts).
    pub delay: Duration,
    /// Maximum number of fetches in flight.
    pub concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            delay: Duration::from_millis(100),
            concurrency: 1,
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }
}

/// What happened to one processed article.
#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome {
    /// Words were merged into the store.
    Counted { words: usize, occurrences: u64 },
    /// The page had content but no words; nothing was merged.
    NoWords,
    /// The page could not be fetched; it was skipped.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Visit {
    pub article: ArticleId,
    pub depth: usize,
    pub outcome: VisitOutcome,
    /// New frontier entries discovered on this page.
    pub links_enqueued: usize,
}

/// Summary of a finished (or cancelled) crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Processed articles in processing order.
    pub visits: Vec<Visit>,
    pub cancelled: bool,
    /// Entries still queued (or in flight) when the crawl was cancelled.
    pub unprocessed: usize,
}

impl CrawlReport {
    /// Articles whose words were merged.
    pub fn counted(&self) -> usize {
        self.visits
            .iter()
            .filter(|v| matches!(v.outcome, VisitOutcome::Counted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.visits
            .iter()
            .filter(|v| matches!(v.outcome, VisitOutcome::Failed(_)))
            .count()
    }

    /// Word occurrences merged during this crawl.
    pub fn occurrences(&self) -> u64 {
        self.visits
            .iter()
            .map(|v| match v.outcome {
                VisitOutcome::Counted { occurrences, .. } => occurrences,
                _ => 0,
            })
            .sum()
    }
}

/// Crawls a page source breadth-first, merging word counts as it goes.
pub struct Crawler<'a, P: ?Sized, S> {
    source: &'a P,
    accumulator: &'a Accumulator<S>,
    config: CrawlConfig,
}

impl<'a, P, S> Crawler<'a, P, S>
where
    P: PageSource + ?Sized,
    S: CountStore,
{
    pub fn new(source: &'a P, accumulator: &'a Accumulator<S>, config: CrawlConfig) -> Self {
        Self {
            source,
            accumulator,
            config,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed` until the frontier is empty.
    pub async fn crawl(&self, seed: ArticleId) -> Result<CrawlReport, CrawlError> {
        self.crawl_with_cancellation(seed, CancellationToken::new()).await
    }

    /// Like `crawl`, but stops early when `cancel` fires.
    ///
    /// Fetches in flight at that moment are dropped. Everything merged
    /// before the cancellation stays merged; nothing is half-written.
    pub async fn crawl_with_cancellation(
        &self,
        seed: ArticleId,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        self.config.validate()?;

        tracing::info!(
            seed = %seed,
            max_depth = self.config.max_depth,
            concurrency = self.config.concurrency,
            "starting crawl"
        );

        let throttle = Throttle::new(self.config.delay);
        let mut frontier = Frontier::new(seed);
        let mut report = CrawlReport::default();

        while !frontier.is_empty() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let batch = frontier.pop_batch(self.config.concurrency);
            let batch_len = batch.len();

            let results = tokio::select! {
                _ = cancel.cancelled() => {
                    report.cancelled = true;
                    report.unprocessed += batch_len;
                    break;
                }
                results = self.fetch_batch(&batch, &throttle) => results,
            };

            for (entry, result) in batch.into_iter().zip(results) {
                let visit = self.process(entry, result, &mut frontier)?;
                report.visits.push(visit);
            }

            // Politeness delay before the next article
            if !frontier.is_empty() && !self.config.delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        report.cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.config.delay) => {}
                }
            }
        }

        report.unprocessed += frontier.len();

        tracing::info!(
            processed = report.visits.len(),
            counted = report.counted(),
            failed = report.failed(),
            discovered = frontier.visited_len(),
            cancelled = report.cancelled,
            "crawl finished"
        );
        Ok(report)
    }

    // Fetches the batch concurrently; results come back in batch order.
    async fn fetch_batch(
        &self,
        batch: &[FrontierEntry],
        throttle: &Throttle,
    ) -> Vec<Result<Page, FetchError>> {
        stream::iter(batch)
            .map(|entry| async move {
                throttle.wait().await;
                tracing::debug!(article = %entry.article, depth = entry.depth, "fetching");
                self.source.fetch(&entry.article).await
            })
            .buffered(self.config.concurrency)
            .collect()
            .await
    }

    fn process(
        &self,
        entry: FrontierEntry,
        result: Result<Page, FetchError>,
        frontier: &mut Frontier,
    ) -> Result<Visit, StoreError> {
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    article = %entry.article,
                    depth = entry.depth,
                    error = %e,
                    "skipping article"
                );
                return Ok(Visit {
                    article: entry.article,
                    depth: entry.depth,
                    outcome: VisitOutcome::Failed(e.to_string()),
                    links_enqueued: 0,
                });
            }
        };

        let counts = tokenize(&page.text);
        let outcome = if counts.is_empty() {
            tracing::info!(article = %entry.article, "no words found, nothing merged");
            VisitOutcome::NoWords
        } else {
            self.accumulator.merge(&counts)?;
            VisitOutcome::Counted {
                words: counts.len(),
                occurrences: counts.total(),
            }
        };

        let mut links_enqueued = 0;
        if entry.depth < self.config.max_depth {
            for link in article_links(page.links.iter().map(String::as_str)) {
                if frontier.push(link, entry.depth + 1) {
                    links_enqueued += 1;
                }
            }
        }

        tracing::info!(
            article = %entry.article,
            depth = entry.depth,
            links_enqueued,
            queued = frontier.len(),
            "processed article"
        );

        Ok(Visit {
            article: entry.article,
            depth: entry.depth,
            outcome,
            links_enqueued,
        })
    }
}
