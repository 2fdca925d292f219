// src/crawl/frontier.rs
// =============================================================================
// The BFS frontier: a FIFO queue of (article, depth) plus the visited set.
//
// Invariants:
// - an article is inserted into `visited` when it is enqueued, not when it
//   is processed, so it can never be enqueued twice
// - entries are appended at depth+1 of the entry being processed, so the
//   queue is always sorted by depth and pops come out breadth-first
//
// Both structures live only as long as one crawl.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use crate::article::ArticleId;

/// One article waiting to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub article: ArticleId,
    /// Link distance from the seed (0 for the seed).
    pub depth: usize,
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<ArticleId>,
}

impl Frontier {
    pub fn new(seed: ArticleId) -> Self {
        let mut visited = HashSet::new();
        visited.insert(seed.clone());

        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry { article: seed, depth: 0 });

        Self { queue, visited }
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Takes up to `n` entries from the head of the queue.
    pub fn pop_batch(&mut self, n: usize) -> Vec<FrontierEntry> {
        let n = n.min(self.queue.len());
        self.queue.drain(..n).collect()
    }

    /// Enqueues `article` at `depth` unless it was seen before.
    ///
    /// Returns true if it was enqueued.
    pub fn push(&mut self, article: ArticleId, depth: usize) -> bool {
        if !self.visited.insert(article.clone()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { article, depth });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Entries still waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Articles ever enqueued in this crawl, including processed ones.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, article: &ArticleId) -> bool {
        self.visited.contains(article)
    }
}
