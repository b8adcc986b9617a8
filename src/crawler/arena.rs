//! Shared per-crawl state
//!
//! One arena exists per `crawl` invocation and is shared by reference with
//! every task spawned from it. It owns the two points of mutual exclusion
//! in the whole crawl: the visited-set's check-and-insert and the per-word
//! count addition. Both stay safe under arbitrary interleavings; neither is
//! ever held across I/O.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Visited-set and word-count accumulator for one crawl invocation
#[derive(Debug, Default)]
pub struct CrawlArena {
    visited: DashSet<String>,
    counts: DashMap<String, u64>,
}

impl CrawlArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records `url` as visited
    ///
    /// Returns true iff the URL was not seen before. Two tasks racing on
    /// the same URL get exactly one true between them. Membership is
    /// permanent for the arena's lifetime.
    pub fn mark_visited(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Number of distinct URLs recorded as visited
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Merges a page's word counts into the accumulator
    ///
    /// Per-word addition; concurrent merges from sibling tasks lose nothing
    /// and the outcome is independent of merge order.
    pub fn merge_counts(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Snapshot of the accumulated counts
    ///
    /// Call after all tasks have joined; the copy is what the ranker sees.
    pub fn counts_snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
