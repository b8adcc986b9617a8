//! Deterministic top-K ranking of aggregated word counts

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the `k` most popular words as a freshly ordered sequence
///
/// Ordering is total and independent of the map's iteration order:
/// 1. Higher count first
/// 2. Longer word first
/// 3. Lexicographically smaller word first
///
/// `k == 0` yields an empty sequence; fewer than `k` entries yields them all.
pub fn rank(counts: &HashMap<String, u64>, k: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();

    entries.sort_unstable_by(|a, b| compare(a, b));
    entries.truncate(k);
    entries
}

fn compare(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(&b.0))
}
