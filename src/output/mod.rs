//! Crawl result rendering
//!
//! The result serializes as a JSON object with `wordCounts` (an ordered
//! mapping, rank order preserved) and `urlsVisited`. Serialization is
//! hand-written because a plain map would not keep the ranking order.

use crate::WordfallError;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The outcome of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Ranked (word, count) pairs, most popular first
    pub word_counts: Vec<(String, u64)>,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

/// Serializes ranked pairs as a JSON object, preserving their order
struct RankedWords<'a>(&'a [(String, u64)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Renders the result as a pretty JSON string
pub fn render_result(result: &CrawlResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Writes the result as pretty JSON to the given file path
pub fn write_result(result: &CrawlResult, path: &Path) -> Result<(), WordfallError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrawlResult {
        CrawlResult {
            word_counts: vec![("second".to_string(), 9), ("first".to_string(), 3)],
            urls_visited: 4,
        }
    }

    #[test]
    fn test_serializes_in_rank_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"wordCounts":{"second":9,"first":3},"urlsVisited":4}"#
        );
    }

    #[test]
    fn test_empty_result() {
        let result = CrawlResult {
            word_counts: vec![],
            urls_visited: 0,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"wordCounts":{},"urlsVisited":0}"#);
    }

    #[test]
    fn test_write_result_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");

        write_result(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["urlsVisited"], 4);
        assert_eq!(value["wordCounts"]["second"], 9);
    }
}
