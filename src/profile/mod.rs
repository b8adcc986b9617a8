//! Method timing facility
//!
//! A cross-cutting instrumentation concern, deliberately outside the crawl
//! algorithm: operations are timed where they are called, accumulated per
//! label, and dumped as a plain-text report headed by the run's start time.

use crate::page::{PageParser, ParsedPage};
use crate::PageError;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use dashmap::DashMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Accumulates call counts and cumulative wall time per labeled operation
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Local>,
    records: DashMap<String, OpRecord>,
}

#[derive(Debug, Clone, Copy, Default)]
struct OpRecord {
    calls: u64,
    total: Duration,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            records: DashMap::new(),
        }
    }

    /// Adds one elapsed sample for an operation; safe to call concurrently
    pub fn record(&self, operation: &str, elapsed: Duration) {
        let mut entry = self
            .records
            .entry(operation.to_string())
            .or_insert_with(OpRecord::default);
        entry.calls += 1;
        entry.total += elapsed;
    }

    /// Writes the report: a run header plus one line per operation
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let mut lines: Vec<(String, OpRecord)> = self
            .records
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        lines.sort_by(|a, b| a.0.cmp(&b.0));

        for (operation, record) in lines {
            writeln!(
                writer,
                "  {}: {} calls, total {:?}",
                operation, record.calls, record.total
            )?;
        }
        writeln!(writer)
    }

    /// Appends the report to a file, keeping earlier runs' reports intact
    pub fn append_report(&self, path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_report(&mut file)
    }
}

/// Decorator that times every `parse` call of the wrapped parser
pub struct ProfiledPageParser {
    inner: Arc<dyn PageParser>,
    profiler: Arc<Profiler>,
}

impl ProfiledPageParser {
    pub fn new(inner: Arc<dyn PageParser>, profiler: Arc<Profiler>) -> Self {
        Self { inner, profiler }
    }
}

#[async_trait]
impl PageParser for ProfiledPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, PageError> {
        let started = Instant::now();
        let result = self.inner.parse(url).await;
        self.profiler.record("PageParser::parse", started.elapsed());
        result
    }
}
