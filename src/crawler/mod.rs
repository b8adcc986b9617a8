//! Crawl orchestration
//!
//! The engine drives the concurrent recursive traversal; the arena holds
//! the per-invocation shared state every task mutates.

mod arena;
mod engine;

pub use arena::CrawlArena;
pub use engine::{CrawlEngine, CrawlPolicy};
