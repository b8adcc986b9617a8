//! Configuration loading and validation
//!
//! Crawl parameters arrive as a JSON document: seed URLs, skip patterns,
//! ignored words, depth/timeout/parallelism bounds, and output paths.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use types::CrawlConfig;
pub use validation::validate;
