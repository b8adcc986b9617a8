//! Parallel crawl engine
//!
//! Orchestrates the concurrent recursive traversal: one task per URL,
//! children spawned per outbound link and joined by their parent before it
//! completes. Policy checks (depth, deadline, skip patterns, dedup) happen
//! at task entry; parser failures are contained to the task that hit them.

use crate::config::CrawlConfig;
use crate::crawler::arena::CrawlArena;
use crate::output::CrawlResult;
use crate::page::PageParser;
use crate::ranking::rank;
use crate::PolicyError;
use futures::future::BoxFuture;
use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Immutable crawl parameters, fixed at engine construction
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// Wall-clock budget for a whole `crawl` call
    pub timeout: Duration,

    /// Maximum link depth from the seeds
    pub max_depth: u32,

    /// How many ranked words to return
    pub popular_word_count: usize,

    /// A URL fully matching any of these is never processed
    pub skip_patterns: Vec<Regex>,

    /// Requested number of concurrent parser invocations
    pub parallelism: usize,
}

impl CrawlPolicy {
    /// Builds a policy from a loaded configuration
    ///
    /// Skip patterns are anchored so a URL has to match in full, and an
    /// absent parallelism falls back to the host's available concurrency.
    pub fn from_config(config: &CrawlConfig) -> Result<Self, PolicyError> {
        let skip_patterns = config
            .ignored_urls
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                    PolicyError::InvalidSkipPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            skip_patterns,
            parallelism: config.parallelism.unwrap_or_else(available_parallelism),
        })
    }
}

/// Concurrent recursive web crawler
///
/// Owns the parser collaborator and the parallelism limiter; per-crawl
/// state lives in a fresh [`CrawlArena`] for each `crawl` call, so
/// invocations never share or leak state.
pub struct CrawlEngine {
    parser: Arc<dyn PageParser>,
    policy: CrawlPolicy,
    limiter: Arc<Semaphore>,
}

impl std::fmt::Debug for CrawlEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlEngine")
            .field("policy", &self.policy)
            .field("limiter", &self.limiter)
            .finish()
    }
}

impl CrawlEngine {
    /// Creates an engine, validating construction-time parameters
    ///
    /// Fails on a non-positive timeout or zero parallelism. The effective
    /// parallelism is capped at the host's available concurrency no matter
    /// how much was requested.
    pub fn new(parser: Arc<dyn PageParser>, policy: CrawlPolicy) -> Result<Self, PolicyError> {
        if policy.timeout.is_zero() {
            return Err(PolicyError::NonPositiveTimeout);
        }
        if policy.parallelism == 0 {
            return Err(PolicyError::ZeroParallelism);
        }

        let permits = policy.parallelism.min(available_parallelism()).max(1);
        Ok(Self {
            parser,
            policy,
            limiter: Arc::new(Semaphore::new(permits)),
        })
    }

    /// The number of parser invocations that may run at once
    pub fn effective_parallelism(&self) -> usize {
        self.limiter.available_permits()
    }

    /// Crawls from the given seeds and returns the ranked word counts
    /// together with the number of distinct URLs visited
    ///
    /// The deadline is computed once, here; every task checks it before
    /// doing any work. An empty seed list is valid and yields an empty
    /// result. This call itself never fails: per-URL trouble is logged
    /// and contained inside the task that hit it.
    pub async fn crawl(&self, seeds: Vec<String>) -> CrawlResult {
        let deadline = Instant::now() + self.policy.timeout;
        self.crawl_until(seeds, deadline).await
    }

    async fn crawl_until(&self, seeds: Vec<String>, deadline: Instant) -> CrawlResult {
        tracing::info!("Starting crawl with {} seed URLs", seeds.len());
        let started = Instant::now();

        let shared = Arc::new(CrawlShared {
            parser: Arc::clone(&self.parser),
            skip_patterns: self.policy.skip_patterns.clone(),
            limiter: Arc::clone(&self.limiter),
            deadline,
            arena: CrawlArena::new(),
        });

        let mut roots = JoinSet::new();
        for seed in seeds {
            roots.spawn(visit(Arc::clone(&shared), seed, self.policy.max_depth));
        }
        while let Some(joined) = roots.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Seed task failed: {}", e);
            }
        }

        let word_counts = rank(
            &shared.arena.counts_snapshot(),
            self.policy.popular_word_count,
        );
        let urls_visited = shared.arena.visited_count();

        tracing::info!(
            "Crawl complete: {} URLs visited in {:?}",
            urls_visited,
            started.elapsed()
        );

        CrawlResult {
            word_counts,
            urls_visited,
        }
    }
}

/// State shared by reference with every task of one crawl invocation
struct CrawlShared {
    parser: Arc<dyn PageParser>,
    skip_patterns: Vec<Regex>,
    limiter: Arc<Semaphore>,
    deadline: Instant,
    arena: CrawlArena,
}

impl CrawlShared {
    /// The per-task policy gate
    ///
    /// Order matters: the visited-set insert comes last so a URL rejected
    /// by depth, deadline, or a skip pattern is never counted as visited.
    /// The insert itself is atomic; of two tasks racing on one URL exactly
    /// one sees true here.
    fn should_process(&self, url: &str, depth_left: u32) -> bool {
        if depth_left == 0 {
            return false;
        }
        if Instant::now() > self.deadline {
            tracing::debug!("Deadline passed, skipping {}", url);
            return false;
        }
        if self.skip_patterns.iter().any(|p| p.is_match(url)) {
            tracing::debug!("Skip pattern matched, skipping {}", url);
            return false;
        }
        self.arena.mark_visited(url)
    }
}

/// One crawl task: process `url`, then fan out to its outbound links and
/// wait for that whole subtree
///
/// Boxed because the future recurses through `JoinSet::spawn`.
fn visit(shared: Arc<CrawlShared>, url: String, depth_left: u32) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if !shared.should_process(&url, depth_left) {
            return;
        }

        // The permit only spans the parser call: no lock or permit is held
        // while merging counts or waiting on children, so bounded permits
        // and recursive joins cannot starve each other.
        let fetched = {
            let Ok(_permit) = shared.limiter.acquire().await else {
                return;
            };
            shared.parser.parse(&url).await
        };

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                // The URL stays visited; it just contributes nothing.
                tracing::warn!("Failed to parse {}: {}", url, e);
                return;
            }
        };

        tracing::debug!(
            "Processed {} ({} words, {} links)",
            url,
            page.word_counts.len(),
            page.links.len()
        );
        shared.arena.merge_counts(&page.word_counts);

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(visit(Arc::clone(&shared), link, depth_left - 1));
        }
        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Crawl task below {} failed: {}", url, e);
            }
        }
    })
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
