use serde::Deserialize;

/// Crawl configuration, deserialized from a JSON document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlConfig {
    /// Seed URLs the crawl starts from
    #[serde(default)]
    pub start_pages: Vec<String>,

    /// Regular expressions; a URL fully matching one is never crawled
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word fully matching one is never counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Requested number of concurrent page fetches; defaults to the
    /// host's available concurrency when absent
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Maximum link depth from the seed URLs
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl, in seconds
    pub timeout_seconds: u64,

    /// How many of the most popular words to keep in the result
    pub popular_word_count: usize,

    /// Where to append the timing report; stdout when absent
    #[serde(default)]
    pub profile_output_path: Option<String>,

    /// Where to write the crawl result JSON; stdout when absent
    #[serde(default)]
    pub result_path: Option<String>,
}
