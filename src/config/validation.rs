use crate::config::types::CrawlConfig;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_bounds(config)?;
    validate_seed_urls(&config.start_pages)?;
    validate_patterns("ignoredUrls", &config.ignored_urls)?;
    validate_patterns("ignoredWords", &config.ignored_words)?;
    Ok(())
}

/// Validates the numeric crawl bounds
fn validate_bounds(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeoutSeconds must be >= 1, got {}",
            config.timeout_seconds
        )));
    }

    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popularWordCount must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    if let Some(parallelism) = config.parallelism {
        if parallelism < 1 {
            return Err(ConfigError::Validation(
                "parallelism must be >= 1 when specified".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates that every seed is an absolute http(s) URL
fn validate_seed_urls(seeds: &[String]) -> Result<(), ConfigError> {
    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use the http or https scheme",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates that every entry in a pattern list compiles as a regex
fn validate_patterns(field: &str, patterns: &[String]) -> Result<(), ConfigError> {
    for pattern in patterns {
        if pattern.is_empty() {
            return Err(ConfigError::InvalidPattern(format!(
                "{} entries cannot be empty",
                field
            )));
        }

        Regex::new(pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("{} entry '{}': {}", field, pattern, e))
        })?;
    }

    Ok(())
}
