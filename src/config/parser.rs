use crate::config::types::CrawlConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates a configuration from a JSON string
///
/// Useful when the configuration does not live in a file, e.g. in tests.
pub fn parse_config(content: &str) -> Result<CrawlConfig, ConfigError> {
    let config: CrawlConfig = serde_json::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is used to tell apart crawl runs made with different configurations.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(CrawlConfig, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"{
        "startPages": ["https://example.com/"],
        "ignoredUrls": [".*\\.pdf$"],
        "ignoredWords": ["^.{1,3}$"],
        "parallelism": 4,
        "maxDepth": 2,
        "timeoutSeconds": 10,
        "popularWordCount": 5,
        "resultPath": "crawl-results.json"
    }"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.start_pages, vec!["https://example.com/"]);
        assert_eq!(config.ignored_urls, vec![".*\\.pdf$"]);
        assert_eq!(config.parallelism, Some(4));
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.popular_word_count, 5);
        assert_eq!(config.result_path.as_deref(), Some("crawl-results.json"));
        assert_eq!(config.profile_output_path, None);
    }

    #[test]
    fn test_optional_fields_default() {
        let config = parse_config(
            r#"{"maxDepth": 1, "timeoutSeconds": 2, "popularWordCount": 3}"#,
        )
        .unwrap();

        assert!(config.start_pages.is_empty());
        assert!(config.ignored_urls.is_empty());
        assert!(config.ignored_words.is_empty());
        assert_eq!(config.parallelism, None);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_json() {
        let file = create_temp_config("this is not valid JSON {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"{
            "maxDepth": 2,
            "timeoutSeconds": 0,
            "popularWordCount": 5
        }"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        // Same content should produce same hash
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex characters
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
