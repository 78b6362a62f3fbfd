//! YAML configuration for the completion API, the news fetch, and the store.
//!
//! Every section and field has a default, so an absent file, an empty file,
//! or a file that sets a single value are all valid:
//!
//! ```yaml
//! api:
//!   model: sonar-pro
//!   max_retries: 3
//! news:
//!   location: "ROME, ITALY"
//!   policy:
//!     overlap_threshold: 3
//! store:
//!   dir: ./news_store
//! ```

use crate::dedup::DedupPolicy;
use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

pub const DEFAULT_CHAT_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_LOCATION: &str = "NEW YORK, USA";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsConfig {
    pub api: ApiConfig,
    pub news: FetchConfig,
    pub store: StoreConfig,
}

/// Completion endpoint settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub model: String,
    pub temperature: f32,
    /// Reply budget for the news list.
    pub news_max_tokens: u32,
    /// Reply budget for a single-article summary.
    pub summary_max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            news_max_tokens: 2000,
            summary_max_tokens: 300,
            timeout_secs: 60,
            max_retries: 5,
            base_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub location: String,
    /// Filter repeated topics before saving.
    pub dedupe: bool,
    pub policy: DedupPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            dedupe: true,
            policy: DedupPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: "./news_store".to_string(),
        }
    }
}

/// Load configuration from `path`, or defaults when `path` is `None`.
#[instrument(level = "info")]
pub fn load_config(path: Option<&Path>) -> Result<NewsConfig, NewsError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(NewsConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| NewsError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&text)?;
    info!(path = %path.display(), model = %config.api.model, "Loaded configuration");
    Ok(config)
}

/// Parse a YAML document; an empty document yields the defaults.
pub fn parse_config(text: &str) -> Result<NewsConfig, NewsError> {
    if text.trim().is_empty() {
        return Ok(NewsConfig::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NewsConfig::default();
        assert_eq!(config.api.url, DEFAULT_CHAT_URL);
        assert_eq!(config.api.model, "sonar");
        assert_eq!(config.api.news_max_tokens, 2000);
        assert_eq!(config.api.summary_max_tokens, 300);
        assert_eq!(config.news.location, "NEW YORK, USA");
        assert!(config.news.dedupe);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), NewsConfig::default());
        assert_eq!(parse_config("  \n").unwrap(), NewsConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = parse_config(
            "api:\n  model: sonar-pro\nnews:\n  location: ROME, ITALY\n  policy:\n    overlap_threshold: 3\n",
        )
        .unwrap();
        assert_eq!(config.api.model, "sonar-pro");
        assert_eq!(config.api.max_retries, 5);
        assert_eq!(config.news.location, "ROME, ITALY");
        assert_eq!(config.news.policy.overlap_threshold, 3);
        assert_eq!(config.news.policy.topic_key_tokens, 3);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(parse_config("api: [1, 2"), Err(NewsError::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  dir: /tmp/elsewhere").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.store.dir, "/tmp/elsewhere");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, NewsError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_config_none() {
        assert_eq!(load_config(None).unwrap(), NewsConfig::default());
    }
}
