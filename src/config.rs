use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a crawl (spec.md §6 "Inputs"). Built by the
/// out-of-scope CLI/env layer and handed to the core as a finished
/// record — this crate never parses flags or environment variables
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Number of worker tasks. Default: host CPU count.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout", with = "duration_secs")]
    pub request_timeout: Duration,

    /// Exact-prefix exclusion list (spec.md §4.6).
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,

    /// User-Agent header sent with every fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Enables verbose (transient-error) logging.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            request_timeout: default_request_timeout(),
            exclude_prefixes: Vec::new(),
            user_agent: default_user_agent(),
            verbose: false,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; linkrover/0.1; +https://example.invalid/linkrover)".to_string()
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_workers_is_at_least_one() {
        assert!(CrawlConfig::default().workers >= 1);
    }

    #[test]
    fn default_request_timeout_is_ten_seconds() {
        assert_eq!(CrawlConfig::default().request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let config: CrawlConfig = serde_json::from_str("{}").unwrap();
        assert!(config.workers >= 1);
        assert!(!config.verbose);
        assert!(config.exclude_prefixes.is_empty());
    }
}
