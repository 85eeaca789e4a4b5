//! Feed list configuration.
//!
//! Read from `~/.config/feedbell/feeds.toml` unless a path is given:
//!
//! ```toml
//! workers = 10
//! sort_items = false
//!
//! [[feeds]]
//! url = "https://blog.rust-lang.org/feed.xml"
//! notify_endpoint = "https://ntfy.sh/rust-blog"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::domain::FeedDescriptor;
use crate::poller::DEFAULT_WORKERS;
use crate::watermark::ItemOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maximum number of feeds processed at the same time.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Sort each feed's items oldest-first before looking for new ones.
    #[serde(default)]
    pub sort_items: bool,
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    #[serde(alias = "ntfy_topic")]
    pub notify_endpoint: String,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Config {
    /// Load and validate the configuration at `path`, or at the default
    /// location when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => expand_tilde(p),
            None => Self::default_config_path()?,
        };

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/feedbell/feeds.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedbell").join("feeds.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds.is_empty() {
            return Err(ConfigError::Invalid("no feeds configured".to_string()));
        }

        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }

        for feed in &self.feeds {
            check_http_url("url", &feed.url)?;
            check_http_url("notify_endpoint", &feed.notify_endpoint)?;
        }

        Ok(())
    }

    pub fn item_order(&self) -> ItemOrder {
        if self.sort_items {
            ItemOrder::Chronological
        } else {
            ItemOrder::AsPublished
        }
    }

    /// Turn the feed list into descriptors whose watermark is `now`, so only
    /// items published after startup are ever notified.
    pub fn descriptors(&self, now: DateTime<Utc>) -> Vec<FeedDescriptor> {
        self.feeds
            .iter()
            .map(|f| FeedDescriptor::new(f.url.clone(), f.notify_endpoint.clone(), now))
            .collect()
    }
}

fn check_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{} {:?} is not a valid URL: {}", field, value, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{} {:?} uses unsupported scheme {:?}",
            field, value, other
        ))),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"
workers = 4
sort_items = true

[[feeds]]
url = "https://blog.rust-lang.org/feed.xml"
notify_endpoint = "https://ntfy.sh/rust-blog"

[[feeds]]
url = "https://example.com/atom.xml"
ntfy_topic = "https://ntfy.example.com/example"
"#;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.workers, 4);
        assert_eq!(config.item_order(), ItemOrder::Chronological);
        assert_eq!(
            config.feeds[1],
            FeedConfig {
                url: "https://example.com/atom.xml".into(),
                notify_endpoint: "https://ntfy.example.com/example".into(),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let content = r#"
[[feeds]]
url = "https://example.com/feed.xml"
notify_endpoint = "https://ntfy.sh/topic"
"#;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.item_order(), ItemOrder::AsPublished);
    }

    #[test]
    fn test_descriptors_share_initial_watermark() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let feeds = config.descriptors(now);

        assert_eq!(feeds.len(), 2);
        assert!(feeds.iter().all(|f| f.watermark == now));
        assert_eq!(feeds[0].notify_endpoint, "https://ntfy.sh/rust-blog");
    }

    #[test]
    fn test_rejects_empty_feed_list() {
        let config: Config = toml::from_str("workers = 2").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_urls() {
        for (url, endpoint) in [
            ("not a url", "https://ntfy.sh/topic"),
            ("https://example.com/feed.xml", "ftp://ntfy.sh/topic"),
        ] {
            let config = Config {
                workers: 1,
                sort_items: false,
                feeds: vec![FeedConfig {
                    url: url.into(),
                    notify_endpoint: endpoint.into(),
                }],
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_rejects_zero_workers() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.workers = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.feeds.len(), 2);
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[feeds]]\nurl = ").unwrap();

        match Config::load(Some(file.path())) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("feeds.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/etc/feedbell/feeds.toml");
        assert_eq!(expand_tilde(plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_tilde(Path::new("~/feeds.toml")),
                home.join("feeds.toml")
            );
        }
    }
}
