use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Completed fetches between two progress snapshots
pub const DEFAULT_PERSIST_INTERVAL: u64 = 20;

/// Largest response body read per page (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of completed fetches between progress snapshots
    #[serde(rename = "persist-interval")]
    pub persist_interval: u64,

    /// Whole-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Bytes of body read per page; anything beyond is dropped
    #[serde(rename = "max-body-bytes")]
    pub max_body_bytes: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            persist_interval: DEFAULT_PERSIST_INTERVAL,
            fetch_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value as `name/version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the progress CSV is written into
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl OutputConfig {
    /// Full path of the CSV file for a given file name
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        Path::new(&self.directory).join(file_name)
    }
}
