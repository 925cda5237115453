//! Site-Status Crawler: a single-site breadth-first link checker
//!
//! This crate crawls one website starting from its root page, follows every internal
//! anchor link breadth-first, records the HTTP status of each discovered URL and
//! periodically writes the results to a CSV file named after the site.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid site URL: {0}")]
    InvalidSite(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] state::RegistryError),

    #[error("Persistence error: {0}")]
    Persist(#[from] output::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl has already run on this coordinator")]
    AlreadyRun,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while building a site identity from user input
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Site URL is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use output::CrawlSummary;
pub use state::{UrlStatus, VisitedRegistry};
pub use crate::url::{Canonicalizer, SiteIdentity};
