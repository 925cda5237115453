//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating the optional TOML configuration
//! file. Every field has a default, so a crawl can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use site_status_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Persisting every {} fetches", config.crawler.persist_interval);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_PERSIST_INTERVAL,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
