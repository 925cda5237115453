//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML link extraction
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{extract_links, Links};
pub use scheduler::{CrawlPhase, Frontier};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::url::SiteIdentity;
use crate::Result;

/// Runs a complete crawl of `site` over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Make sure the output directory exists
/// 2. Build the HTTP client
/// 3. Crawl breadth-first from the site's root
/// 4. Write the progress CSV periodically and once at the end
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed and the CSV is written
/// * `Err(CrawlError)` - The client or the output file could not be set up
pub async fn crawl(site: SiteIdentity, config: &Config) -> Result<CrawlSummary> {
    std::fs::create_dir_all(&config.output.directory)?;
    let output_path = config.output.path_for(&site.output_file_name());

    let client = build_http_client(config)?;
    let fetcher = HttpFetcher::new(client).with_max_body_bytes(config.crawler.max_body_bytes);
    let mut coordinator = Coordinator::new(site, fetcher, output_path)
        .with_persist_interval(config.crawler.persist_interval);

    coordinator.run().await
}
