//! Site-Status Crawler main entry point
//!
//! This is the command-line interface for the single-site status crawler.

use anyhow::Context;
use clap::Parser;
use site_status_crawler::config::{load_config_or_default, Config};
use site_status_crawler::crawler::crawl;
use site_status_crawler::output::print_summary;
use site_status_crawler::url::SiteIdentity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Status Crawler: record the HTTP status of every page on a site
///
/// Crawls a single site breadth-first from its root, following internal links only,
/// and writes `<host>.csv` with the status code of every page reached.
#[derive(Parser, Debug)]
#[command(name = "site-status-crawler")]
#[command(version)]
#[command(about = "Record the HTTP status of every page on a site", long_about = None)]
struct Cli {
    /// URL of the site to crawl (e.g. example.com or https://www.example.com/)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the output CSV (overrides the configuration file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the derived site identity and settings without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    run(cli).await
}

/// Resolves the site and settings from the parsed arguments, then crawls
async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(site_url) = cli.url.as_deref() else {
        println!("--url flag not set.");
        return Ok(());
    };

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    let site = SiteIdentity::parse(site_url)
        .with_context(|| format!("Invalid site URL '{}'", site_url))?;

    if cli.dry_run {
        handle_dry_run(&site, &config);
        return Ok(());
    }

    tracing::info!("Crawling {}", site.base_url());

    let summary = crawl(site, &config).await.context("Crawl failed")?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_status_crawler=info,warn"),
            1 => EnvFilter::new("site_status_crawler=debug,info"),
            2 => EnvFilter::new("site_status_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(site: &SiteIdentity, config: &Config) {
    println!("=== Site-Status Crawler Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", site.base_url());
    println!("  Host: {}", site.bare_host());
    println!("  Also accepted: {}", site.www_host());

    println!("\nCrawler Configuration:");
    println!("  Persist interval: {} fetches", config.crawler.persist_interval);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!("  Max body size: {} bytes", config.crawler.max_body_bytes);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!(
        "  File: {}",
        config.output.path_for(&site.output_file_name()).display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn is_empty_dir(path: &std::path::Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_missing_url_exits_cleanly_without_crawling() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["site-status-crawler", "--output-dir", output_dir]).unwrap();
        assert!(cli.url.is_none());

        assert!(run(cli).await.is_ok());
        assert!(is_empty_dir(dir.path()));
    }

    #[tokio::test]
    async fn test_no_arguments_is_accepted() {
        let cli = Cli::try_parse_from(["site-status-crawler"]).unwrap();
        assert!(run(cli).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_does_not_crawl() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "site-status-crawler",
            "--url",
            "example.com",
            "--dry-run",
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .unwrap();
        assert!(cli.dry_run);

        assert!(run(cli).await.is_ok());
        assert!(!output_dir.exists());
        assert!(is_empty_dir(dir.path()));
    }

    #[tokio::test]
    async fn test_invalid_site_url_fails_before_crawling() {
        let dir = TempDir::new().unwrap();

        let cli = Cli::try_parse_from([
            "site-status-crawler",
            "--url",
            "ftp://example.com",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        let error = run(cli).await.unwrap_err();
        assert!(error.to_string().contains("Invalid site URL"));
        assert!(is_empty_dir(dir.path()));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["site-status-crawler", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_is_counted() {
        let cli = Cli::try_parse_from(["site-status-crawler", "-vv", "--url", "example.com"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.url.as_deref(), Some("example.com"));
    }
}
