//! End-of-crawl summary
//!
//! Collected by the coordinator when the traversal finishes and printed by the CLI.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary statistics for a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Base URL of the crawled site
    pub base_url: String,

    /// The progress CSV
    pub output_path: PathBuf,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Completed fetch attempts, failed ones included
    pub fetch_attempts: u64,

    /// URLs with a recorded HTTP response (the CSV data rows)
    pub fetched: u64,

    /// URLs whose fetch failed at the transport level
    pub unreachable: u64,

    /// Distinct URLs registered, the root included
    pub discovered: u64,

    /// Snapshots handed to the persister, the final one included
    pub snapshots: u64,
}

impl CrawlSummary {
    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Share of attempts that got an HTTP response, as a percentage
    pub fn response_rate(&self) -> f64 {
        if self.fetch_attempts == 0 {
            return 0.0;
        }
        (self.fetched as f64 / self.fetch_attempts as f64) * 100.0
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Site: {}", summary.base_url);
    println!("Output: {}", summary.output_path.display());
    println!("Started: {}", summary.started_at.to_rfc3339());
    println!("Finished: {}", summary.finished_at.to_rfc3339());
    println!(
        "Duration: {:.2}s",
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    println!();

    println!("Pages:");
    println!("  Discovered: {}", summary.discovered);
    println!("  Fetch attempts: {}", summary.fetch_attempts);
    println!("  Responses recorded: {}", summary.fetched);
    println!("  Unreachable: {}", summary.unreachable);
    println!("  Snapshots taken: {}", summary.snapshots);
    println!();

    println!(
        "Response Rate: {:.1}% ({} / {} attempts)",
        summary.response_rate(),
        summary.fetched,
        summary.fetch_attempts
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(attempts: u64, fetched: u64) -> CrawlSummary {
        let started_at = Utc::now();
        CrawlSummary {
            base_url: "https://example.com/".to_string(),
            output_path: PathBuf::from("example.com.csv"),
            started_at,
            finished_at: started_at + chrono::Duration::seconds(3),
            fetch_attempts: attempts,
            fetched,
            unreachable: attempts - fetched,
            discovered: attempts,
            snapshots: 1,
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(summary(1, 1).duration().num_seconds(), 3);
    }

    #[test]
    fn test_response_rate() {
        let rate = summary(10, 8).response_rate();
        assert!((rate - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_response_rate_zero_attempts() {
        assert_eq!(summary(0, 0).response_rate(), 0.0);
    }
}
