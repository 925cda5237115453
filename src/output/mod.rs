//! Output module for crawl results
//!
//! This module handles:
//! - Writing registry snapshots to the site's progress CSV
//! - Running persistence on a dedicated worker task
//! - Summarizing a finished crawl

mod csv_output;
pub mod stats;

pub use csv_output::{write_snapshot, PersistError, ProgressPersister, Snapshot};
pub use stats::{print_summary, CrawlSummary};
