//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UrlStatus`: the result status of a single canonical URL
//! - `VisitedRegistry`: every URL discovered so far, with its status

mod registry;
mod url_status;

// Re-export main types
pub use registry::{RegistryError, VisitedRegistry};
pub use url_status::UrlStatus;
