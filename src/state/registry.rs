//! Visited registry: every canonical URL discovered during a crawl
//!
//! A URL enters the registry exactly once, as [`UrlStatus::Pending`], when it is first
//! discovered. It leaves `Pending` exactly once, when its fetch attempt completes.
//! Entries are never removed or overwritten after that.

use crate::state::UrlStatus;
use std::collections::HashMap;
use thiserror::Error;

/// Violations of the registry's state machine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("URL was never registered: {0}")]
    Unknown(String),

    #[error("URL already has a recorded result ({status}): {url}")]
    AlreadyRecorded { url: String, status: UrlStatus },
}

/// Mapping from canonical URL to its result status, in discovery order
#[derive(Debug, Default, Clone)]
pub struct VisitedRegistry {
    entries: Vec<(String, UrlStatus)>,
    index: HashMap<String, usize>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the URL has ever been registered, pending or not
    pub fn is_known(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Registers a newly discovered URL as pending
    ///
    /// Returns false, leaving the registry untouched, if the URL is already known.
    pub fn register_pending(&mut self, url: &str) -> bool {
        if self.is_known(url) {
            return false;
        }

        self.index.insert(url.to_string(), self.entries.len());
        self.entries.push((url.to_string(), UrlStatus::Pending));
        true
    }

    /// Records the HTTP status of a fetched URL
    pub fn record_result(&mut self, url: &str, code: u16) -> Result<(), RegistryError> {
        self.transition(url, UrlStatus::Fetched(code))
    }

    /// Records a fetch that failed before any response arrived
    pub fn record_failure(&mut self, url: &str) -> Result<(), RegistryError> {
        self.transition(url, UrlStatus::Unreachable)
    }

    fn transition(&mut self, url: &str, status: UrlStatus) -> Result<(), RegistryError> {
        let position = *self
            .index
            .get(url)
            .ok_or_else(|| RegistryError::Unknown(url.to_string()))?;

        let entry = &mut self.entries[position].1;
        if entry.is_terminal() {
            return Err(RegistryError::AlreadyRecorded {
                url: url.to_string(),
                status: *entry,
            });
        }

        *entry = status;
        Ok(())
    }

    /// Current status of a URL, if known
    pub fn status(&self, url: &str) -> Option<UrlStatus> {
        self.index.get(url).map(|&position| self.entries[position].1)
    }

    /// Copies every entry out of the registry, in discovery order
    ///
    /// The copy is independent of the registry and can be handed to another task.
    pub fn snapshot(&self) -> Vec<(String, UrlStatus)> {
        self.entries.clone()
    }

    /// Number of registered URLs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of URLs with a recorded HTTP response
    pub fn fetched_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, status)| status.is_fetched())
            .count()
    }

    /// Number of URLs whose fetch failed at the transport level
    pub fn unreachable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, status)| matches!(status, UrlStatus::Unreachable))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/about";

    #[test]
    fn test_new_registry_is_empty() {
        let registry = VisitedRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_known(URL));
        assert_eq!(registry.status(URL), None);
    }

    #[test]
    fn test_register_pending() {
        let mut registry = VisitedRegistry::new();
        assert!(registry.register_pending(URL));

        assert!(registry.is_known(URL));
        assert_eq!(registry.status(URL), Some(UrlStatus::Pending));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_twice_is_noop() {
        let mut registry = VisitedRegistry::new();
        assert!(registry.register_pending(URL));
        registry.record_result(URL, 200).unwrap();

        assert!(!registry.register_pending(URL));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.status(URL), Some(UrlStatus::Fetched(200)));
    }

    #[test]
    fn test_record_result() {
        let mut registry = VisitedRegistry::new();
        registry.register_pending(URL);
        registry.record_result(URL, 404).unwrap();

        assert_eq!(registry.status(URL), Some(UrlStatus::Fetched(404)));
        assert_eq!(registry.fetched_count(), 1);
    }

    #[test]
    fn test_record_failure() {
        let mut registry = VisitedRegistry::new();
        registry.register_pending(URL);
        registry.record_failure(URL).unwrap();

        assert_eq!(registry.status(URL), Some(UrlStatus::Unreachable));
        assert!(registry.is_known(URL));
        assert_eq!(registry.fetched_count(), 0);
        assert_eq!(registry.unreachable_count(), 1);
    }

    #[test]
    fn test_record_unknown_url() {
        let mut registry = VisitedRegistry::new();
        assert_eq!(
            registry.record_result(URL, 200),
            Err(RegistryError::Unknown(URL.to_string()))
        );
    }

    #[test]
    fn test_result_is_never_overwritten() {
        let mut registry = VisitedRegistry::new();
        registry.register_pending(URL);
        registry.record_result(URL, 200).unwrap();

        assert!(matches!(
            registry.record_result(URL, 500),
            Err(RegistryError::AlreadyRecorded { .. })
        ));
        assert!(registry.record_failure(URL).is_err());
        assert_eq!(registry.status(URL), Some(UrlStatus::Fetched(200)));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut registry = VisitedRegistry::new();
        registry.register_pending("https://example.com/a");
        registry.register_pending("https://example.com/b");

        let snapshot = registry.snapshot();
        registry.record_result("https://example.com/a", 200).unwrap();
        registry.register_pending("https://example.com/c");

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot
            .iter()
            .all(|(_, status)| *status == UrlStatus::Pending));
        assert_eq!(registry.len(), 3);
    }
}
