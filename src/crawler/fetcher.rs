//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests that stream the page body
//! - Classifying transport failures
//!
//! Redirects follow reqwest's default policy and are not treated specially; the status
//! recorded for a URL is the status of the final response.

use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A page received from the server
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code of the response
    pub status_code: u16,

    /// Raw response body
    pub body: Vec<u8>,

    /// Whether the body stream failed part way or hit the size limit; `body` holds what
    /// was read up to that point
    pub truncated: bool,
}

/// Transport-level failures: no HTTP response was received
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Retrieves pages for the traversal loop
pub trait Fetcher {
    /// Fetches `url`, returning its status code and body
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_status_crawler::config::Config;
/// use site_status_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_body_bytes: usize::try_from(DEFAULT_MAX_BODY_BYTES).unwrap_or(usize::MAX),
        }
    }

    /// Caps the number of body bytes read per page (minimum 1)
    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
        self
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status_code = response.status().as_u16();
        let mut body = Vec::new();
        let mut truncated = false;

        // Keep whatever arrived if the stream breaks; the status is already known
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    let room = self.max_body_bytes - body.len();
                    if chunk.len() > room {
                        body.extend_from_slice(&chunk[..room]);
                        tracing::debug!(
                            "Body of {} cut at {} bytes",
                            url,
                            self.max_body_bytes
                        );
                        truncated = true;
                        break;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Body of {} truncated after {} bytes: {}", url, body.len(), e);
                    truncated = true;
                    break;
                }
            }
        }

        Ok(FetchedPage {
            status_code,
            body,
            truncated,
        })
    }
}
