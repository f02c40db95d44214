//! Error types for w3scrape operations.
//!
//! This module defines the main error type [`ScrapeError`] which represents
//! everything that can go wrong while fetching, parsing and extracting
//! tutorial pages.
//!
//! # Example
//!
//! ```rust
//! use w3scrape_core::{ScrapeError, Result};
//!
//! fn require_container(found: bool, url: &str) -> Result<()> {
//!     if !found {
//!         return Err(ScrapeError::MissingContainer { url: url.to_string() });
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::pagination::Direction;

/// Main error type for scraping operations.
///
/// Fetch exhaustion is not an error (it degrades to an empty document) and
/// neither is a missing pagination anchor when merely queried. Everything
/// else that aborts work on a page lands here.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request errors from reqwest that are not timeouts or connect failures.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Consumes one fetch attempt; retried until attempts run out.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server could not be reached.
    ///
    /// Consumes one fetch attempt; retried until attempts run out.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page was fetched but has no main content container.
    ///
    /// Extraction cannot proceed for this page: returning zero topics would
    /// hide the difference between an empty page and a changed layout.
    #[error("Failed to find main content container on {url}")]
    MissingContainer { url: String },

    /// Navigation was requested but the page has no such button.
    #[error("Failed to get {direction} page")]
    NoPage { direction: Direction },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    SerializationError(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::SerializationError(err.to_string())
    }
}

impl ScrapeError {
    /// Whether a fetch that failed with this error should be attempted again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScrapeError::Timeout { .. } | ScrapeError::Connection(_))
    }
}

/// Result type alias for ScrapeError.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_container_mentions_url() {
        let err = ScrapeError::MissingContainer { url: "https://www.w3schools.com/html/".to_string() };
        assert!(err.to_string().contains("https://www.w3schools.com/html/"));
    }

    #[test]
    fn test_no_page_error() {
        let err = ScrapeError::NoPage { direction: Direction::Previous };
        assert_eq!(err.to_string(), "Failed to get previous page");
    }

    #[test]
    fn test_retryable() {
        assert!(ScrapeError::Timeout { timeout: 3 }.is_retryable());
        assert!(ScrapeError::Connection("refused".to_string()).is_retryable());
        assert!(!ScrapeError::InvalidUrl("x".to_string()).is_retryable());
    }
}
