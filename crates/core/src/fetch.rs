//! Page fetching with bounded retry, plus local inputs.
//!
//! Fetching is the external edge of the scraper: [`PageFetcher`] performs one
//! GET, [`fetch_with_retry`] applies the retry policy and degrades to an
//! empty document when every attempt fails.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Result, ScrapeError};

/// Document returned when a page could not be fetched.
pub const EMPTY_DOCUMENT: &str = "<html></html>";

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Attempts per page before giving up.
    pub max_attempts: u32,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 3,
            max_attempts: 5,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".to_string(),
        }
    }
}

impl FetchConfig {
    /// Reads a User-Agent string from a file, ignoring surrounding whitespace.
    pub fn user_agent_from_file(path: &Path) -> Result<String> {
        let user_agent = read_existing(path)?.trim().to_string();
        if user_agent.is_empty() {
            return Err(ScrapeError::ConfigError(format!("User-Agent file {} is empty", path.display())));
        }
        Ok(user_agent)
    }
}

/// Status and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Success means any status below 400, redirects included.
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }
}

/// Result of [`fetch_with_retry`]: the page text and whether it is real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub html: String,
    pub success: bool,
}

impl FetchOutcome {
    fn empty() -> Self {
        Self { html: EMPTY_DOCUMENT.to_string(), success: false }
    }
}

/// One GET request against a URL.
///
/// Implementations report timeouts as [`ScrapeError::Timeout`] and
/// unreachable hosts as [`ScrapeError::Connection`]; those two are retried.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse>>;
}

impl<F: PageFetcher> PageFetcher for &F {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse>> {
        (**self).fetch(url)
    }
}

/// Fetches `url`, retrying up to `attempts` times.
///
/// Timeouts, connection failures and error statuses each consume one
/// attempt. Other errors, such as an invalid URL, are returned immediately.
/// When attempts run out the outcome holds [`EMPTY_DOCUMENT`].
pub async fn fetch_with_retry<F: PageFetcher>(fetcher: &F, url: &str, attempts: u32) -> Result<FetchOutcome> {
    for attempt in 1..=attempts {
        match fetcher.fetch(url).await {
            Ok(response) => {
                debug!(url, status = response.status, "received response");
                if response.is_ok() {
                    return Ok(FetchOutcome { html: response.body, success: true });
                }
                debug!(attempt, attempts, "failed getting proper response, retrying");
            }
            Err(err) if err.is_retryable() => {
                debug!(attempt, attempts, error = %err, "request failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }

    info!(url, "failed to get data, returning empty document");
    Ok(FetchOutcome::empty())
}

/// reqwest-backed fetcher.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: u64,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    /// Builds the client once; every request reuses it.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        use std::time::Duration;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ScrapeError::HttpError)?;

        Ok(Self { client, timeout: config.timeout })
    }
}

#[cfg(feature = "fetch")]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let parsed_url = url::Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self
            .client
            .get(parsed_url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(FetchResponse { status, body })
    }
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    fn classify(&self, err: reqwest::Error) -> ScrapeError {
        if err.is_timeout() {
            ScrapeError::Timeout { timeout: self.timeout }
        } else if err.is_connect() {
            ScrapeError::Connection(err.to_string())
        } else {
            ScrapeError::HttpError(err)
        }
    }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    read_existing(&PathBuf::from(path))
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        Err(ScrapeError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(ScrapeError::from)
    }
}
