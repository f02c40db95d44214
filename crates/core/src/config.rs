//! Scraper configuration.
//!
//! # Example
//!
//! ```rust
//! use w3scrape_core::{ScrapeConfig, Tutorial};
//!
//! let config = ScrapeConfig::builder()
//!     .tutorial(Tutorial::Python)
//!     .timeout(10)
//!     .max_attempts(3)
//!     .build();
//!
//! assert_eq!(config.start_url(), Some("https://www.w3schools.com/python/"));
//! ```

use std::path::PathBuf;

use crate::fetch::FetchConfig;
use crate::render::RenderConfig;
use crate::selectors::{Locator, Tutorial};

/// Settings for one scraping session.
#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Image capture of embedded divs.
    pub render: RenderConfig,
    /// Tutorial being scraped; picks the start URL and code selector.
    pub tutorial: Option<Tutorial>,
}

impl ScrapeConfig {
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new()
    }

    /// Root URL of the configured tutorial.
    pub fn start_url(&self) -> Option<&'static str> {
        self.tutorial.map(|t| t.base_url())
    }

    /// Tutorial specific code block selector.
    pub fn code_locator(&self) -> Option<Locator> {
        self.tutorial.map(|t| t.code_locator())
    }
}

/// Builder for ScrapeConfig.
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    pub fn new() -> Self {
        Self { config: ScrapeConfig::default() }
    }

    pub fn tutorial(mut self, tutorial: Tutorial) -> Self {
        self.config.tutorial = Some(tutorial);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the attempts per page, at least one.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.fetch.max_attempts = attempts.max(1);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    /// Turns image capture of embedded divs on or off.
    pub fn render_images(mut self, enabled: bool) -> Self {
        self.config.render.enabled = enabled;
        self
    }

    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.render.output_dir = dir.into();
        self
    }

    pub fn stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.render.stylesheet = Some(path.into());
        self
    }

    pub fn renderer_binary(mut self, binary: impl Into<String>) -> Self {
        self.config.render.binary = binary.into();
        self
    }

    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
