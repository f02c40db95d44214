//! Scraping session: current page, cache and navigation.
//!
//! A [`Session`] starts at a tutorial root and moves one page at a time.
//! Every fetch goes through the session's [`PageCache`] first, so walking
//! back and forth never downloads a page twice.
//!
//! # Example
//!
//! ```rust,no_run
//! use w3scrape_core::{HttpFetcher, ScrapeConfig, Session, Tutorial};
//! use w3scrape_core::render::DisabledRenderer;
//!
//! # async fn example() -> w3scrape_core::Result<()> {
//! let config = ScrapeConfig::builder().tutorial(Tutorial::Html).build();
//! let fetcher = HttpFetcher::new(&config.fetch)?;
//! let mut session = Session::open(Tutorial::Html.base_url(), &config, fetcher, DisabledRenderer).await?;
//!
//! for topic in session.topics() {
//!     println!("{}: {} segments", topic.header, topic.segments.len());
//! }
//!
//! if session.next_page_url().is_some() {
//!     session.paginate_next().await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cache::PageCache;
use crate::config::ScrapeConfig;
use crate::fetch::{EMPTY_DOCUMENT, PageFetcher, fetch_with_retry};
use crate::page::Page;
use crate::pagination::{self, Direction};
use crate::render::ImageRenderer;
use crate::selectors::{Locator, Tutorial};
use crate::text::normalize;
use crate::topic::{PageTopics, Topic, TopicExtractor};
use crate::{Result, ScrapeError};

/// Sequential walk over one tutorial.
pub struct Session<F, R> {
    base_url: String,
    url: String,
    cache: PageCache,
    /// Page shown when the current URL is not cached: the empty document
    /// left by an exhausted fetch or a rejected page.
    fallback: Page,
    fetcher: F,
    renderer: R,
    attempts: u32,
    code_locator: Option<Locator>,
}

impl<F: PageFetcher, R: ImageRenderer> Session<F, R> {
    fn new(base_url: &str, config: &ScrapeConfig, fetcher: F, renderer: R) -> Self {
        let code_locator = config
            .code_locator()
            .or_else(|| Tutorial::from_url(base_url).map(|t| t.code_locator()));

        Self {
            base_url: base_url.to_string(),
            url: base_url.to_string(),
            cache: PageCache::new(),
            fallback: Page::unavailable(base_url, EMPTY_DOCUMENT),
            fetcher,
            renderer,
            attempts: config.fetch.max_attempts,
            code_locator,
        }
    }

    /// Opens a session at `base_url` and downloads the first page.
    ///
    /// An exhausted fetch still opens the session, on an empty page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::MissingContainer`] when the fetched page has no
    /// content container, or any non-retryable fetch error.
    pub async fn open(base_url: &str, config: &ScrapeConfig, fetcher: F, renderer: R) -> Result<Self> {
        Self::open_at(base_url, base_url, config, fetcher, renderer).await
    }

    /// Like [`Session::open`], starting at `url` inside the tutorial.
    pub async fn open_at(base_url: &str, url: &str, config: &ScrapeConfig, fetcher: F, renderer: R) -> Result<Self> {
        let mut session = Self::new(base_url, config, fetcher, renderer);
        session.url = url.to_string();
        session.fallback = Page::unavailable(url, EMPTY_DOCUMENT);
        session.download_page().await?;
        Ok(session)
    }

    /// Opens a session on HTML obtained elsewhere, cached under `url`.
    pub fn from_html(
        base_url: &str, url: &str, html: &str, config: &ScrapeConfig, fetcher: F, renderer: R,
    ) -> Result<Self> {
        let mut session = Self::new(base_url, config, fetcher, renderer);
        session.url = url.to_string();
        session.cache.insert(Page::from_html(url, html)?);
        Ok(session)
    }

    /// Loads the current URL, from the cache when possible.
    pub async fn download_page(&mut self) -> Result<&Page> {
        if self.cache.contains(&self.url) {
            debug!(url = %self.url, "received page from cache");
            return Ok(self.page());
        }

        debug!(url = %self.url, "page not in cache, downloading");
        self.fallback = Page::unavailable(&self.url, EMPTY_DOCUMENT);

        let outcome = fetch_with_retry(&self.fetcher, &self.url, self.attempts).await?;
        if !outcome.success {
            self.fallback = Page::unavailable(&self.url, &outcome.html);
            return Ok(&self.fallback);
        }

        let page = Page::from_html(&self.url, &outcome.html)?;
        Ok(self.cache.insert(page))
    }

    /// The page at the current URL.
    pub fn page(&self) -> &Page {
        self.cache.get(&self.url).unwrap_or(&self.fallback)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// URL of the neighbouring page, `None` when the button is absent.
    pub fn page_url(&self, direction: Direction) -> Option<String> {
        pagination::page_url(&self.base_url, self.page(), direction)
    }

    pub fn next_page_url(&self) -> Option<String> {
        self.page_url(Direction::Next)
    }

    pub fn previous_page_url(&self) -> Option<String> {
        self.page_url(Direction::Previous)
    }

    /// Moves to the neighbouring page and loads it.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::NoPage`] when the current page has no such button; the
    /// session stays where it was.
    pub async fn paginate(&mut self, direction: Direction) -> Result<&Page> {
        let url = self.page_url(direction).ok_or(ScrapeError::NoPage { direction })?;
        self.url = url;
        self.download_page().await
    }

    pub async fn paginate_next(&mut self) -> Result<&Page> {
        self.paginate(Direction::Next).await
    }

    pub async fn paginate_prev(&mut self) -> Result<&Page> {
        self.paginate(Direction::Previous).await
    }

    /// Normalized header texts of the current page.
    pub fn headers(&self) -> Vec<String> {
        self.page().headers().iter().map(|header| normalize(&header.text())).collect()
    }

    /// Topic of the first header whose text equals `header`.
    pub fn topic(&mut self, header: &str) -> Option<Topic> {
        let page = self.cache.get(&self.url).unwrap_or(&self.fallback);
        let element = page
            .headers()
            .into_iter()
            .find(|element| normalize(&element.text()) == header.trim())?;

        let mut extractor =
            TopicExtractor::new(&self.base_url, &mut self.renderer).with_code_locator(self.code_locator);
        Some(extractor.extract(&element))
    }

    /// Every topic of the current page, in header order.
    pub fn topics(&mut self) -> Vec<Topic> {
        self.page_topics().topics
    }

    /// Topics plus intro material of the current page.
    pub fn page_topics(&mut self) -> PageTopics {
        let page = self.cache.get(&self.url).unwrap_or(&self.fallback);
        let mut extractor =
            TopicExtractor::new(&self.base_url, &mut self.renderer).with_code_locator(self.code_locator);
        extractor.extract_page(page)
    }

    /// Writes the current page's container HTML, or the whole document when `full`.
    pub fn write_html(&self, path: &Path, full: bool) -> Result<()> {
        fs::write(path, self.page().html(full)).map_err(ScrapeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use crate::render::DisabledRenderer;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const BASE: &str = "https://www.w3schools.com/html/";

    struct SiteFetcher {
        pages: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl SiteFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, h)| (u.to_string(), h.to_string())).collect(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for SiteFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.requests.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(FetchResponse { status: 200, body: body.clone() }),
                None => Ok(FetchResponse { status: 404, body: String::new() }),
            }
        }
    }

    fn tutorial_page(title: &str, prev: Option<&str>, next: Option<&str>) -> String {
        let prev = prev.map(|h| format!(r#"<a class="w3-left w3-btn" href="{}">❮ Previous</a>"#, h));
        let next = next.map(|h| format!(r#"<a class="w3-right w3-btn" href="{}">Next ❯</a>"#, h));
        format!(
            r#"<html><body><div class="w3-main">
                <h2>{}</h2><p>About {}</p><hr>
                <div class="w3-clear nextprev">{}{}</div>
            </div></body></html>"#,
            title,
            title,
            prev.unwrap_or_default(),
            next.unwrap_or_default()
        )
    }

    fn site() -> SiteFetcher {
        let index = tutorial_page("HTML Tutorial", None, Some("html_intro.asp"));
        let intro = tutorial_page("What is HTML?", Some("default.asp"), None);
        let default = tutorial_page("HTML Tutorial", None, Some("html_intro.asp"));
        SiteFetcher::new(&[
            (BASE, index.as_str()),
            ("https://www.w3schools.com/html/html_intro.asp", intro.as_str()),
            ("https://www.w3schools.com/html/default.asp", default.as_str()),
        ])
    }

    #[tokio::test]
    async fn test_open_and_paginate() {
        let fetcher = site();
        let mut session = Session::open(BASE, &ScrapeConfig::default(), &fetcher, DisabledRenderer)
            .await
            .unwrap();

        assert_eq!(session.headers(), vec!["HTML Tutorial"]);
        assert_eq!(session.previous_page_url(), None);

        session.paginate_next().await.unwrap();
        assert_eq!(session.url(), "https://www.w3schools.com/html/html_intro.asp");
        assert_eq!(session.topics()[0].segments[0].text, "About What is HTML?");

        let err = session.paginate_next().await.unwrap_err();
        assert!(matches!(err, ScrapeError::NoPage { direction: Direction::Next }));
        assert_eq!(session.url(), "https://www.w3schools.com/html/html_intro.asp");
    }

    #[tokio::test]
    async fn test_cached_pages_are_not_refetched() {
        let fetcher = site();
        let mut session = Session::open(BASE, &ScrapeConfig::default(), &fetcher, DisabledRenderer)
            .await
            .unwrap();

        session.paginate_next().await.unwrap();
        session.paginate_prev().await.unwrap();
        session.paginate_next().await.unwrap();
        session.download_page().await.unwrap();

        assert_eq!(
            *fetcher.requests.borrow(),
            vec![
                BASE.to_string(),
                "https://www.w3schools.com/html/html_intro.asp".to_string(),
                "https://www.w3schools.com/html/default.asp".to_string(),
            ]
        );
        assert_eq!(session.cache().len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_fetch_gives_empty_page() {
        let fetcher = SiteFetcher::new(&[]);
        let config = ScrapeConfig::builder().max_attempts(2).build();
        let mut session = Session::open(BASE, &config, &fetcher, DisabledRenderer).await.unwrap();

        assert!(!session.page().is_available());
        assert!(session.headers().is_empty());
        assert!(session.topics().is_empty());
        assert_eq!(session.next_page_url(), None);
        assert!(session.cache().is_empty());
        assert_eq!(fetcher.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_open_inside_tutorial() {
        let fetcher = site();
        let url = "https://www.w3schools.com/html/html_intro.asp";
        let mut session = Session::open_at(BASE, url, &ScrapeConfig::default(), &fetcher, DisabledRenderer)
            .await
            .unwrap();

        assert_eq!(session.url(), url);
        assert_eq!(session.base_url(), BASE);
        session.paginate_prev().await.unwrap();
        assert_eq!(session.url(), "https://www.w3schools.com/html/default.asp");
    }

    #[tokio::test]
    async fn test_missing_container_fails_open() {
        let fetcher = SiteFetcher::new(&[(BASE, "<html><body><h2>Moved</h2></body></html>")]);
        let result = Session::open(BASE, &ScrapeConfig::default(), &fetcher, DisabledRenderer).await;
        assert!(matches!(result, Err(ScrapeError::MissingContainer { .. })));
    }

    #[test]
    fn test_topic_by_header() {
        let html = r#"<div class="w3-main"><h2>One</h2><p>first</p><hr><h2> Two </h2><p>second</p></div>"#;
        let fetcher = SiteFetcher::new(&[]);
        let mut session =
            Session::from_html(BASE, BASE, html, &ScrapeConfig::default(), &fetcher, DisabledRenderer).unwrap();

        assert_eq!(session.topic("Two").unwrap().segments[0].text, "second");
        assert!(session.topic("Three").is_none());
    }

    #[test]
    fn test_write_html() {
        let html = r#"<html><body><nav>menu</nav><div class="w3-main"><h2>One</h2></div></body></html>"#;
        let fetcher = SiteFetcher::new(&[]);
        let session =
            Session::from_html(BASE, BASE, html, &ScrapeConfig::default(), &fetcher, DisabledRenderer).unwrap();

        let tmp = tempfile::TempDir::new().unwrap();
        let container = tmp.path().join("container.html");
        let full = tmp.path().join("full.html");
        session.write_html(&container, false).unwrap();
        session.write_html(&full, true).unwrap();

        assert!(!fs::read_to_string(&container).unwrap().contains("menu"));
        assert!(fs::read_to_string(&full).unwrap().contains("menu"));
    }
}
