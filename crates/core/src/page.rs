//! Parsed pages and the main-container lookup.

use crate::parse::{Document, Element};
use crate::selectors::{HEADER_TAG, INTRO_PANEL, MAIN_CONTAINER, PARAGRAPH_INTRO};
use crate::text::element_text;
use crate::{Result, ScrapeError};

/// Finds the page's main content container.
pub fn locate_container(document: &Document) -> Option<Element<'_>> {
    document.locate(&MAIN_CONTAINER)
}

/// One parsed page.
///
/// A page is either loaded, with a container guaranteed present, or
/// unavailable: the empty document left after every fetch attempt failed.
/// An unavailable page answers every query with nothing.
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    document: Document,
    available: bool,
}

impl Page {
    /// Parses a fetched page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::MissingContainer`] when the document has no
    /// `div.w3-main`.
    pub fn from_html(url: &str, html: &str) -> Result<Self> {
        let document = Document::parse(html);

        if locate_container(&document).is_none() {
            tracing::error!(url, "failed to find main container");
            return Err(ScrapeError::MissingContainer { url: url.to_string() });
        }

        Ok(Self { url: url.to_string(), document, available: true })
    }

    /// A page whose fetch was exhausted.
    pub fn unavailable(url: &str, html: &str) -> Self {
        Self { url: url.to_string(), document: Document::parse(html), available: false }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The main content container; `None` only for unavailable pages.
    pub fn container(&self) -> Option<Element<'_>> {
        if !self.available {
            return None;
        }
        locate_container(&self.document)
    }

    /// Topic headers of the container, in document order.
    pub fn headers(&self) -> Vec<Element<'_>> {
        self.container()
            .and_then(|container| container.select(HEADER_TAG).ok())
            .unwrap_or_default()
    }

    /// The info panel opening the page, if any.
    pub fn intro_panel(&self) -> Option<Element<'_>> {
        self.container()?.locate(&INTRO_PANEL)
    }

    /// Lead paragraphs of the page.
    pub fn paragraph_intros(&self) -> Vec<Element<'_>> {
        self.container()
            .map(|container| container.locate_all(&PARAGRAPH_INTRO))
            .unwrap_or_default()
    }

    /// Normalized text of the lead paragraphs.
    pub fn intro_texts(&self) -> Vec<String> {
        self.paragraph_intros().iter().map(element_text).collect()
    }

    /// Outer HTML of the container, or of the whole document when `full`.
    pub fn html(&self, full: bool) -> String {
        match (full, self.container()) {
            (false, Some(container)) => container.outer_html(),
            _ => self.document.as_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::EMPTY_DOCUMENT;

    const PAGE: &str = r#"
        <html><body>
            <div class="w3-sidebar">sidebar</div>
            <div class="w3-main w3-light-grey">
                <h1>HTML <span class="color_h1">Tutorial</span></h1>
                <div class="w3-panel w3-info intro"><p>Learn HTML.</p></div>
                <p class="intro">HTML is the standard markup language.</p>
                <h2>First</h2>
                <p>One</p>
                <hr>
                <h2>Second</h2>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_loaded_page() {
        let page = Page::from_html("https://www.w3schools.com/html/", PAGE).unwrap();

        assert!(page.is_available());
        assert!(page.container().is_some());

        let headers: Vec<String> = page.headers().iter().map(|h| h.text()).collect();
        assert_eq!(headers, vec!["First", "Second"]);
    }

    #[test]
    fn test_intro_queries() {
        let page = Page::from_html("https://www.w3schools.com/html/", PAGE).unwrap();

        assert_eq!(page.intro_panel().map(|p| element_text(&p)), Some("Learn HTML.".to_string()));
        assert_eq!(page.intro_texts(), vec!["HTML is the standard markup language."]);
    }

    #[test]
    fn test_missing_container_is_error() {
        let result = Page::from_html("https://example.com/", "<html><body><h2>x</h2></body></html>");
        assert!(matches!(result, Err(ScrapeError::MissingContainer { .. })));
    }

    #[test]
    fn test_unavailable_page_is_empty() {
        let page = Page::unavailable("https://www.w3schools.com/html/", EMPTY_DOCUMENT);

        assert!(!page.is_available());
        assert!(page.container().is_none());
        assert!(page.headers().is_empty());
        assert!(page.intro_panel().is_none());
        assert!(page.paragraph_intros().is_empty());
    }

    #[test]
    fn test_html_container_or_full() {
        let page = Page::from_html("https://www.w3schools.com/html/", PAGE).unwrap();

        let container = page.html(false);
        assert!(container.starts_with("<div class=\"w3-main"));
        assert!(!container.contains("sidebar"));
        assert!(page.html(true).contains("sidebar"));
    }
}
