//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types: read-only
//! views over one parsed page, with CSS selection and the sibling walk the
//! topic extractor needs.
//!
//! # Example
//!
//! ```rust
//! use w3scrape_core::parse::Document;
//!
//! let html = r#"
//!     <div class="w3-main">
//!         <h2>Title</h2>
//!         <p>Paragraph</p>
//!     </div>
//! "#;
//!
//! let doc = Document::parse(html);
//! let header = doc.find("h2").unwrap().unwrap();
//! let next = header.next_sibling_element().unwrap();
//! assert_eq!(next.tag_name(), "p");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::selectors::Locator;
use crate::{Result, ScrapeError};

/// Parses a CSS selector, mapping failures to [`ScrapeError::HtmlParseError`].
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use w3scrape_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document. Parsing itself never fails; malformed
    /// markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use w3scrape_core::parse::Document;
    ///
    /// let html = r#"<p class="intro">First</p><p class="intro">Second</p>"#;
    /// let doc = Document::parse(html);
    /// assert_eq!(doc.select("p.intro").unwrap().len(), 2);
    /// ```
    pub fn select(&'_ self, css: &str) -> Result<Vec<Element<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).map(Element::from).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn find(&'_ self, css: &str) -> Result<Option<Element<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).next().map(Element::from))
    }

    /// Selects the first element matching a locator.
    pub fn locate(&'_ self, locator: &Locator) -> Option<Element<'_>> {
        self.find(&locator.css()).ok().flatten()
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let sel = Selector::parse("title").ok()?;
        self.html.select(&sel).next().map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use w3scrape_core::parse::Document;
///
/// let html = r#"<a class="w3-right w3-btn" href="html_editors.asp">Next ❯</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert!(link.has_class("w3-btn"));
/// assert_eq!(link.attr("href"), Some("html_editors.asp"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl<'a> Element<'a> {
    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Whether the attribute is present, even when empty.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whether the class attribute contains `token`.
    pub fn has_class(&self, token: &str) -> bool {
        self.element.value().classes().any(|class| class == token)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Next element sibling in document order, skipping text and comment nodes.
    pub fn next_sibling_element(&self) -> Option<Element<'a>> {
        self.element.next_siblings().find_map(ElementRef::wrap).map(Element::from)
    }

    /// Selects descendants using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, css: &str) -> Result<Vec<Element<'a>>> {
        let sel = selector(css)?;
        Ok(self.element.select(&sel).map(Element::from).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    pub fn find(&self, css: &str) -> Result<Option<Element<'a>>> {
        let sel = selector(css)?;
        Ok(self.element.select(&sel).next().map(Element::from))
    }

    /// Selects the first descendant matching a locator.
    pub fn locate(&self, locator: &Locator) -> Option<Element<'a>> {
        self.find(&locator.css()).ok().flatten()
    }

    /// Selects every descendant matching a locator.
    pub fn locate_all(&self, locator: &Locator) -> Vec<Element<'a>> {
        self.select(&locator.css()).unwrap_or_default()
    }
}
