//! Topic extraction: the sibling walk and classification.
//!
//! A topic starts at an `h2` header and runs over the header's following
//! element siblings until the first `hr`. Each sibling is matched against
//! [`SIBLING_RULES`] and becomes at most one [`Segment`].
//!
//! # Example
//!
//! ```rust
//! use w3scrape_core::page::Page;
//! use w3scrape_core::render::DisabledRenderer;
//! use w3scrape_core::topic::{SegmentKind, TopicExtractor};
//!
//! let html = r#"<div class="w3-main">
//!     <h2>HTML Lists</h2>
//!     <p>Lists group related items.</p>
//!     <ul><li>Coffee</li><li>Tea</li></ul>
//!     <hr>
//! </div>"#;
//!
//! let page = Page::from_html("https://www.w3schools.com/html/", html).unwrap();
//! let mut renderer = DisabledRenderer;
//! let mut extractor = TopicExtractor::new("https://www.w3schools.com/html/", &mut renderer);
//!
//! let topic = extractor.extract(&page.headers()[0]);
//! assert_eq!(topic.segments.len(), 2);
//! assert_eq!(topic.segments[1].kind, SegmentKind::UnorderedList);
//! assert_eq!(topic.segments[1].text, "Coffee\nTea");
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::page::Page;
use crate::parse::Element;
use crate::render::ImageRenderer;
use crate::selectors::{
    ClassCondition, GENERAL_CODE, Locator, SECTION_BREAK_TAG, SIBLING_RULES, SiblingAction, SiblingRule,
    is_excluded_topic,
};
use crate::table::convert_tables;
use crate::text::{code_text, element_text, normalize};

/// Semantic type of a segment. Serialized names follow the site's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentKind {
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "ol")]
    OrderedList,
    #[serde(rename = "ul")]
    UnorderedList,
    #[serde(rename = "panel")]
    Panel,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "div")]
    EmbeddedDiv,
    #[serde(rename = "table")]
    Table,
}

/// One classified content unit within a topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Normalized text; raw HTML for embedded divs, row JSON for tables.
    pub text: String,
    /// Image location (image segments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Markup of the code block (code segments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Rendered image path, empty when rendering failed (embedded div segments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Structured rows (table segments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: String) -> Self {
        Self { kind, text, url: None, html: None, file: None, rows: None }
    }
}

/// The segments following one header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub header: String,
    #[serde(rename = "rest")]
    pub segments: Vec<Segment>,
}

impl Topic {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the header names a non-content section.
    pub fn is_excluded(&self) -> bool {
        is_excluded_topic(&self.header)
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTopics {
    pub url: String,
    pub intro: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
    pub topics: Vec<Topic>,
}

/// Siblings belonging to a header's topic, up to the first section break.
pub fn section_siblings<'a>(header: &Element<'a>) -> Vec<Element<'a>> {
    std::iter::successors(header.next_sibling_element(), Element::next_sibling_element)
        .take_while(|sibling| sibling.tag_name() != SECTION_BREAK_TAG)
        .collect()
}

/// First dispatch rule matching an element.
pub fn rule_for(element: &Element<'_>) -> Option<&'static SiblingRule> {
    let tag = element.tag_name();
    SIBLING_RULES.iter().find(|rule| {
        rule.tag == tag
            && match rule.class {
                ClassCondition::Any => true,
                ClassCondition::Token(token) => element.has_class(token),
                ClassCondition::Absent => !element.has_attr("class"),
            }
    })
}

/// Builds topics from header elements.
///
/// Holds the base URL that image sources are appended to and the renderer
/// used for embedded divs.
pub struct TopicExtractor<'a> {
    base_url: &'a str,
    code_locator: Option<Locator>,
    renderer: &'a mut dyn ImageRenderer,
}

impl<'a> TopicExtractor<'a> {
    pub fn new(base_url: &'a str, renderer: &'a mut dyn ImageRenderer) -> Self {
        Self { base_url, code_locator: None, renderer }
    }

    /// Tutorial specific code block, tried after `div.w3-code`.
    pub fn with_code_locator(mut self, locator: Option<Locator>) -> Self {
        self.code_locator = locator;
        self
    }

    /// Extracts the topic opened by `header`.
    ///
    /// Excluded sections yield a topic with no segments, and their siblings
    /// are never classified.
    pub fn extract(&mut self, header: &Element<'_>) -> Topic {
        let header_text = normalize(&header.text());
        if is_excluded_topic(&header_text) {
            return Topic { header: header_text, segments: Vec::new() };
        }

        let segments = section_siblings(header)
            .iter()
            .filter_map(|sibling| self.classify(sibling))
            .collect();

        Topic { header: header_text, segments }
    }

    /// Extracts every topic and the intro material of a page.
    pub fn extract_page(&mut self, page: &Page) -> PageTopics {
        let topics = page.headers().iter().map(|header| self.extract(header)).collect();

        PageTopics {
            url: page.url().to_string(),
            intro: page.intro_texts(),
            panel: page.intro_panel().map(|panel| element_text(&panel)),
            topics,
        }
    }

    /// Classifies one sibling; `None` for anything the table does not cover.
    pub fn classify(&mut self, sibling: &Element<'_>) -> Option<Segment> {
        match rule_for(sibling)?.action {
            SiblingAction::Paragraph => Some(self.paragraph(sibling)),
            SiblingAction::UnorderedList => Some(list(sibling, SegmentKind::UnorderedList)),
            SiblingAction::OrderedList => Some(list(sibling, SegmentKind::OrderedList)),
            SiblingAction::Skip => None,
            SiblingAction::Panel => Some(Segment::new(SegmentKind::Panel, element_text(sibling))),
            SiblingAction::Code => self.code(sibling),
            SiblingAction::EmbeddedDiv => Some(self.embedded_div(sibling)),
            SiblingAction::Table => Some(table(sibling)),
        }
    }

    fn paragraph(&self, paragraph: &Element<'_>) -> Segment {
        let text = element_text(paragraph);

        if text.is_empty() {
            let src = paragraph.find("img[src]").ok().flatten().and_then(|img| img.attr("src"));
            if let Some(src) = src {
                let mut segment = Segment::new(SegmentKind::Image, text);
                segment.url = Some(format!("{}{}", self.base_url, src));
                return segment;
            }
        }

        Segment::new(SegmentKind::Paragraph, text)
    }

    fn code(&self, example: &Element<'_>) -> Option<Segment> {
        let block = example
            .locate(&GENERAL_CODE)
            .or_else(|| self.code_locator.and_then(|locator| example.locate(&locator)))?;

        let mut segment = Segment::new(SegmentKind::Code, code_text(&block));
        segment.html = Some(block.outer_html());
        Some(segment)
    }

    fn embedded_div(&mut self, div: &Element<'_>) -> Segment {
        let html = div.outer_html();
        let file = self
            .renderer
            .render(&html)
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let mut segment = Segment::new(SegmentKind::EmbeddedDiv, html);
        segment.file = Some(file);
        segment
    }
}

fn list(list: &Element<'_>, kind: SegmentKind) -> Segment {
    let items: Vec<String> = list.select("li").unwrap_or_default().iter().map(element_text).collect();
    Segment::new(kind, items.join("\n"))
}

fn table(table: &Element<'_>) -> Segment {
    let rows = convert_tables(&table.outer_html())
        .into_iter()
        .next()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    let mut segment = Segment::new(SegmentKind::Table, rows.to_string());
    segment.rows = Some(rows);
    segment
}
