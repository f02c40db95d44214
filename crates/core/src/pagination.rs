//! Next/previous navigation between tutorial pages.

use std::fmt;

use crate::page::Page;
use crate::parse::Element;
use crate::selectors::{Locator, NEXT_BUTTON, PREVIOUS_BUTTON};

/// Direction of travel through a tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Anchor carrying this direction's link.
    pub fn button(&self) -> Locator {
        match self {
            Direction::Next => NEXT_BUTTON,
            Direction::Previous => PREVIOUS_BUTTON,
        }
    }

    /// Text the anchor must contain.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Next => "Next",
            Direction::Previous => "Previous",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Previous => f.write_str("previous"),
        }
    }
}

/// The `href` of the direction's button inside `container`.
///
/// Only the first anchor with the button classes is considered; when its
/// text lacks the label there is no such page.
pub fn button_endpoint<'a>(container: &Element<'a>, direction: Direction) -> Option<&'a str> {
    let anchor = container.locate(&direction.button())?;
    if anchor.text().contains(direction.label()) { anchor.attr("href") } else { None }
}

/// Absolute URL of the neighbouring page, `None` when there is none.
///
/// Endpoints are relative to the tutorial root, so the URL is the base URL
/// with the endpoint appended.
pub fn page_url(base_url: &str, page: &Page, direction: Direction) -> Option<String> {
    let container = page.container()?;
    button_endpoint(&container, direction).map(|endpoint| format!("{}{}", base_url, endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::EMPTY_DOCUMENT;

    const BASE: &str = "https://www.w3schools.com/html/";

    fn page(buttons: &str) -> Page {
        let html = format!(
            r#"<div class="w3-main"><h2>Topic</h2><div class="w3-clear nextprev">{}</div></div>"#,
            buttons
        );
        Page::from_html(BASE, &html).unwrap()
    }

    #[test]
    fn test_next_and_previous() {
        let page = page(
            r#"<a class="w3-left w3-btn" href="default.asp">❮ Previous</a>
               <a class="w3-right w3-btn" href="html_editors.asp">Next ❯</a>"#,
        );

        assert_eq!(
            page_url(BASE, &page, Direction::Next),
            Some("https://www.w3schools.com/html/html_editors.asp".to_string())
        );
        assert_eq!(
            page_url(BASE, &page, Direction::Previous),
            Some("https://www.w3schools.com/html/default.asp".to_string())
        );
    }

    #[test]
    fn test_missing_next_anchor_is_none() {
        let page = page(r#"<a class="w3-left w3-btn" href="default.asp">❮ Previous</a>"#);
        assert_eq!(page_url(BASE, &page, Direction::Next), None);
    }

    #[test]
    fn test_anchor_without_label_is_none() {
        let page = page(r#"<a class="w3-right w3-btn" href="/spaces/">Get Certified</a>"#);
        assert_eq!(page_url(BASE, &page, Direction::Next), None);
    }

    #[test]
    fn test_anchor_without_href_is_none() {
        let page = page(r#"<a class="w3-right w3-btn">Next ❯</a>"#);
        assert_eq!(page_url(BASE, &page, Direction::Next), None);
    }

    #[test]
    fn test_unavailable_page_has_no_neighbours() {
        let page = Page::unavailable(BASE, EMPTY_DOCUMENT);
        assert_eq!(page_url(BASE, &page, Direction::Next), None);
        assert_eq!(page_url(BASE, &page, Direction::Previous), None);
    }
}
