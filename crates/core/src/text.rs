//! Text normalization shared by every text-bearing segment.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::parse::Element;

static BR_MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

/// Trims surrounding whitespace, then turns literal `<br>` / `<br/>` into newlines.
pub fn normalize(text: &str) -> String {
    text.trim().replace("<br>", "\n").replace("<br/>", "\n")
}

/// Normalized text of an element.
pub fn element_text(element: &Element<'_>) -> String {
    normalize(&element.text())
}

/// Text of a code block with its line-break markup kept as newlines.
///
/// Code samples on the site separate lines with `<br>` elements instead of
/// newline characters, so the markup is rewritten before the text is taken.
pub fn code_text(element: &Element<'_>) -> String {
    let html = BR_MARKUP.replace_all(&element.outer_html(), "\n").into_owned();
    let fragment = Html::parse_fragment(&html);
    normalize(&fragment.root_element().text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  \n Hello world \t"), "Hello world");
    }

    #[test]
    fn test_normalize_replaces_literal_breaks() {
        assert_eq!(normalize("one<br>two<br/>three"), "one\ntwo\nthree");
    }

    #[test]
    fn test_normalize_trims_before_replacing() {
        assert_eq!(normalize("<br>text "), "\ntext");
    }

    #[test]
    fn test_code_text_keeps_lines() {
        let doc = Document::parse(
            r#"<div class="w3-code notranslate htmlHigh">&lt;h1&gt;Heading&lt;/h1&gt;<br>&lt;p&gt;Text&lt;/p&gt;<br/></div>"#,
        );
        let code = doc.find("div.w3-code").unwrap().unwrap();
        assert_eq!(code_text(&code), "<h1>Heading</h1>\n<p>Text</p>");
    }

    #[test]
    fn test_code_text_strips_highlight_spans() {
        let doc = Document::parse(
            r#"<div class="w3-code"><span class="pythonkeywordcolor">print</span>("Hello")<br>x = 1</div>"#,
        );
        let code = doc.find("div.w3-code").unwrap().unwrap();
        assert_eq!(code_text(&code), "print(\"Hello\")\nx = 1");
    }
}
