//! Static site tables.
//!
//! Everything the scraper knows about W3Schools markup lives here as
//! constants: where the content region is, which anchors paginate, which
//! sibling shapes mean what, and which sections are not content at all.

use std::fmt;
use std::str::FromStr;

use crate::{Result, ScrapeError};

/// A `(tag, class)` pair identifying one kind of element.
///
/// `class` is a space separated list of class tokens; an element matches when
/// it carries every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub tag: &'static str,
    pub class: &'static str,
}

impl Locator {
    pub const fn new(tag: &'static str, class: &'static str) -> Self {
        Self { tag, class }
    }

    /// CSS selector form, e.g. `div.w3-panel.w3-info`.
    pub fn css(&self) -> String {
        self.class
            .split_whitespace()
            .fold(self.tag.to_string(), |mut css, token| {
                css.push('.');
                css.push_str(token);
                css
            })
    }
}

/// The single element holding all content of a page.
pub const MAIN_CONTAINER: Locator = Locator::new("div", "w3-main");

/// Pagination buttons.
pub const NEXT_BUTTON: Locator = Locator::new("a", "w3-right w3-btn");
pub const PREVIOUS_BUTTON: Locator = Locator::new("a", "w3-left w3-btn");

/// The info panel at the top of most tutorial pages.
pub const INTRO_PANEL: Locator = Locator::new("div", "w3-panel w3-info");

/// Lead paragraphs.
pub const PARAGRAPH_INTRO: Locator = Locator::new("p", "intro");

/// Code block nested inside an example div, shared by most tutorials.
pub const GENERAL_CODE: Locator = Locator::new("div", "w3-code");

/// Tag of topic headers.
pub const HEADER_TAG: &str = "h2";

/// Tag separating one topic from the next.
pub const SECTION_BREAK_TAG: &str = "hr";

/// Headers of sections that carry no tutorial content.
///
/// Reproduced literally from the site mapping, including
/// `"ExamplesReport Error"`: two entries that lost their separator upstream.
/// Neither `"Examples"` nor `"Report Error"` is excluded on its own.
pub const EXCLUDE_TOPICS: &[&str] = &[
    "Test Yourself With Exercises",
    "Exercise",
    "ExamplesReport Error",
    "Thank You For Helping Us!",
];

/// Returns true when a header names a non-content section.
pub fn is_excluded_topic(header: &str) -> bool {
    EXCLUDE_TOPICS.contains(&header.trim())
}

/// Class condition of a sibling dispatch rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassCondition {
    /// Any class attribute, or none.
    Any,
    /// The class attribute contains this token.
    Token(&'static str),
    /// No class attribute at all.
    Absent,
}

/// What to do with a sibling once its rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingAction {
    Paragraph,
    UnorderedList,
    OrderedList,
    /// Layout filler; produces nothing.
    Skip,
    Panel,
    Code,
    EmbeddedDiv,
    Table,
}

/// One row of the sibling dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingRule {
    pub tag: &'static str,
    pub class: ClassCondition,
    pub action: SiblingAction,
}

const fn rule(tag: &'static str, class: ClassCondition, action: SiblingAction) -> SiblingRule {
    SiblingRule { tag, class, action }
}

/// Sibling dispatch table, first match wins.
///
/// Order matters for divs: a `w3-clear` div is skipped even if it also
/// carries `w3-panel` or `w3-example`.
pub const SIBLING_RULES: &[SiblingRule] = &[
    rule("p", ClassCondition::Any, SiblingAction::Paragraph),
    rule("ul", ClassCondition::Any, SiblingAction::UnorderedList),
    rule("ol", ClassCondition::Any, SiblingAction::OrderedList),
    rule("div", ClassCondition::Token("w3-clear"), SiblingAction::Skip),
    rule("div", ClassCondition::Token("w3-panel"), SiblingAction::Panel),
    rule("div", ClassCondition::Token("w3-example"), SiblingAction::Code),
    rule("div", ClassCondition::Absent, SiblingAction::EmbeddedDiv),
    rule("table", ClassCondition::Any, SiblingAction::Table),
];

/// Tutorial endpoints of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tutorial {
    Html,
    Tags,
    Css,
    JavaScript,
    Sql,
    Python,
    Java,
    Php,
    W3Css,
    C,
    Cpp,
    Cs,
    React,
    R,
    JQuery,
}

impl Tutorial {
    pub const ALL: [Tutorial; 15] = [
        Tutorial::Html,
        Tutorial::Tags,
        Tutorial::Css,
        Tutorial::JavaScript,
        Tutorial::Sql,
        Tutorial::Python,
        Tutorial::Java,
        Tutorial::Php,
        Tutorial::W3Css,
        Tutorial::C,
        Tutorial::Cpp,
        Tutorial::Cs,
        Tutorial::React,
        Tutorial::R,
        Tutorial::JQuery,
    ];

    /// Root URL of the tutorial, ending in a slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Tutorial::Html => "https://www.w3schools.com/html/",
            Tutorial::Tags => "https://www.w3schools.com/tags/",
            Tutorial::Css => "https://www.w3schools.com/css/",
            Tutorial::JavaScript => "https://www.w3schools.com/js/",
            Tutorial::Sql => "https://www.w3schools.com/sql/",
            Tutorial::Python => "https://www.w3schools.com/python/",
            Tutorial::Java => "https://www.w3schools.com/java/",
            Tutorial::Php => "https://www.w3schools.com/php/",
            Tutorial::W3Css => "https://www.w3schools.com/w3css/",
            Tutorial::C => "https://www.w3schools.com/c/",
            Tutorial::Cpp => "https://www.w3schools.com/cpp/",
            Tutorial::Cs => "https://www.w3schools.com/cs/",
            Tutorial::React => "https://www.w3schools.com/react/",
            Tutorial::R => "https://www.w3schools.com/r/",
            Tutorial::JQuery => "https://www.w3schools.com/jquery/",
        }
    }

    /// Code block element used by this tutorial's examples.
    pub fn code_locator(&self) -> Locator {
        match self {
            Tutorial::Html | Tutorial::Php => Locator::new("div", "w3-code notranslate htmlHigh"),
            Tutorial::Tags => GENERAL_CODE,
            Tutorial::Css | Tutorial::W3Css => Locator::new("div", "w3-code notranslate cssHigh"),
            Tutorial::JavaScript => Locator::new("div", "w3-code notranslate javascriptHigh"),
            Tutorial::Sql => Locator::new("div", "w3-code notranslate sqlHigh"),
            Tutorial::Python | Tutorial::R => Locator::new("div", "w3-code notranslate pythonHigh"),
            Tutorial::Java => Locator::new("pre", "w3-white language-java"),
            Tutorial::C | Tutorial::Cpp => Locator::new("div", "w3-code notranslate javaHigh"),
            Tutorial::Cs => Locator::new("pre", "w3-white language-csharp"),
            Tutorial::React => Locator::new("pre", "xw3-white language-jsx"),
            Tutorial::JQuery => Locator::new("div", "w3-code notranslate jsHigh"),
        }
    }

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Tutorial::Html => "html",
            Tutorial::Tags => "tags",
            Tutorial::Css => "css",
            Tutorial::JavaScript => "js",
            Tutorial::Sql => "sql",
            Tutorial::Python => "python",
            Tutorial::Java => "java",
            Tutorial::Php => "php",
            Tutorial::W3Css => "w3css",
            Tutorial::C => "c",
            Tutorial::Cpp => "cpp",
            Tutorial::Cs => "cs",
            Tutorial::React => "react",
            Tutorial::R => "r",
            Tutorial::JQuery => "jquery",
        }
    }

    /// Finds the tutorial whose root is a prefix of `url`.
    pub fn from_url(url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| url.starts_with(t.base_url()))
    }
}

impl fmt::Display for Tutorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tutorial {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let alias = match lower.as_str() {
            "javascript" => "js",
            "c#" | "csharp" => "cs",
            "c++" => "cpp",
            other => other,
        };

        Self::ALL.into_iter().find(|t| t.name() == alias).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|t| t.name()).collect();
            ScrapeError::ConfigError(format!("Unknown tutorial: {}. Valid options: {}", s, names.join(", ")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_css() {
        assert_eq!(MAIN_CONTAINER.css(), "div.w3-main");
        assert_eq!(NEXT_BUTTON.css(), "a.w3-right.w3-btn");
        assert_eq!(Tutorial::Java.code_locator().css(), "pre.w3-white.language-java");
    }

    #[test]
    fn test_exclusion_list_is_literal() {
        assert!(is_excluded_topic("Exercise"));
        assert!(is_excluded_topic("  Thank You For Helping Us!\n"));
        assert!(is_excluded_topic("ExamplesReport Error"));
        assert!(!is_excluded_topic("Examples"));
        assert!(!is_excluded_topic("Report Error"));
        assert!(!is_excluded_topic("HTML Headings"));
    }

    #[test]
    fn test_clear_rule_precedes_panel_and_example() {
        let first_div = SIBLING_RULES.iter().position(|r| r.tag == "div").unwrap();
        assert_eq!(SIBLING_RULES[first_div].class, ClassCondition::Token("w3-clear"));
        assert_eq!(SIBLING_RULES[first_div].action, SiblingAction::Skip);
    }

    #[test]
    fn test_tutorial_round_trip_names() {
        for tutorial in Tutorial::ALL {
            assert_eq!(tutorial.name().parse::<Tutorial>().unwrap(), tutorial);
            assert!(tutorial.base_url().ends_with('/'));
        }
    }

    #[test]
    fn test_tutorial_aliases() {
        assert_eq!("JavaScript".parse::<Tutorial>().unwrap(), Tutorial::JavaScript);
        assert_eq!("c++".parse::<Tutorial>().unwrap(), Tutorial::Cpp);
        assert!(matches!("cobol".parse::<Tutorial>(), Err(ScrapeError::ConfigError(_))));
    }

    #[test]
    fn test_tutorial_from_url() {
        assert_eq!(
            Tutorial::from_url("https://www.w3schools.com/python/python_intro.asp"),
            Some(Tutorial::Python)
        );
        assert_eq!(Tutorial::from_url("https://example.com/"), None);
    }
}
