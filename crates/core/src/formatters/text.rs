use serde_json::Value;

use crate::Result;
use crate::topic::{PageTopics, Segment, SegmentKind, Topic};

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include the page URL above its topics
    pub include_header: bool,
}

/// Plain text formatter for extracted topics
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, pages: &[PageTopics]) -> Result<String> {
        convert_to_text(pages, &self.config)
    }
}

/// Convert extracted pages to plain text
pub fn convert_to_text(pages: &[PageTopics], config: &TextConfig) -> Result<String> {
    let mut output = String::new();

    for page in pages {
        if config.include_header {
            output.push_str(&page.url);
            output.push_str("\n\n");
        }

        for topic in page.topics.iter().filter(|topic| !topic.is_excluded()) {
            output.push_str(&topic_to_text(topic));
            output.push('\n');
        }
    }

    let text = if config.line_width > 0 { wrap_text(&output, config.line_width) } else { output };

    Ok(text.trim().to_string())
}

/// Header underlined with `=`, then every segment's text
fn topic_to_text(topic: &Topic) -> String {
    let mut output = String::new();
    output.push_str(&topic.header);
    output.push('\n');
    output.push_str(&"=".repeat(topic.header.chars().count()));
    output.push_str("\n\n");

    for segment in &topic.segments {
        let text = segment_text(segment);
        if !text.is_empty() {
            output.push_str(&text);
            output.push_str("\n\n");
        }
    }

    output
}

fn segment_text(segment: &Segment) -> String {
    match segment.kind {
        SegmentKind::Image => segment.url.clone().unwrap_or_default(),
        SegmentKind::EmbeddedDiv => segment.file.clone().unwrap_or_default(),
        SegmentKind::Table => segment.rows.as_ref().map(table_lines).unwrap_or_default(),
        _ => segment.text.clone(),
    }
}

/// One tab separated line per row
fn table_lines(rows: &Value) -> String {
    let Some(rows) = rows.as_array() else {
        return String::new();
    };

    let mut lines = Vec::new();
    if let Some(Value::Object(first)) = rows.first() {
        lines.push(first.keys().cloned().collect::<Vec<_>>().join("\t"));
    }

    for row in rows {
        let cells: Vec<String> = match row {
            Value::Object(record) => record.values().map(value_text).collect(),
            Value::Array(cells) => cells.iter().map(value_text).collect(),
            other => vec![value_text(other)],
        };
        lines.push(cells.join("\t"));
    }

    lines.join("\n")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Wrap text to specified line width, leaving short lines and blank lines intact
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();

    for line in text.lines() {
        if line.chars().count() <= width {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                result.push_str(&current);
                result.push('\n');
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        result.push_str(&current);
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> PageTopics {
        let mut table = Segment::new(SegmentKind::Table, String::new());
        table.rows = Some(json!([{"Tag": "<b>", "Description": "Bold"}]));

        PageTopics {
            url: "https://www.w3schools.com/html/html_elements.asp".to_string(),
            intro: Vec::new(),
            panel: None,
            topics: vec![
                Topic {
                    header: "HTML Elements".to_string(),
                    segments: vec![Segment::new(SegmentKind::Paragraph, "An element has a start tag.".to_string()), table],
                },
                Topic { header: "Test Yourself With Exercises".to_string(), segments: Vec::new() },
            ],
        }
    }

    #[test]
    fn test_plain_text() {
        let text = convert_to_text(&[page()], &TextConfig::default()).unwrap();

        assert!(text.starts_with("HTML Elements\n=============\n\nAn element has a start tag."));
        assert!(text.contains("Tag\tDescription\n<b>\tBold"));
        assert!(!text.contains("Exercises"));
    }

    #[test]
    fn test_header_line() {
        let config = TextConfig { include_header: true, ..Default::default() };
        let text = TextFormatter::new(config).convert(&[page()]).unwrap();
        assert!(text.starts_with("https://www.w3schools.com/html/html_elements.asp\n\n"));
    }

    #[test]
    fn test_wrap_text() {
        let wrapped = wrap_text("one two three four five", 9);
        assert_eq!(wrapped, "one two\nthree\nfour five\n");
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), "a\n\nb\n");
    }
}
