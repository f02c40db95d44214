use serde_json::Value;

use crate::Result;
use crate::topic::{PageTopics, Segment, SegmentKind, Topic};

/// Configuration for Markdown output
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Include intro paragraphs and the info panel before the topics
    pub include_intro: bool,
    /// Strip images from output
    pub strip_images: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { include_intro: true, strip_images: false }
    }
}

/// Convert extracted pages to Markdown, pages separated by a rule
pub fn convert_to_markdown(pages: &[PageTopics], config: &MarkdownConfig) -> Result<String> {
    let rendered: Vec<String> = pages.iter().map(|page| page_to_markdown(page, config)).collect();
    Ok(rendered.join("\n---\n\n"))
}

fn page_to_markdown(page: &PageTopics, config: &MarkdownConfig) -> String {
    let mut output = format!("<!-- {} -->\n\n", page.url);

    if config.include_intro {
        if let Some(panel) = &page.panel {
            output.push_str(&quote(panel));
            output.push_str("\n\n");
        }
        for intro in &page.intro {
            output.push_str(intro);
            output.push_str("\n\n");
        }
    }

    for topic in page.topics.iter().filter(|topic| !topic.is_excluded()) {
        output.push_str(&topic_to_markdown(topic, config));
    }

    output
}

/// Render one topic as a `##` section
pub fn topic_to_markdown(topic: &Topic, config: &MarkdownConfig) -> String {
    let mut output = format!("## {}\n\n", topic.header);

    for segment in &topic.segments {
        if let Some(block) = segment_to_markdown(segment, config) {
            output.push_str(&block);
            output.push_str("\n\n");
        }
    }

    output
}

fn segment_to_markdown(segment: &Segment, config: &MarkdownConfig) -> Option<String> {
    let block = match segment.kind {
        SegmentKind::Paragraph if segment.text.is_empty() => return None,
        SegmentKind::Paragraph => segment.text.clone(),
        SegmentKind::Image => {
            if config.strip_images {
                return None;
            }
            format!("![]({})", segment.url.as_deref().unwrap_or_default())
        }
        SegmentKind::UnorderedList => segment.text.lines().map(|line| format!("- {}", line)).collect::<Vec<_>>().join("\n"),
        SegmentKind::OrderedList => segment
            .text
            .lines()
            .enumerate()
            .map(|(index, line)| format!("{}. {}", index + 1, line))
            .collect::<Vec<_>>()
            .join("\n"),
        SegmentKind::Panel => quote(&segment.text),
        SegmentKind::Code => format!("```\n{}\n```", segment.text),
        SegmentKind::EmbeddedDiv => match segment.file.as_deref() {
            Some(file) if !file.is_empty() && !config.strip_images => format!("![]({})", file),
            _ => segment.text.clone(),
        },
        SegmentKind::Table => table_to_markdown(segment.rows.as_ref()?)?,
    };

    Some(block)
}

fn quote(text: &str) -> String {
    text.lines().map(|line| format!("> {}", line)).collect::<Vec<_>>().join("\n")
}

/// Render structured table rows as a pipe table
///
/// Object rows take their keys as the header. Array rows use the first row
/// as the header.
pub fn table_to_markdown(rows: &Value) -> Option<String> {
    let rows = rows.as_array()?;
    let first = rows.first()?;

    let (header, body): (Vec<String>, Vec<Vec<String>>) = match first {
        Value::Object(record) => {
            let header: Vec<String> = record.keys().cloned().collect();
            let body = rows
                .iter()
                .filter_map(Value::as_object)
                .map(|row| header.iter().map(|key| cell(row.get(key))).collect())
                .collect();
            (header, body)
        }
        Value::Array(_) => {
            let mut all = rows
                .iter()
                .filter_map(Value::as_array)
                .map(|row| row.iter().map(|value| cell(Some(value))).collect::<Vec<_>>());
            let header = all.next().unwrap_or_default();
            (header, all.collect())
        }
        _ => return None,
    };

    let mut table = String::new();
    table.push_str(&pipe_row(&header));
    table.push_str(&pipe_row(&vec!["---".to_string(); header.len()]));
    for row in &body {
        table.push_str(&pipe_row(row));
    }

    Some(table.trim_end().to_string())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.replace('|', "\\|").replace('\n', " "),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

/// Markdown formatter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, pages: &[PageTopics]) -> Result<String> {
        convert_to_markdown(pages, &self.config)
    }
}
