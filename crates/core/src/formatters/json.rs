use crate::Result;
use crate::topic::PageTopics;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Keep topics of excluded sections (always empty)
    pub include_excluded: bool,
}

/// Convert extracted pages to a JSON array, one object per page
pub fn convert_to_json(pages: &[PageTopics], config: &JsonConfig) -> Result<String> {
    let pages: Vec<PageTopics> = pages.iter().map(|page| filtered(page, config)).collect();

    if config.pretty { Ok(serde_json::to_string_pretty(&pages)?) } else { Ok(serde_json::to_string(&pages)?) }
}

fn filtered(page: &PageTopics, config: &JsonConfig) -> PageTopics {
    let mut page = page.clone();
    if !config.include_excluded {
        page.topics.retain(|topic| !topic.is_excluded());
    }
    page
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, pages: &[PageTopics]) -> Result<String> {
        convert_to_json(pages, &self.config)
    }
}
