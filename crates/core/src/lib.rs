pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod page;
pub mod pagination;
pub mod parse;
pub mod render;
pub mod selectors;
pub mod session;
pub mod table;
pub mod text;
pub mod topic;

pub use cache::PageCache;
pub use config::{ScrapeConfig, ScrapeConfigBuilder};
pub use error::{Result, ScrapeError};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{EMPTY_DOCUMENT, FetchConfig, FetchOutcome, FetchResponse, PageFetcher, fetch_with_retry};
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{JsonConfig, JsonFormatter, MarkdownConfig, MarkdownFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_markdown, convert_to_text};
pub use page::{Page, locate_container};
pub use pagination::Direction;
pub use parse::{Document, Element};
pub use render::{DisabledRenderer, ImageRenderer, RenderConfig, WkhtmlRenderer};
pub use selectors::{EXCLUDE_TOPICS, Tutorial};
pub use session::Session;
pub use table::convert_tables;
pub use topic::{PageTopics, Segment, SegmentKind, Topic, TopicExtractor};
