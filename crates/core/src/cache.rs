//! Process-lifetime page cache keyed by URL.

use std::collections::HashMap;

use crate::page::Page;

/// Loaded pages by URL.
///
/// Owned by a session and filled on first successful fetch. There is no
/// eviction: entries live until the owning session is dropped.
#[derive(Default)]
pub struct PageCache {
    pages: HashMap<String, Page>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Page> {
        self.pages.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Stores a page under its own URL, keeping any page already cached there.
    pub fn insert(&mut self, page: Page) -> &Page {
        self.pages.entry(page.url().to_string()).or_insert(page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
