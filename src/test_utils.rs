//! Scripted in-memory document for exercising the link cache

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::links::{ExtractError, LinkSource, RawLink};

/// Document whose pages hold a fixed list of raw links.
///
/// Counts extraction calls and can be told to fail for specific pages. Page
/// contents can be swapped through a shared reference, which lets tests
/// change the "document" while a cache holds `&FakeDocument`.
pub struct FakeDocument {
    pages: RefCell<Vec<Vec<RawLink>>>,
    failing: RefCell<HashSet<usize>>,
    extractions: Cell<usize>,
}

impl FakeDocument {
    pub fn new(pages: Vec<Vec<RawLink>>) -> Self {
        Self {
            pages: RefCell::new(pages),
            failing: RefCell::new(HashSet::new()),
            extractions: Cell::new(0),
        }
    }

    /// Document with `count` pages and no links
    pub fn blank(count: usize) -> Self {
        Self::new(vec![Vec::new(); count])
    }

    /// Three pages; the first holds a jump to the third page and a URL
    pub fn sample() -> Self {
        Self::new(vec![
            vec![
                RawLink::internal([72.0, 100.0, 200.0, 114.0], 2),
                RawLink::external([72.0, 130.0, 260.0, 144.0], "https://example.com/docs"),
            ],
            Vec::new(),
            Vec::new(),
        ])
    }

    /// Number of `extract_links` calls so far
    pub fn extraction_count(&self) -> usize {
        self.extractions.get()
    }

    pub fn set_page_links(&self, page: usize, links: Vec<RawLink>) {
        if let Some(slot) = self.pages.borrow_mut().get_mut(page) {
            *slot = links;
        }
    }

    /// Make extraction of `page` fail until [`heal_page`](Self::heal_page)
    pub fn fail_page(&self, page: usize) {
        self.failing.borrow_mut().insert(page);
    }

    pub fn heal_page(&self, page: usize) {
        self.failing.borrow_mut().remove(&page);
    }
}

impl LinkSource for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.borrow().len()
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        self.extractions.set(self.extractions.get() + 1);

        if self.failing.borrow().contains(&page) {
            return Err(ExtractError::generic(format!("page {page} is malformed")));
        }

        self.pages
            .borrow()
            .get(page)
            .cloned()
            .ok_or_else(|| ExtractError::generic(format!("no page {page}")))
    }
}
