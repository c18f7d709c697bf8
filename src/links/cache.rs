//! Lazy per-page link cache

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::error::{LinkCacheError, Result};
use super::parse::parse_raw_links;
use super::source::LinkSource;
use super::types::{BoundingBox, CacheStats, Link};

/// Links of every requested page of the attached document.
///
/// Entries are computed on first request and kept until the page or the whole
/// cache is invalidated. The cache is unbounded by default; with a page bound
/// the least recently used page is evicted once the bound is exceeded.
///
/// All operations take `&mut self`; there is no internal locking.
pub struct PageLinkCache<D> {
    document: Option<D>,
    entries: LruCache<usize, Arc<[Link]>>,
    max_pages: Option<NonZeroUsize>,
    extractions: u64,
    hits: u64,
}

impl<D> Default for PageLinkCache<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> PageLinkCache<D> {
    /// Create an empty, unbounded cache with no document attached
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: None,
            entries: LruCache::unbounded(),
            max_pages: None,
            extractions: 0,
            hits: 0,
        }
    }

    /// Create a cache holding at most `max_pages` pages (at least one)
    #[must_use]
    pub fn with_max_pages(max_pages: usize) -> Self {
        let cap = NonZeroUsize::new(max_pages).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            max_pages: Some(cap),
            ..Self::new()
        }
    }

    /// Bounded when `max_pages` is set, unbounded otherwise
    #[must_use]
    pub fn with_bound(max_pages: Option<usize>) -> Self {
        match max_pages {
            Some(max) => Self::with_max_pages(max),
            None => Self::new(),
        }
    }

    /// Associate the cache with `document`, dropping every entry and counter
    /// that belonged to the previous one.
    pub fn attach(&mut self, document: D) {
        self.document = Some(document);
        self.entries.clear();
        self.extractions = 0;
        self.hits = 0;
    }

    /// Release the attached document and clear the cache
    pub fn detach(&mut self) -> Option<D> {
        self.entries.clear();
        self.document.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.document.is_some()
    }

    #[must_use]
    pub fn document(&self) -> Option<&D> {
        self.document.as_ref()
    }

    /// Remove the entry for `page`, if any
    pub fn invalidate(&mut self, page: usize) -> Result<()> {
        self.ensure_attached()?;
        self.entries.pop(&page);
        Ok(())
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_attached()?;
        self.entries.clear();
        Ok(())
    }

    /// Whether `page` has an entry, without touching recency
    #[must_use]
    pub fn is_cached(&self, page: usize) -> bool {
        self.entries.contains(&page)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_pages: self.entries.len(),
            cached_links: self.entries.iter().map(|(_, links)| links.len()).sum(),
            extractions: self.extractions,
            hits: self.hits,
            max_pages: self.max_pages.map(NonZeroUsize::get),
        }
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.document.is_none() {
            return Err(LinkCacheError::NotAttached);
        }
        Ok(())
    }
}

impl<D: LinkSource> PageLinkCache<D> {
    /// Page count of the attached document
    pub fn page_count(&self) -> Result<usize> {
        self.document
            .as_ref()
            .map(|document| document.page_count())
            .ok_or(LinkCacheError::NotAttached)
    }

    /// Links of `page`, extracting them when there is no entry or when
    /// `force_refresh` is set.
    ///
    /// A forced refresh drops the existing entry before extracting. A failed
    /// extraction writes no entry, so the next call retries.
    pub fn get_links(&mut self, page: usize, force_refresh: bool) -> Result<Arc<[Link]>> {
        let document = self.document.as_ref().ok_or(LinkCacheError::NotAttached)?;

        let page_count = document.page_count();
        if page >= page_count {
            return Err(LinkCacheError::OutOfRange { page, page_count });
        }

        if force_refresh {
            self.entries.pop(&page);
        } else if let Some(links) = self.entries.get(&page) {
            self.hits += 1;
            return Ok(links.clone());
        }

        self.extractions += 1;
        let raw = document
            .extract_links(page)
            .map_err(|source| LinkCacheError::ExtractionFailed { page, source })?;

        let links: Arc<[Link]> = parse_raw_links(raw).into();
        self.entries.put(page, links.clone());
        Ok(links)
    }

    /// Links of every page, in page order
    pub fn all_links(&mut self) -> Result<Vec<Arc<[Link]>>> {
        let page_count = self.page_count()?;
        (0..page_count)
            .map(|page| self.get_links(page, false))
            .collect()
    }

    /// First link on `page` containing the point
    pub fn link_at(&mut self, page: usize, x: f32, y: f32) -> Result<Option<Link>> {
        let links = self.get_links(page, false)?;
        Ok(links
            .iter()
            .find(|link| link.bounding_box.contains(x, y))
            .cloned())
    }

    /// Links on `page` whose box intersects `area`
    pub fn links_in_area(&mut self, page: usize, area: &BoundingBox) -> Result<Vec<Link>> {
        let links = self.get_links(page, false)?;
        Ok(links
            .iter()
            .filter(|link| link.bounding_box.intersects(area))
            .cloned()
            .collect())
    }

    /// Copies of the links on `page` with boxes scaled by `zoom`
    pub fn scaled_links(&mut self, page: usize, zoom: f32) -> Result<Vec<Link>> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(LinkCacheError::InvalidZoom(zoom));
        }
        let links = self.get_links(page, false)?;
        Ok(links.iter().map(|link| link.scaled(zoom)).collect())
    }
}
