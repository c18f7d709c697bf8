//! Document provider seam

use std::rc::Rc;
use std::sync::Arc;

use super::types::RawLink;

/// Errors from a document provider while extracting links
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[cfg(feature = "pdf")]
    #[error("PDF engine: {0}")]
    Pdf(#[from] mupdf::error::Error),

    #[error("{detail}")]
    Generic { detail: String },
}

impl ExtractError {
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic { detail: msg.into() }
    }
}

/// A document that can report its page count and the raw links of a page.
///
/// Documents without link support simply do not implement this trait.
pub trait LinkSource {
    fn page_count(&self) -> usize;

    /// Extract the raw link records of `page`, in document order.
    ///
    /// Callers guarantee `page < self.page_count()`.
    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError>;
}

impl<T: LinkSource + ?Sized> LinkSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        (**self).extract_links(page)
    }
}

impl<T: LinkSource + ?Sized> LinkSource for Box<T> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        (**self).extract_links(page)
    }
}

impl<T: LinkSource + ?Sized> LinkSource for Rc<T> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        (**self).extract_links(page)
    }
}

impl<T: LinkSource + ?Sized> LinkSource for Arc<T> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        (**self).extract_links(page)
    }
}
