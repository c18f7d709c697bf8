use super::source::ExtractError;

/// Errors returned by [`PageLinkCache`](super::PageLinkCache)
#[derive(Debug, thiserror::Error)]
pub enum LinkCacheError {
    #[error("no document attached")]
    NotAttached,

    #[error("page {page} out of range (document has {page_count} pages)")]
    OutOfRange { page: usize, page_count: usize },

    #[error("failed to extract links from page {page}: {source}")]
    ExtractionFailed {
        page: usize,
        #[source]
        source: ExtractError,
    },

    #[error("invalid zoom factor {0}")]
    InvalidZoom(f32),
}

pub type Result<T> = std::result::Result<T, LinkCacheError>;
