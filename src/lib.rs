pub mod links;
pub mod panic_handler;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod settings;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use links::{Link, LinkCacheError, LinkKind, LinkSource, PageLinkCache, RawLink};
