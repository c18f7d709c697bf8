//! Page link extraction and caching

mod action;
mod cache;
mod error;
mod parse;
mod source;
mod types;

pub use action::{LinkAction, LinkPolicy, resolve_action};
pub use cache::PageLinkCache;
pub use error::{LinkCacheError, Result};
pub use parse::{TOOLTIP_MAX_CHARS, parse_raw_link, parse_raw_links};
pub use source::{ExtractError, LinkSource};
pub use types::*;
