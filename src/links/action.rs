//! What activating a link should do

use serde::Serialize;

use super::types::{Link, LinkKind, LinkTarget};

/// Rules applied when a link is activated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LinkPolicy {
    pub allow_external_urls: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            allow_external_urls: true,
        }
    }
}

/// Outcome of activating a link
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LinkAction {
    Navigate {
        page: usize,
        point: Option<(f32, f32)>,
    },
    OpenUrl {
        url: String,
    },
    /// External URL refused by policy
    Blocked,
    Unsupported,
}

/// Resolve `link` against a document with `page_count` pages
#[must_use]
pub fn resolve_action(link: &Link, page_count: usize, policy: &LinkPolicy) -> LinkAction {
    match (&link.kind, &link.target) {
        (LinkKind::Internal, Some(LinkTarget::Page { page, point })) if *page < page_count => {
            LinkAction::Navigate {
                page: *page,
                point: *point,
            }
        }
        (LinkKind::External, Some(LinkTarget::Uri { uri })) => {
            if policy.allow_external_urls {
                LinkAction::OpenUrl { url: uri.clone() }
            } else {
                LinkAction::Blocked
            }
        }
        _ => LinkAction::Unsupported,
    }
}
