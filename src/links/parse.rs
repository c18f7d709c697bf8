//! Raw link record normalisation

use super::types::{BoundingBox, Link, LinkKind, LinkTarget, RawLink};

/// Maximum tooltip length for external links, in characters
pub const TOOLTIP_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Convert provider records into links, preserving extraction order
#[must_use]
pub fn parse_raw_links(raw: Vec<RawLink>) -> Vec<Link> {
    raw.into_iter().map(parse_raw_link).collect()
}

#[must_use]
pub fn parse_raw_link(raw: RawLink) -> Link {
    let bounding_box = BoundingBox::from_corners(raw.x0, raw.y0, raw.x1, raw.y1);

    if let Some(dest) = raw.dest {
        let tooltip = internal_tooltip(dest.page, dest.point);
        return Link {
            kind: LinkKind::Internal,
            bounding_box,
            target: Some(LinkTarget::Page {
                page: dest.page,
                point: dest.point,
            }),
            tooltip,
        };
    }

    match raw.uri.filter(|uri| !uri.is_empty()) {
        Some(uri) => Link {
            kind: LinkKind::External,
            bounding_box,
            tooltip: truncate_tooltip(format!("Open: {uri}")),
            target: Some(LinkTarget::Uri { uri }),
        },
        None => Link {
            kind: LinkKind::Unknown,
            bounding_box,
            target: None,
            tooltip: "Unsupported link".to_string(),
        },
    }
}

fn internal_tooltip(page: usize, point: Option<(f32, f32)>) -> String {
    let mut tooltip = format!("Go to page {}", page + 1);
    if let Some((x, y)) = point.filter(|&(x, y)| x != 0.0 || y != 0.0) {
        tooltip.push_str(&format!(" at ({x:.0}, {y:.0})"));
    }
    tooltip
}

fn truncate_tooltip(tooltip: String) -> String {
    if tooltip.chars().count() <= TOOLTIP_MAX_CHARS {
        return tooltip;
    }
    let keep = TOOLTIP_MAX_CHARS - ELLIPSIS.len();
    let mut truncated: String = tooltip.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
