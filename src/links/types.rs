//! Core types for page links

use serde::Serialize;

/// Axis-aligned rectangle in page coordinate space (PDF points)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Build a normalized box from two corners given in any order.
    ///
    /// Coordinates are clamped to be non-negative, so the result always
    /// satisfies `right >= left` and `bottom >= top`.
    #[must_use]
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            left: x0.min(x1).max(0.0),
            top: y0.min(y1).max(0.0),
            right: x0.max(x1).max(0.0),
            bottom: y0.max(y1).max(0.0),
        }
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Point containment, edges inclusive
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Rectangle overlap; boxes sharing only an edge count as intersecting
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            left: self.left * factor,
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
        }
    }
}

/// Link kind tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Jump to another page of the same document
    Internal,
    /// External URL
    External,
    /// Anything the extractor could not classify
    Unknown,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Internal => "internal",
            LinkKind::External => "external",
            LinkKind::Unknown => "unknown",
        }
    }
}

/// Link destination
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    /// Page index (0-based), optionally with a point on the target page
    Page {
        page: usize,
        point: Option<(f32, f32)>,
    },
    Uri {
        uri: String,
    },
}

/// One clickable region on one page.
///
/// Links are immutable once built; the cache hands them out behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Link {
    pub kind: LinkKind,
    pub bounding_box: BoundingBox,
    pub target: Option<LinkTarget>,
    pub tooltip: String,
}

impl Link {
    /// Target page for internal links
    #[must_use]
    pub fn target_page(&self) -> Option<usize> {
        match self.target {
            Some(LinkTarget::Page { page, .. }) => Some(page),
            _ => None,
        }
    }

    /// Target URL for external links
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match &self.target {
            Some(LinkTarget::Uri { uri }) => Some(uri),
            _ => None,
        }
    }

    /// Copy of this link with its box multiplied by `zoom`
    #[must_use]
    pub fn scaled(&self, zoom: f32) -> Self {
        Self {
            bounding_box: self.bounding_box.scaled(zoom),
            ..self.clone()
        }
    }
}

/// Destination as reported by a document provider
#[derive(Clone, Debug, PartialEq)]
pub struct RawDest {
    pub page: usize,
    pub point: Option<(f32, f32)>,
}

/// Unprocessed link record returned by a [`LinkSource`](super::LinkSource).
///
/// Corners may come in any order and may be negative; see
/// [`parse_raw_links`](super::parse_raw_links) for normalisation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLink {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub dest: Option<RawDest>,
    pub uri: Option<String>,
}

impl RawLink {
    /// Internal jump record
    #[must_use]
    pub fn internal(bounds: [f32; 4], page: usize) -> Self {
        let [x0, y0, x1, y1] = bounds;
        Self {
            x0,
            y0,
            x1,
            y1,
            dest: Some(RawDest { page, point: None }),
            uri: None,
        }
    }

    /// External URL record
    #[must_use]
    pub fn external(bounds: [f32; 4], uri: impl Into<String>) -> Self {
        let [x0, y0, x1, y1] = bounds;
        Self {
            x0,
            y0,
            x1,
            y1,
            dest: None,
            uri: Some(uri.into()),
        }
    }

    /// Record with neither destination nor URI
    #[must_use]
    pub fn unknown(bounds: [f32; 4]) -> Self {
        let [x0, y0, x1, y1] = bounds;
        Self {
            x0,
            y0,
            x1,
            y1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_point(mut self, x: f32, y: f32) -> Self {
        if let Some(dest) = self.dest.as_mut() {
            dest.point = Some((x, y));
        }
        self
    }
}

/// Snapshot of cache counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Pages with a cache entry
    pub cached_pages: usize,
    /// Sum of link counts over cached pages
    pub cached_links: usize,
    /// Extraction calls since the last attach
    pub extractions: u64,
    /// Requests served from the cache since the last attach
    pub hits: u64,
    /// Page bound, if configured
    pub max_pages: Option<usize>,
}
