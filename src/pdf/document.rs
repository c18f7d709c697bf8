//! MuPDF-backed link source

use std::path::{Path, PathBuf};

use log::debug;
use mupdf::{DestinationKind, Document};

use crate::links::{ExtractError, LinkSource, RawDest, RawLink};

/// A PDF opened with MuPDF
pub struct MupdfDocument {
    doc: Document,
    path: PathBuf,
    page_count: usize,
}

impl MupdfDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let doc = Document::open(path.to_string_lossy().as_ref())?;
        let page_count = usize::try_from(doc.page_count()?).unwrap_or(0);
        debug!("Opened {path:?} with {page_count} pages");

        Ok(Self {
            doc,
            path: path.to_path_buf(),
            page_count,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LinkSource for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_links(&self, page: usize) -> Result<Vec<RawLink>, ExtractError> {
        let page_num = i32::try_from(page)
            .map_err(|_| ExtractError::generic(format!("page index {page} exceeds engine range")))?;
        let page = self.doc.load_page(page_num)?;
        let links: Vec<RawLink> = page.links()?.map(raw_link).collect();
        debug!("Page {page_num}: extracted {} links", links.len());
        Ok(links)
    }
}

fn raw_link(link: mupdf::Link) -> RawLink {
    let rect = link.bounds;
    let dest = link.dest.map(|dest| RawDest {
        page: dest.loc.page_number as usize,
        point: dest_point(&dest.kind),
    });
    let uri = Some(link.uri).filter(|uri| !uri.is_empty());

    RawLink {
        x0: rect.x0,
        y0: rect.y0,
        x1: rect.x1,
        y1: rect.y1,
        dest,
        uri,
    }
}

/// Point on the target page named by the destination, if it gives one.
///
/// Missing coordinates of a partially specified destination default to 0.
fn dest_point(kind: &DestinationKind) -> Option<(f32, f32)> {
    match *kind {
        DestinationKind::XYZ { left, top, .. } if left.is_some() || top.is_some() => {
            Some((left.unwrap_or(0.0), top.unwrap_or(0.0)))
        }
        DestinationKind::FitH { top: Some(top) } | DestinationKind::FitBH { top: Some(top) } => {
            Some((0.0, top))
        }
        DestinationKind::FitV { left: Some(left) } | DestinationKind::FitBV { left: Some(left) } => {
            Some((left, 0.0))
        }
        _ => None,
    }
}
