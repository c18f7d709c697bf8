//! Link dump report built through the page link cache

use std::collections::BTreeMap;
use std::fmt::Write;

use log::warn;
use serde::Serialize;

use crate::links::{
    CacheStats, Link, LinkAction, LinkKind, LinkPolicy, LinkSource, LinkTarget, PageLinkCache,
    resolve_action,
};

#[derive(Debug, Serialize)]
pub struct LinkEntry {
    #[serde(flatten)]
    pub link: Link,
    pub action: LinkAction,
}

#[derive(Debug, Serialize)]
pub struct PageReport {
    /// Page index (0-based)
    pub page: usize,
    pub links: Vec<LinkEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkReport {
    pub page_count: usize,
    pub pages: Vec<PageReport>,
    pub total_links: usize,
    pub by_kind: BTreeMap<LinkKind, usize>,
    pub cache: CacheStats,
}

/// Collect links for `pages` (every page when empty).
///
/// Per-page failures are recorded in the report and do not stop the walk.
pub fn collect_report<D: LinkSource>(
    cache: &mut PageLinkCache<D>,
    pages: &[usize],
    policy: &LinkPolicy,
) -> crate::links::Result<LinkReport> {
    let page_count = cache.page_count()?;
    let pages: Vec<usize> = if pages.is_empty() {
        (0..page_count).collect()
    } else {
        pages.to_vec()
    };

    let mut page_reports = Vec::with_capacity(pages.len());
    let mut by_kind = BTreeMap::new();
    let mut total_links = 0;

    for page in pages {
        match cache.get_links(page, false) {
            Ok(links) => {
                total_links += links.len();
                let links = links
                    .iter()
                    .map(|link| {
                        *by_kind.entry(link.kind).or_insert(0) += 1;
                        LinkEntry {
                            link: link.clone(),
                            action: resolve_action(link, page_count, policy),
                        }
                    })
                    .collect();
                page_reports.push(PageReport {
                    page,
                    links,
                    error: None,
                });
            }
            Err(e) => {
                warn!("Skipping page {page}: {e}");
                page_reports.push(PageReport {
                    page,
                    links: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(LinkReport {
        page_count,
        pages: page_reports,
        total_links,
        by_kind,
        cache: cache.stats(),
    })
}

/// Human readable rendering, showing at most `max_per_page` links per page
#[must_use]
pub fn render_text(report: &LinkReport, max_per_page: usize) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "Document has {} pages", report.page_count);
    let _ = writeln!(out, "{rule}");

    for page in &report.pages {
        if let Some(error) = &page.error {
            let _ = writeln!(out, "\nPAGE {} - error: {error}", page.page + 1);
            continue;
        }
        if page.links.is_empty() {
            continue;
        }

        let _ = writeln!(
            out,
            "\nPAGE {} - Found {} links:",
            page.page + 1,
            page.links.len()
        );
        let _ = writeln!(out, "{}", "-".repeat(40));

        for (i, entry) in page.links.iter().take(max_per_page).enumerate() {
            let link = &entry.link;
            let bbox = &link.bounding_box;
            let _ = writeln!(
                out,
                "  {:2}. [{}] {}",
                i + 1,
                link.kind.as_str().to_uppercase(),
                link.tooltip
            );
            let _ = writeln!(
                out,
                "      Position: ({:.1}, {:.1}) Size: {:.1}x{:.1}",
                bbox.left,
                bbox.top,
                bbox.width(),
                bbox.height()
            );
            if let Some(target) = &link.target {
                let _ = writeln!(out, "      Target: {}", describe_target(target));
            }
            let _ = writeln!(out, "      Action: {}", describe_action(&entry.action));
        }

        if page.links.len() > max_per_page {
            let _ = writeln!(
                out,
                "      ... ({} more links not shown)",
                page.links.len() - max_per_page
            );
        }
    }

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "   Pages scanned: {}", report.pages.len());
    let _ = writeln!(out, "   Total links found: {}", report.total_links);

    if report.by_kind.is_empty() {
        let _ = writeln!(out, "   No links found");
    } else {
        let _ = writeln!(out, "   Links by kind:");
        for (kind, count) in &report.by_kind {
            let percentage = *count as f64 * 100.0 / report.total_links as f64;
            let _ = writeln!(
                out,
                "     {}: {count} ({percentage:.1}%)",
                kind.as_str().to_uppercase()
            );
        }
    }

    let stats = &report.cache;
    let _ = writeln!(
        out,
        "   Cache: {} pages, {} links, {} extractions, {} hits",
        stats.cached_pages, stats.cached_links, stats.extractions, stats.hits
    );

    out
}

fn describe_target(target: &LinkTarget) -> String {
    match target {
        LinkTarget::Page {
            page,
            point: Some((x, y)),
        } => format!("page {} at ({x:.1}, {y:.1})", page + 1),
        LinkTarget::Page { page, point: None } => format!("page {}", page + 1),
        LinkTarget::Uri { uri } => uri.clone(),
    }
}

fn describe_action(action: &LinkAction) -> String {
    match action {
        LinkAction::Navigate { page, .. } => format!("navigate to page {}", page + 1),
        LinkAction::OpenUrl { url } => format!("open {url}"),
        LinkAction::Blocked => "blocked by policy".to_string(),
        LinkAction::Unsupported => "unsupported".to_string(),
    }
}
