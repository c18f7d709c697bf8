use std::rc::Rc;
use std::sync::Arc;

use pagelinks::links::{LinkCacheError, LinkKind, LinkTarget, PageLinkCache, RawLink};
use pagelinks::test_utils::FakeDocument;

#[test]
fn repeated_request_extracts_once() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    for page in 0..3 {
        let first = cache.get_links(page, false).unwrap();
        let second = cache.get_links(page, false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    assert_eq!(doc.extraction_count(), 3);
}

#[test]
fn invalidate_forces_exactly_one_extraction() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    cache.get_links(1, false).unwrap();
    let before = doc.extraction_count();

    cache.invalidate(1).unwrap();
    cache.get_links(1, false).unwrap();
    cache.get_links(1, false).unwrap();

    assert_eq!(doc.extraction_count(), before + 1);
}

#[test]
fn clear_drops_every_entry() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    cache.all_links().unwrap();
    assert_eq!(doc.extraction_count(), 3);

    cache.clear().unwrap();
    assert_eq!(cache.stats().cached_pages, 0);

    for page in 0..3 {
        assert!(!cache.is_cached(page));
        cache.get_links(page, false).unwrap();
    }
    assert_eq!(doc.extraction_count(), 6);
}

#[test]
fn attach_never_returns_entries_from_previous_document() {
    let first = Rc::new(FakeDocument::sample());
    let second = Rc::new(FakeDocument::new(vec![vec![RawLink::unknown([
        0.0, 0.0, 5.0, 5.0,
    ])]]));

    let mut cache = PageLinkCache::new();
    cache.attach(Rc::clone(&first));
    assert_eq!(cache.get_links(0, false).unwrap().len(), 2);

    cache.attach(Rc::clone(&second));
    let links = cache.get_links(0, false).unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].kind, LinkKind::Unknown);
    assert_eq!(second.extraction_count(), 1);
    assert_eq!(cache.stats().extractions, 1);
    assert!(matches!(
        cache.get_links(2, false),
        Err(LinkCacheError::OutOfRange {
            page: 2,
            page_count: 1,
        })
    ));
}

#[test]
fn force_refresh_always_extracts() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    let a = cache.get_links(0, true).unwrap();
    let b = cache.get_links(0, true).unwrap();

    assert_eq!(doc.extraction_count(), 2);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a, b);

    let c = cache.get_links(0, false).unwrap();
    assert!(Arc::ptr_eq(&b, &c));
}

#[test]
fn three_page_document_scenario() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    let links = cache.get_links(0, false).unwrap();
    assert_eq!(doc.extraction_count(), 1);
    assert_eq!(links.len(), 2);

    assert_eq!(links[0].kind, LinkKind::Internal);
    assert_eq!(
        links[0].target,
        Some(LinkTarget::Page {
            page: 2,
            point: None,
        })
    );
    assert_eq!(links[0].tooltip, "Go to page 3");

    assert_eq!(links[1].kind, LinkKind::External);
    assert_eq!(links[1].uri(), Some("https://example.com/docs"));

    let again = cache.get_links(0, false).unwrap();
    assert!(Arc::ptr_eq(&links, &again));
    assert_eq!(doc.extraction_count(), 1);

    cache.invalidate(0).unwrap();
    cache.get_links(0, false).unwrap();
    assert_eq!(doc.extraction_count(), 2);
}

#[test]
fn page_past_end_is_out_of_range() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    let err = cache.get_links(5, false).unwrap_err();
    assert!(matches!(
        err,
        LinkCacheError::OutOfRange {
            page: 5,
            page_count: 3,
        }
    ));
    assert_eq!(doc.extraction_count(), 0);
}

#[test]
fn extraction_failure_is_retried_after_refresh() {
    let doc = FakeDocument::sample();
    doc.fail_page(0);
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    assert!(matches!(
        cache.get_links(0, false),
        Err(LinkCacheError::ExtractionFailed { page: 0, .. })
    ));
    assert!(matches!(
        cache.get_links(0, false),
        Err(LinkCacheError::ExtractionFailed { page: 0, .. })
    ));
    assert_eq!(doc.extraction_count(), 2);
    assert_eq!(cache.stats().cached_pages, 0);

    doc.heal_page(0);
    assert_eq!(cache.get_links(0, true).unwrap().len(), 2);
    assert_eq!(doc.extraction_count(), 3);
}

#[test]
fn not_attached_until_attach() {
    let mut cache: PageLinkCache<FakeDocument> = PageLinkCache::new();
    assert!(matches!(
        cache.get_links(0, false),
        Err(LinkCacheError::NotAttached)
    ));
    assert!(matches!(cache.clear(), Err(LinkCacheError::NotAttached)));

    cache.attach(FakeDocument::blank(2));
    assert!(cache.get_links(1, false).unwrap().is_empty());
    assert_eq!(cache.document().map(|doc| doc.extraction_count()), Some(1));
}

#[test]
fn dropping_cache_leaves_document_usable() {
    let doc = FakeDocument::sample();
    {
        let mut cache = PageLinkCache::new();
        cache.attach(&doc);
        cache.get_links(0, false).unwrap();
    }

    let mut cache = PageLinkCache::new();
    cache.attach(&doc);
    cache.get_links(0, false).unwrap();
    assert_eq!(doc.extraction_count(), 2);
}

#[test]
fn failed_forced_refresh_drops_stale_entry() {
    let doc = FakeDocument::sample();
    let mut cache = PageLinkCache::new();
    cache.attach(&doc);

    cache.get_links(0, false).unwrap();
    assert!(cache.is_cached(0));

    doc.fail_page(0);
    assert!(matches!(
        cache.get_links(0, true),
        Err(LinkCacheError::ExtractionFailed { page: 0, .. })
    ));
    assert!(!cache.is_cached(0));
    assert_eq!(doc.extraction_count(), 2);

    doc.heal_page(0);
    assert_eq!(cache.get_links(0, false).unwrap().len(), 2);
    assert_eq!(doc.extraction_count(), 3);
}
