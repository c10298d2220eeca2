//! Shared test utilities for the folio-view test suite.
//!
//! Builds pages from the sample layout in `fixtures/portfolio.toml` and
//! provides lookups that fail with a clear message instead of a bare
//! `unwrap` on `None`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = loaded_page();
//! scroll_and_settle(&mut page, 900.0);
//! assert_eq!(page.nav().active_section(), Some("about"));
//! ```

use crate::config::BehaviorConfig;
use crate::dom::{Document, MemoryDocument, NodeId};
use crate::event::PageEvent;
use crate::layout::PageLayout;
use crate::page::Page;

const SAMPLE_LAYOUT: &str = include_str!("../fixtures/portfolio.toml");

// =========================================================================
// Fixture setup
// =========================================================================

/// The sample portfolio: six sections, stats, three education cards, a
/// two-slide carousel, a contact form and two modals.
pub fn sample_layout() -> PageLayout {
    PageLayout::from_toml_str(SAMPLE_LAYOUT).unwrap()
}

/// A page over the sample layout with stock behavior, before any events.
pub fn sample_page() -> Page<MemoryDocument> {
    Page::new(sample_layout().to_document(), BehaviorConfig::default())
}

/// A page that has seen `DOMContentLoaded` and `load`, with the hero
/// reveal already run.
pub fn loaded_page() -> Page<MemoryDocument> {
    let mut page = sample_page();
    page.dispatch(PageEvent::DomContentLoaded);
    page.dispatch(PageEvent::Load);
    page.advance(200);
    page
}

/// Move the viewport to `y`, fire a scroll event and let every pending
/// timer (throttles, counters, staggered reveals) run to completion.
pub fn scroll_and_settle(page: &mut Page<MemoryDocument>, y: f64) {
    page.doc_mut().set_scroll_y(y);
    page.dispatch(PageEvent::Scroll);
    page.advance(2_000);
}

// =========================================================================
// Lookups
// =========================================================================

/// Find an element by id. Panics with the id when it is missing.
pub fn node(doc: &MemoryDocument, id: &str) -> NodeId {
    doc.element_by_id(id)
        .unwrap_or_else(|| panic!("no element with id '{id}'"))
}

/// Ids of elements carrying `class`, in document order.
pub fn ids_with_class(doc: &MemoryDocument, class: &str) -> Vec<String> {
    doc.elements_by_class(class)
        .into_iter()
        .filter_map(|n| doc.id_of(n))
        .collect()
}

/// Ids of the elements marked `active` among those with `class`.
pub fn active_ids(doc: &MemoryDocument, class: &str) -> Vec<String> {
    doc.elements_by_class(class)
        .into_iter()
        .filter(|&n| doc.has_class(n, "active"))
        .filter_map(|n| doc.id_of(n))
        .collect()
}
