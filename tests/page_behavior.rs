//! End-to-end behavior of a page built from the sample layout.
//!
//! Run with: cargo test --test page_behavior

use folio_view::config::{BehaviorConfig, resolve_config};
use folio_view::dom::{Document, MemoryDocument};
use folio_view::event::PageEvent;
use folio_view::layout::{PageLayout, load_layout};
use folio_view::page::Page;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn layout() -> PageLayout {
    load_layout(&fixture("portfolio.toml")).unwrap()
}

fn overlay(toml_text: &str) -> BehaviorConfig {
    resolve_config(Some(toml::from_str(toml_text).unwrap())).unwrap()
}

fn loaded(config: BehaviorConfig) -> Page<MemoryDocument> {
    let mut page = Page::new(layout().to_document(), config);
    page.dispatch(PageEvent::DomContentLoaded);
    page.dispatch(PageEvent::Load);
    page.advance(500);
    page
}

fn scroll_to(page: &mut Page<MemoryDocument>, y: f64) {
    page.doc_mut().set_scroll_y(y);
    page.dispatch(PageEvent::Scroll);
    page.advance(2_000);
}

fn active_links(page: &Page<MemoryDocument>) -> Vec<String> {
    let doc = page.doc();
    doc.elements_by_class("nav-link")
        .into_iter()
        .filter(|&l| doc.has_class(l, "active"))
        .filter_map(|l| doc.id_of(l))
        .collect()
}

#[test]
fn exactly_one_link_is_active_at_every_offset() {
    let mut page = loaded(BehaviorConfig::default());
    let mut y = 0.0;
    while y <= 3600.0 {
        scroll_to(&mut page, y);
        assert_eq!(active_links(&page).len(), 1, "at scroll {y}");
        y += 50.0;
    }
}

#[test]
fn highlight_follows_sections_then_bottom_override() {
    let mut page = loaded(BehaviorConfig::default());
    let expected = [
        (0.0, "home"),
        (700.0, "about"),
        (1500.0, "hobbies"),
        (2100.0, "education"),
        (2900.0, "projects"),
        (3600.0, "contact"),
    ];
    for (y, section) in expected {
        scroll_to(&mut page, y);
        assert_eq!(active_links(&page), [format!("nav-{section}")], "at scroll {y}");
    }
}

#[test]
fn uncovered_offset_keeps_previous_highlight() {
    // A large lead pushes every range below the top of the page.
    let config = overlay("[nav]\nsection_offset = -400.0");
    let mut page = loaded(config);
    assert_eq!(page.nav().active_section(), None);

    scroll_to(&mut page, 500.0);
    assert_eq!(page.nav().active_section(), Some("home"));
    // Home's range now starts at 330: nothing covers 200.
    scroll_to(&mut page, 200.0);
    assert_eq!(active_links(&page), ["nav-home"]);
}

#[test]
fn carousel_advance_is_an_involution() {
    let mut page = loaded(BehaviorConfig::default());
    let start = page.carousel().index();
    page.controls().change_project_slide(1);
    page.controls().change_project_slide(1);
    assert_eq!(page.carousel().index(), start);
    page.controls().change_project_slide(1);
    page.controls().change_project_slide(-1);
    assert_eq!(page.carousel().index(), start);
}

#[test]
fn swipe_of_sixty_pixels_advances_forty_does_not() {
    let mut page = loaded(BehaviorConfig::default());
    let target = Some("projects-carousel".to_string());
    page.dispatch(PageEvent::TouchStart { x: 200.0, target: target.clone() });
    page.dispatch(PageEvent::TouchEnd { x: 140.0, target: target.clone() });
    assert_eq!(page.carousel().index(), 1);

    page.dispatch(PageEvent::TouchStart { x: 200.0, target: target.clone() });
    page.dispatch(PageEvent::TouchEnd { x: 160.0, target });
    assert_eq!(page.carousel().index(), 1);
}

#[test]
fn modal_round_trip_restores_body() {
    let mut page = loaded(BehaviorConfig::default());
    let body = page.doc().body();
    page.doc_mut().set_style(body, "overflow", "scroll");

    page.controls().open_modal("note-g");
    assert_eq!(page.doc().style(body, "overflow").as_deref(), Some("hidden"));
    page.controls().close_modal("note-g");
    assert_eq!(page.doc().style(body, "overflow").as_deref(), Some("scroll"));
}

#[test]
fn close_all_is_idempotent() {
    let mut page = loaded(BehaviorConfig::default());
    page.controls().open_modal("memoir");
    page.dispatch(PageEvent::key("Escape"));
    let once = page.doc().clone();
    page.dispatch(PageEvent::key("Escape"));
    assert_eq!(page.doc(), &once);
}

#[test]
fn counters_end_on_their_labels() {
    let mut page = loaded(BehaviorConfig::default());
    scroll_to(&mut page, 900.0);
    assert_eq!(page.view_state().counters, ["150+", "4.5", "12"]);
}

#[test]
fn slower_counters_follow_config() {
    let config = overlay("[counters]\nduration_ms = 1600\ntick_ms = 32");
    let mut page = loaded(config);
    page.doc_mut().set_scroll_y(900.0);
    page.dispatch(PageEvent::Scroll);
    // 10ms throttle, then five 32ms ticks of 3.
    page.advance(10 + 5 * 32);
    assert_eq!(page.view_state().counters[0], "15+");
}

#[test]
fn one_shot_triggers_survive_scrolling_back() {
    let mut page = loaded(BehaviorConfig::default());
    scroll_to(&mut page, 2300.0);
    assert_eq!(page.view_state().revealed_cards, 3);
    scroll_to(&mut page, 0.0);
    scroll_to(&mut page, 2300.0);
    let state = page.view_state();
    assert!(state.education_animated);
    assert_eq!(state.revealed_cards, 3);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn pages_are_independent() {
    let mut first = loaded(BehaviorConfig::default());
    let second = loaded(BehaviorConfig::default());
    first.controls().change_project_slide(1);
    scroll_to(&mut first, 900.0);
    assert_eq!(first.carousel().index(), 1);
    assert_eq!(second.carousel().index(), 0);
    assert!(!second.counters_animated());
}
