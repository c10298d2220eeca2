//! Scroll-triggered, fire-once animations.
//!
//! Three mechanisms share the same hidden → revealed style pair:
//!
//! | Mechanism | Trigger | Effect |
//! |---|---|---|
//! | [`OneShot`] + [`counter`] | `#about` first enters the viewport | stat counters count up from 0 |
//! | [`OneShot`] + [`stagger_plan`] | `#education` first enters the viewport | `.edu-item` cards reveal `i * 200ms` apart |
//! | [`observer::RevealObserver`] | element ≥ 10% visible (50px margin) | element reveals |
//!
//! Latches are monotonic: once a trigger fires it never re-arms, so
//! scrolling back up does not replay anything.

pub mod counter;
pub mod observer;

use crate::dom::{Document, NodeId};
use crate::timing::Millis;

pub use counter::{CounterAnimation, CounterFrame};
pub use observer::RevealObserver;

/// Fire-once gate tied to a section entering the viewport.
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Run `effect` the first time the section with `section_id` intersects
    /// the viewport (`top < innerHeight && bottom > 0`).
    ///
    /// The latch is checked before any geometry is read. A missing section
    /// never fires. Returns whether `effect` ran on this call.
    pub fn maybe_trigger<D, F>(&mut self, doc: &mut D, section_id: &str, effect: F) -> bool
    where
        D: Document,
        F: FnOnce(&mut D),
    {
        if self.fired {
            return false;
        }
        let Some(section) = doc.element_by_id(section_id) else {
            return false;
        };
        if !doc
            .bounding_rect(section)
            .intersects_viewport(doc.viewport_height())
        {
            return false;
        }
        self.fired = true;
        effect(doc);
        true
    }
}

/// Initial state of a reveal target: transparent, shifted down, with a
/// transition so the reveal animates.
pub fn prepare_hidden<D: Document>(doc: &mut D, node: NodeId, transition: &str) {
    doc.set_style(node, "opacity", "0");
    doc.set_style(node, "transform", "translateY(30px)");
    doc.set_style(node, "transition", transition);
}

pub fn reveal<D: Document>(doc: &mut D, node: NodeId) {
    doc.set_style(node, "opacity", "1");
    doc.set_style(node, "transform", "translateY(0)");
}

pub fn is_revealed<D: Document>(doc: &D, node: NodeId) -> bool {
    doc.style(node, "opacity").as_deref() == Some("1")
}

/// Delay of each card in a staggered reveal, relative to the trigger.
pub fn stagger_plan(cards: &[NodeId], stagger_ms: Millis) -> Vec<(Millis, NodeId)> {
    cards
        .iter()
        .enumerate()
        .map(|(i, &card)| (i as Millis * stagger_ms, card))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new(600.0);
        let body = doc.body();
        doc.append(body, Element::new("section").with_id("home").with_geometry(0.0, 1000.0));
        doc.append(body, Element::new("section").with_id("about").with_geometry(1000.0, 500.0));
        doc
    }

    #[test]
    fn fires_once_when_section_enters_viewport() {
        let mut doc = page();
        let mut latch = OneShot::new();
        let mut runs = 0;

        assert!(!latch.maybe_trigger(&mut doc, "about", |_| runs += 1));
        doc.set_scroll_y(401.0);
        assert!(latch.maybe_trigger(&mut doc, "about", |_| runs += 1));
        doc.set_scroll_y(0.0);
        doc.set_scroll_y(700.0);
        assert!(!latch.maybe_trigger(&mut doc, "about", |_| runs += 1));
        assert_eq!(runs, 1);
        assert!(latch.fired());
    }

    #[test]
    fn edge_contact_does_not_count() {
        let mut doc = page();
        let mut latch = OneShot::new();
        // Section top exactly at the bottom edge of the viewport.
        doc.set_scroll_y(400.0);
        assert!(!latch.maybe_trigger(&mut doc, "about", |_| {}));
    }

    #[test]
    fn missing_section_never_fires() {
        let mut doc = page();
        let mut latch = OneShot::new();
        assert!(!latch.maybe_trigger(&mut doc, "education", |_| {}));
        assert!(!latch.fired());
    }

    #[test]
    fn stagger_plan_spaces_cards() {
        let cards = [NodeId(3), NodeId(4), NodeId(5)];
        assert_eq!(
            stagger_plan(&cards, 200),
            vec![(0, NodeId(3)), (200, NodeId(4)), (400, NodeId(5))]
        );
    }

    #[test]
    fn hidden_then_revealed() {
        let mut doc = page();
        let about = doc.element_by_id("about").unwrap();
        prepare_hidden(&mut doc, about, "all 0.6s ease");
        assert!(!is_revealed(&doc, about));
        assert_eq!(doc.style(about, "transform").as_deref(), Some("translateY(30px)"));
        reveal(&mut doc, about);
        assert!(is_revealed(&doc, about));
        assert_eq!(doc.style(about, "transform").as_deref(), Some("translateY(0)"));
    }
}
