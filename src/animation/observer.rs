//! Visibility-threshold reveal for arbitrary marked elements.
//!
//! Mirrors an `IntersectionObserver` with `threshold` and `rootMargin`: the
//! viewport is grown by the margin on both edges and an element is revealed
//! once the visible fraction of its height reaches the threshold. Each
//! element is unobserved after its reveal, so there is no un-reveal on
//! scroll-out and no latch is needed.

use super::{prepare_hidden, reveal};
use crate::config::ObserverConfig;
use crate::dom::{Document, NodeId, Rect};
use tracing::debug;

/// Classes that opt an element into the observer.
pub const OBSERVED_CLASSES: [&str; 3] = ["animate-fade-in", "animate-slide-up", "animate-bounce"];

/// Fraction of `rect` inside the viewport grown by `margin`.
///
/// Zero-height elements count as fully visible while their top lies inside
/// the grown viewport.
pub fn intersection_ratio(rect: Rect, viewport_height: f64, margin: f64) -> f64 {
    let root_top = -margin;
    let root_bottom = viewport_height + margin;
    let height = rect.height();
    if height <= 0.0 {
        return if rect.top >= root_top && rect.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let visible = rect.bottom.min(root_bottom) - rect.top.max(root_top);
    (visible / height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    root_margin: f64,
    observed: Vec<NodeId>,
}

impl RevealObserver {
    /// Collect every marked element, in document order without duplicates.
    pub fn attach<D: Document>(doc: &D, config: &ObserverConfig) -> Self {
        let mut observed: Vec<NodeId> = OBSERVED_CLASSES
            .iter()
            .flat_map(|class| doc.elements_by_class(class))
            .collect();
        observed.sort();
        observed.dedup();
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin,
            observed,
        }
    }

    /// Put every observed element in the hidden state.
    pub fn prepare<D: Document>(&self, doc: &mut D) {
        for &node in &self.observed {
            prepare_hidden(doc, node, "all 0.6s ease");
        }
    }

    /// Elements still waiting for their reveal.
    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    /// Reveal every observed element that crossed the threshold. Returns how
    /// many were revealed.
    pub fn check<D: Document>(&mut self, doc: &mut D) -> usize {
        let viewport_height = doc.viewport_height();
        let (due, waiting): (Vec<NodeId>, Vec<NodeId>) =
            self.observed.iter().copied().partition(|&node| {
                intersection_ratio(doc.bounding_rect(node), viewport_height, self.root_margin)
                    >= self.threshold
            });
        for &node in &due {
            reveal(doc, node);
        }
        if !due.is_empty() {
            debug!(count = due.len(), "elements revealed");
        }
        self.observed = waiting;
        due.len()
    }
}
