//! Projects carousel controller.
//!
//! Holds the current slide index and keeps exactly one `.projects-slide` and
//! one `.projects-carousel-dots .dot` marked `active`. Index arithmetic wraps:
//!
//! ```text
//! index' = (index + direction + slide_count) mod slide_count
//! ```
//!
//! Inputs: prev/next buttons and dots (markup entry points), horizontal swipe
//! on `#projects-carousel`, and arrow keys while the pointer is over
//! `.projects-carousel-container`.

use crate::config::CarouselConfig;
use crate::dom::{Document, NodeId};
use tracing::{debug, warn};

/// Step direction for [`Carousel::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Map a markup delta (`-1` / `+1`) onto a direction. Zero is rejected.
    pub fn from_delta(delta: i64) -> Option<Self> {
        match delta.signum() {
            1 => Some(Self::Next),
            -1 => Some(Self::Prev),
            _ => None,
        }
    }
}

/// Wrap `index` one step in `direction` over `count` slides.
pub fn wrap(index: usize, direction: Direction, count: usize) -> usize {
    match direction {
        Direction::Next => (index + 1) % count,
        Direction::Prev => (index + count - 1) % count,
    }
}

/// Classify a touch gesture. `start - end` beyond the threshold is a swipe
/// left (next slide); below `-threshold` is a swipe right (previous slide).
pub fn swipe_direction(start_x: f64, end_x: f64, threshold: f64) -> Option<Direction> {
    let diff = start_x - end_x;
    if diff.abs() <= threshold {
        None
    } else if diff > 0.0 {
        Some(Direction::Next)
    } else {
        Some(Direction::Prev)
    }
}

#[derive(Debug, Clone)]
struct CarouselParts {
    region: NodeId,
    container: Option<NodeId>,
    slides: Vec<NodeId>,
    dots: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    parts: Option<CarouselParts>,
    index: usize,
    slide_count: usize,
    swipe_threshold: f64,
    touch_start_x: f64,
}

impl Carousel {
    /// Bind to `#projects-carousel` and its slides. Without the region or
    /// without slides the carousel is disabled.
    pub fn attach<D: Document>(doc: &D, config: &CarouselConfig) -> Self {
        let slides = doc.elements_by_class("projects-slide");
        let dots = doc
            .elements_by_class("projects-carousel-dots")
            .into_iter()
            .flat_map(|strip| doc.descendants_by_class(strip, "dot"))
            .collect();
        let container = doc
            .elements_by_class("projects-carousel-container")
            .into_iter()
            .next();
        let parts = match doc.element_by_id("projects-carousel") {
            Some(region) if !slides.is_empty() => Some(CarouselParts {
                region,
                container,
                slides,
                dots,
            }),
            _ => None,
        };
        Self {
            parts,
            index: 0,
            slide_count: config.slide_count,
            swipe_threshold: config.swipe_threshold,
            touch_start_x: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    /// Current 0-based slide index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clear every active marker, then mark the slide and dot at `index`.
    pub fn render<D: Document>(&self, doc: &mut D) {
        let Some(parts) = &self.parts else { return };
        for &slide in &parts.slides {
            doc.remove_class(slide, "active");
        }
        if let Some(&slide) = parts.slides.get(self.index) {
            doc.add_class(slide, "active");
        }
        for (i, &dot) in parts.dots.iter().enumerate() {
            doc.remove_class(dot, "active");
            if i == self.index {
                doc.add_class(dot, "active");
            }
        }
    }

    /// Move one slide in `direction`, wrapping at both ends.
    pub fn advance<D: Document>(&mut self, doc: &mut D, direction: Direction) {
        self.index = wrap(self.index, direction, self.slide_count);
        debug!(index = self.index, ?direction, "carousel advanced");
        self.render(doc);
    }

    /// Jump to a 1-based slide number as written in markup.
    ///
    /// Numbers outside `1..=slide_count` are rejected and leave the state
    /// unchanged; returns whether the jump happened.
    pub fn go_to<D: Document>(&mut self, doc: &mut D, slide: usize) -> bool {
        if slide == 0 || slide > self.slide_count {
            warn!(slide, slide_count = self.slide_count, "slide number out of range");
            return false;
        }
        self.index = slide - 1;
        debug!(index = self.index, "carousel jumped");
        self.render(doc);
        true
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = x;
    }

    pub fn touch_end<D: Document>(&mut self, doc: &mut D, x: f64) {
        if !self.is_enabled() {
            return;
        }
        if let Some(direction) = swipe_direction(self.touch_start_x, x, self.swipe_threshold) {
            self.advance(doc, direction);
        }
    }

    /// Arrow-key navigation, only while `hovered` lies inside the carousel
    /// container. Returns `true` when the key was consumed.
    pub fn on_key<D: Document>(&mut self, doc: &mut D, key: &str, hovered: Option<NodeId>) -> bool {
        let Some(parts) = &self.parts else {
            return false;
        };
        let area = parts.container.unwrap_or(parts.region);
        if !hovered.is_some_and(|h| doc.contains(area, h)) {
            return false;
        }
        let direction = match key {
            "ArrowLeft" => Direction::Prev,
            "ArrowRight" => Direction::Next,
            _ => return false,
        };
        self.advance(doc, direction);
        true
    }

    /// True when `node` lies inside the swipe region.
    pub fn in_region<D: Document>(&self, doc: &D, node: NodeId) -> bool {
        self.parts
            .as_ref()
            .is_some_and(|p| doc.contains(p.region, node))
    }
}
