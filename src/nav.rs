//! Navigation: active-link highlighting, navbar state, hamburger menu.
//!
//! ## Active link
//!
//! Each `.section` owns a vertical range shifted up by the navbar height plus
//! a fixed lead:
//!
//! ```text
//! top    = offsetTop - navbarHeight - section_offset
//! bottom = top + offsetHeight
//! ```
//!
//! Sections are walked in document order and every section whose range
//! contains `scrollY` claims the highlight, so the last match wins. Near the
//! end of the page (`scrollY + innerHeight >= documentHeight - tolerance`) the
//! bottom section's link is forced active, overriding the range check. When
//! nothing matches and the page is not at the bottom, the previous highlight
//! is left untouched.

use crate::config::NavConfig;
use crate::dom::{Document, NodeId};
use tracing::debug;

/// Vertical range in which a section counts as current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRange {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRange {
    pub fn contains(&self, scroll_y: f64) -> bool {
        self.top <= scroll_y && scroll_y < self.bottom
    }
}

pub fn section_range(
    offset_top: f64,
    offset_height: f64,
    navbar_height: f64,
    section_offset: f64,
) -> SectionRange {
    let top = offset_top - navbar_height - section_offset;
    SectionRange {
        top,
        bottom: top + offset_height,
    }
}

/// Index of the last range containing `scroll_y`.
pub fn current_section(scroll_y: f64, ranges: &[SectionRange]) -> Option<usize> {
    ranges.iter().rposition(|r| r.contains(scroll_y))
}

pub fn at_page_bottom(scroll_y: f64, viewport_height: f64, document_height: f64, tolerance: f64) -> bool {
    viewport_height + scroll_y >= document_height - tolerance
}

#[derive(Debug, Clone)]
struct NavParts {
    navbar: NodeId,
    /// `(link, target section id)` in document order.
    links: Vec<(NodeId, String)>,
    /// `(section, id)` in document order.
    sections: Vec<(NodeId, String)>,
}

/// Highlights the nav link of the section currently in view.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    parts: Option<NavParts>,
    config: NavConfig,
    active: Option<String>,
}

impl NavHighlighter {
    /// Bind to `#navbar`, `.nav-link` and `.section`. Without a navbar or
    /// without links the highlighter is disabled.
    pub fn attach<D: Document>(doc: &D, config: &NavConfig) -> Self {
        let navbar = doc.element_by_id("navbar");
        let links: Vec<_> = doc
            .elements_by_class("nav-link")
            .into_iter()
            .filter_map(|link| {
                let target = doc.attribute(link, "href")?.strip_prefix('#')?.to_string();
                Some((link, target))
            })
            .collect();
        let sections = doc
            .elements_by_class("section")
            .into_iter()
            .filter_map(|s| doc.id_of(s).map(|id| (s, id)))
            .collect();

        let parts = match navbar {
            Some(navbar) if !links.is_empty() => Some(NavParts {
                navbar,
                links,
                sections,
            }),
            _ => None,
        };
        Self {
            parts,
            config: config.clone(),
            active: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.parts.is_some()
    }

    /// Section id whose link is currently highlighted.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute the highlighted link from the current scroll position.
    pub fn update<D: Document>(&mut self, doc: &mut D) {
        let Some(parts) = &self.parts else { return };
        if parts.sections.is_empty() {
            return;
        }
        let scroll_y = doc.scroll_y();
        let navbar_height = doc.offset_height(parts.navbar);

        let ranges: Vec<_> = parts
            .sections
            .iter()
            .map(|&(s, _)| {
                section_range(
                    doc.offset_top(s),
                    doc.offset_height(s),
                    navbar_height,
                    self.config.section_offset,
                )
            })
            .collect();

        let mut target = current_section(scroll_y, &ranges).map(|idx| parts.sections[idx].1.clone());
        if at_page_bottom(
            scroll_y,
            doc.viewport_height(),
            doc.document_height(),
            self.config.bottom_tolerance,
        ) {
            target = Some(self.config.bottom_section.clone());
        }
        // Nothing claimed the highlight: keep the previous one.
        let Some(target) = target else { return };

        let mut highlighted = None;
        for (link, section) in &parts.links {
            doc.remove_class(*link, "active");
            if *section == target && highlighted.is_none() {
                highlighted = Some(*link);
            }
        }
        if let Some(link) = highlighted {
            doc.add_class(link, "active");
        }
        let active = highlighted.map(|_| target);
        if active != self.active {
            debug!(from = ?self.active, to = ?active, "nav highlight changed");
            self.active = active;
        }
    }

    /// Toggle the navbar's `scrolled` class.
    pub fn update_navbar<D: Document>(&self, doc: &mut D) {
        let Some(parts) = &self.parts else { return };
        if doc.scroll_y() > self.config.scrolled_threshold {
            doc.add_class(parts.navbar, "scrolled");
        } else {
            doc.remove_class(parts.navbar, "scrolled");
        }
    }

    /// Section id targeted by `node` when it is (or is inside) a nav link.
    pub fn link_target<D: Document>(&self, doc: &D, node: NodeId) -> Option<String> {
        let parts = self.parts.as_ref()?;
        parts
            .links
            .iter()
            .find(|(link, _)| doc.contains(*link, node))
            .map(|(_, target)| target.clone())
    }

    /// Smooth-scroll so the section's top sits just below the navbar.
    /// Returns `false` when the section does not exist.
    pub fn scroll_to_section<D: Document>(&self, doc: &mut D, section_id: &str) -> bool {
        let Some(parts) = &self.parts else {
            return false;
        };
        let Some(section) = doc.element_by_id(section_id) else {
            return false;
        };
        let top = doc.offset_top(section) - doc.offset_height(parts.navbar);
        doc.scroll_to(top);
        true
    }

    /// Section bound to a Ctrl/Cmd + digit shortcut.
    pub fn shortcut_target(&self, key: &str) -> Option<&str> {
        let n: usize = key.parse().ok()?;
        if !(1..=9).contains(&n) {
            return None;
        }
        self.config.shortcuts.get(n - 1).map(String::as_str)
    }
}

/// Mobile hamburger menu: `#hamburger` toggles `#nav-menu`.
#[derive(Debug, Clone)]
pub struct HamburgerMenu {
    parts: Option<(NodeId, NodeId)>,
}

impl HamburgerMenu {
    pub fn attach<D: Document>(doc: &D) -> Self {
        let parts = doc
            .element_by_id("hamburger")
            .zip(doc.element_by_id("nav-menu"));
        Self { parts }
    }

    pub fn is_open<D: Document>(&self, doc: &D) -> bool {
        self.parts
            .is_some_and(|(_, menu)| doc.has_class(menu, "active"))
    }

    /// Route a click. Clicks on the hamburger toggle the menu; clicks outside
    /// both the hamburger and the menu close it.
    pub fn on_click<D: Document>(&self, doc: &mut D, target: Option<NodeId>) {
        let Some((hamburger, menu)) = self.parts else { return };
        match target {
            Some(t) if doc.contains(hamburger, t) => {
                doc.toggle_class(menu, "active");
                doc.toggle_class(hamburger, "active");
            }
            Some(t) if doc.contains(menu, t) => {}
            _ => self.close(doc),
        }
    }

    pub fn close<D: Document>(&self, doc: &mut D) {
        let Some((hamburger, menu)) = self.parts else { return };
        doc.remove_class(menu, "active");
        doc.remove_class(hamburger, "active");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};

    /// navbar 80px, sections home/about/contact of 600px each, viewport 500.
    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new(500.0);
        let body = doc.body();
        let navbar = doc.append(body, Element::new("nav").with_id("navbar").with_geometry(0.0, 80.0));
        for id in ["home", "about", "contact"] {
            doc.append(
                navbar,
                Element::new("a")
                    .with_class("nav-link")
                    .with_id(&format!("nav-{id}"))
                    .with_attr("href", &format!("#{id}")),
            );
        }
        for (i, id) in ["home", "about", "contact"].into_iter().enumerate() {
            doc.append(
                body,
                Element::new("section")
                    .with_class("section")
                    .with_id(id)
                    .with_geometry(i as f64 * 600.0, 600.0),
            );
        }
        doc
    }

    fn active_links(doc: &MemoryDocument) -> Vec<String> {
        doc.elements_by_class("nav-link")
            .into_iter()
            .filter(|&l| doc.has_class(l, "active"))
            .filter_map(|l| doc.id_of(l))
            .collect()
    }

    #[test]
    fn range_subtracts_navbar_and_offset() {
        let r = section_range(600.0, 600.0, 80.0, 100.0);
        assert_eq!(r, SectionRange { top: 420.0, bottom: 1020.0 });
        assert!(r.contains(420.0));
        assert!(!r.contains(1020.0));
    }

    #[test]
    fn last_matching_range_wins() {
        let ranges = [
            SectionRange { top: 0.0, bottom: 500.0 },
            SectionRange { top: 400.0, bottom: 900.0 },
        ];
        assert_eq!(current_section(450.0, &ranges), Some(1));
        assert_eq!(current_section(100.0, &ranges), Some(0));
        assert_eq!(current_section(950.0, &ranges), None);
    }

    #[test]
    fn highlights_section_in_view() {
        let mut doc = page();
        let mut nav = NavHighlighter::attach(&doc, &NavConfig::default());
        doc.set_scroll_y(500.0);
        nav.update(&mut doc);
        assert_eq!(active_links(&doc), vec!["nav-about"]);
        assert_eq!(nav.active_section(), Some("about"));
    }

    #[test]
    fn exactly_one_link_active_across_scroll_positions() {
        let mut doc = page();
        let mut nav = NavHighlighter::attach(&doc, &NavConfig::default());
        for y in (0..=1300).step_by(25) {
            doc.set_scroll_y(y as f64);
            nav.update(&mut doc);
            assert_eq!(active_links(&doc).len(), 1, "scroll_y = {y}");
        }
    }

    #[test]
    fn bottom_of_page_forces_contact() {
        let mut doc = page();
        let mut nav = NavHighlighter::attach(&doc, &NavConfig::default());
        // Tall viewport: at 500 only `about` matches geometrically, but the
        // end of the 1800px document is already in view.
        doc.set_viewport_height(1400.0);
        doc.set_scroll_y(500.0);
        nav.update(&mut doc);
        assert_eq!(active_links(&doc), vec!["nav-contact"]);
    }

    #[test]
    fn gap_keeps_previous_highlight() {
        let mut doc = page();
        let mut nav = NavHighlighter::attach(&doc, &NavConfig::default());
        doc.set_scroll_y(100.0);
        nav.update(&mut doc);
        assert_eq!(active_links(&doc), vec!["nav-home"]);
        // Remove `about` from the geometry so 500 falls into no range.
        let about = doc.element_by_id("about").unwrap();
        let mut nav2 = nav.clone();
        if let Some(parts) = nav2.parts.as_mut() {
            parts.sections.retain(|(s, _)| *s != about);
        }
        doc.set_scroll_y(550.0);
        nav2.update(&mut doc);
        assert_eq!(active_links(&doc), vec!["nav-home"]);
        assert_eq!(nav2.active_section(), Some("home"));
    }

    #[test]
    fn missing_navbar_disables() {
        let mut doc = MemoryDocument::new(500.0);
        let body = doc.body();
        doc.append(body, Element::new("a").with_class("nav-link").with_attr("href", "#x"));
        let mut nav = NavHighlighter::attach(&doc, &NavConfig::default());
        assert!(!nav.is_enabled());
        nav.update(&mut doc);
        assert_eq!(nav.active_section(), None);
    }

    #[test]
    fn navbar_scrolled_class() {
        let mut doc = page();
        let nav = NavHighlighter::attach(&doc, &NavConfig::default());
        let navbar = doc.element_by_id("navbar").unwrap();
        doc.set_scroll_y(51.0);
        nav.update_navbar(&mut doc);
        assert!(doc.has_class(navbar, "scrolled"));
        doc.set_scroll_y(50.0);
        nav.update_navbar(&mut doc);
        assert!(!doc.has_class(navbar, "scrolled"));
    }

    #[test]
    fn scroll_to_section_offsets_navbar() {
        let mut doc = page();
        let nav = NavHighlighter::attach(&doc, &NavConfig::default());
        assert!(nav.scroll_to_section(&mut doc, "about"));
        assert_eq!(doc.scroll_y(), 520.0);
        assert!(!nav.scroll_to_section(&mut doc, "nowhere"));
    }

    #[test]
    fn shortcut_digits_map_to_sections() {
        let doc = page();
        let nav = NavHighlighter::attach(&doc, &NavConfig::default());
        assert_eq!(nav.shortcut_target("1"), Some("home"));
        assert_eq!(nav.shortcut_target("6"), Some("contact"));
        assert_eq!(nav.shortcut_target("7"), None);
        assert_eq!(nav.shortcut_target("0"), None);
        assert_eq!(nav.shortcut_target("a"), None);
    }

    #[test]
    fn hamburger_toggles_and_closes_on_outside_click() {
        let mut doc = MemoryDocument::new(500.0);
        let body = doc.body();
        doc.append(body, Element::new("div").with_id("hamburger"));
        doc.append(body, Element::new("ul").with_id("nav-menu"));
        doc.append(body, Element::new("main").with_id("main"));
        let menu = HamburgerMenu::attach(&doc);
        let hamburger = doc.element_by_id("hamburger");
        let main = doc.element_by_id("main");

        menu.on_click(&mut doc, hamburger);
        assert!(menu.is_open(&doc));
        let panel = doc.element_by_id("nav-menu");
        menu.on_click(&mut doc, panel);
        assert!(menu.is_open(&doc));
        menu.on_click(&mut doc, main);
        assert!(!menu.is_open(&doc));
    }
}
