//! In-memory [`Document`] backed by a flat element arena.
//!
//! Elements are appended under a parent and keep insertion order, which is
//! also document order. Geometry is vertical only: each element carries an
//! `offset_top` / `offset_height` pair and bounding rects are derived from
//! the current scroll position.

use super::document::{Document, NodeId};
use std::collections::{BTreeMap, BTreeSet};

/// A single element in a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub offset_top: f64,
    pub offset_height: f64,
    parent: Option<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_geometry(mut self, offset_top: f64, offset_height: f64) -> Self {
        self.offset_top = offset_top;
        self.offset_height = offset_height;
        self
    }
}

/// Headless page: element arena plus window state (scroll, viewport) and a
/// log of blocking prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    scroll_y: f64,
    viewport_height: f64,
    alerts: Vec<String>,
}

impl MemoryDocument {
    /// An empty document containing only `<body>`.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            elements: vec![Element::new("body")],
            scroll_y: 0.0,
            viewport_height,
            alerts: Vec::new(),
        }
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// Children are inserted after the parent's last descendant so that
    /// arena order stays document order. Inserting into an earlier subtree
    /// shifts the handles of every later element, so build the whole tree
    /// before handing out handles to components.
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        element.parent = Some(parent);
        let mut insert_at = parent.0 + 1;
        while insert_at < self.elements.len() && self.is_below(NodeId(insert_at), parent) {
            insert_at += 1;
        }
        if insert_at == self.elements.len() {
            self.elements.push(element);
        } else {
            // Shift parent links of everything after the insertion point.
            for el in &mut self.elements {
                if let Some(p) = el.parent.filter(|p| p.0 >= insert_at) {
                    el.parent = Some(NodeId(p.0 + 1));
                }
            }
            self.elements.insert(insert_at, element);
        }
        NodeId(insert_at)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    /// Convenience lookup by id for assertions.
    pub fn element_with_id(&self, id: &str) -> Option<&Element> {
        self.element_by_id(id).and_then(|n| self.element(n))
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Prompts shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    fn is_below(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.elements[node.0].parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.elements[p.0].parent;
        }
        false
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn all_elements(&self) -> Vec<NodeId> {
        (0..self.elements.len()).map(NodeId).collect()
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        (root.0 + 1..self.elements.len())
            .map(NodeId)
            .take_while(|&n| self.is_below(n, root))
            .collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|e| e.parent)
    }

    fn tag(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.tag.clone()).unwrap_or_default()
    }

    fn id_of(&self, node: NodeId) -> Option<String> {
        self.element(node).and_then(|e| e.id.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.classes.remove(class);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.element(node).and_then(|e| e.style.get(property).cloned())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.style.insert(property.to_string(), value.to_string());
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.get_mut(node) {
            e.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.element(node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.value = value.to_string();
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.element(node).map(|e| e.offset_top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.element(node).map(|e| e.offset_height).unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.offset_top + e.offset_height)
            .fold(0.0, f64::max)
    }

    fn scroll_to(&mut self, top: f64) {
        let max = (self.document_height() - self.viewport_height).max(0.0);
        self.scroll_y = top.clamp(0.0, max);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (MemoryDocument, NodeId, NodeId, NodeId) {
        let mut doc = MemoryDocument::new(800.0);
        let body = doc.body();
        let nav = doc.append(body, Element::new("nav").with_id("navbar"));
        doc.append(body, Element::new("main").with_id("main"));
        // Appended after `main` but belongs to `nav`: must land before `main`.
        let link = doc.append(nav, Element::new("a").with_class("nav-link"));
        let main = doc.element_by_id("main").unwrap();
        (doc, nav, main, link)
    }

    #[test]
    fn append_keeps_document_order() {
        let (doc, nav, _, link) = tree();
        let order: Vec<_> = doc
            .all_elements()
            .into_iter()
            .map(|n| doc.tag(n))
            .collect();
        assert_eq!(order, vec!["body", "nav", "a", "main"]);
        assert_eq!(doc.parent(link), Some(nav));
    }

    #[test]
    fn late_insert_fixes_parent_links() {
        let (mut doc, _, _, _) = tree();
        let main = doc.element_by_id("main").unwrap();
        let child = doc.append(main, Element::new("p"));
        assert_eq!(doc.parent(child), Some(main));
        assert!(doc.contains(main, child));
        assert!(!doc.contains(doc.element_by_id("navbar").unwrap(), child));
    }

    #[test]
    fn descendants_stop_at_subtree_end() {
        let (doc, nav, _, link) = tree();
        assert_eq!(doc.descendants(nav), vec![link]);
    }

    #[test]
    fn class_queries() {
        let (mut doc, _, main, link) = tree();
        assert_eq!(doc.elements_by_class("nav-link"), vec![link]);
        doc.toggle_class(main, "active");
        assert!(doc.has_class(main, "active"));
        doc.toggle_class(main, "active");
        assert!(!doc.has_class(main, "active"));
    }

    #[test]
    fn bounding_rect_follows_scroll() {
        let mut doc = MemoryDocument::new(500.0);
        let body = doc.body();
        let s = doc.append(body, Element::new("section").with_geometry(1000.0, 400.0));
        doc.set_scroll_y(800.0);
        let rect = doc.bounding_rect(s);
        assert_eq!(rect.top, 200.0);
        assert_eq!(rect.bottom, 600.0);
        assert!(rect.intersects_viewport(doc.viewport_height()));
    }

    #[test]
    fn scroll_to_clamps_to_document() {
        let mut doc = MemoryDocument::new(500.0);
        let body = doc.body();
        doc.append(body, Element::new("section").with_geometry(0.0, 1200.0));
        doc.scroll_to(5000.0);
        assert_eq!(doc.scroll_y(), 700.0);
        doc.scroll_to(-20.0);
        assert_eq!(doc.scroll_y(), 0.0);
    }

    #[test]
    fn alerts_are_recorded() {
        let mut doc = MemoryDocument::new(500.0);
        doc.alert("hello");
        assert_eq!(doc.alerts(), ["hello".to_string()]);
    }
}
