//! The [`Document`] trait and the handle types it hands out.
//!
//! Handles are plain indices. A [`NodeId`] is only meaningful for the
//! document that produced it; passing one to another document is a logic
//! error, not undefined behavior (lookups simply miss).

/// Opaque handle to an element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Viewport-relative vertical extent of an element, as returned by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when any part of the rect lies inside `[0, viewport_height)`.
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// Everything the behavior layer needs from the host page.
///
/// Required methods are the primitive DOM operations; the provided methods
/// build the handful of compound queries the components use on top of them.
pub trait Document {
    /// The `<body>` element.
    fn body(&self) -> NodeId;

    /// `document.getElementById`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All elements in document order.
    fn all_elements(&self) -> Vec<NodeId>;

    /// Elements below `root` in document order (excluding `root`).
    fn descendants(&self, root: NodeId) -> Vec<NodeId>;

    /// Parent element, `None` for the body.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn tag(&self, node: NodeId) -> String;
    fn id_of(&self, node: NodeId) -> Option<String>;
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Inline style property, `None` when unset.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn text_content(&self, node: NodeId) -> String;
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Current value of a form control.
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    /// `offsetTop` relative to the document.
    fn offset_top(&self, node: NodeId) -> f64;
    fn offset_height(&self, node: NodeId) -> f64;

    /// `window.scrollY`.
    fn scroll_y(&self) -> f64;
    /// `window.innerHeight`.
    fn viewport_height(&self) -> f64;
    /// `document.body.offsetHeight`.
    fn document_height(&self) -> f64;

    /// `window.scrollTo({ top, behavior: 'smooth' })`.
    fn scroll_to(&mut self, top: f64);

    /// Blocking acknowledgement prompt (`window.alert`).
    fn alert(&mut self, message: &str);

    /// Viewport-relative rect of `node`.
    fn bounding_rect(&self, node: NodeId) -> Rect {
        let top = self.offset_top(node) - self.scroll_y();
        Rect {
            top,
            bottom: top + self.offset_height(node),
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            self.remove_class(node, class);
        } else {
            self.add_class(node, class);
        }
    }

    /// `document.querySelectorAll('.class')`.
    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// `root.querySelectorAll('.class')`.
    fn descendants_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// `root.querySelectorAll(tag)`.
    fn descendants_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.tag(n).eq_ignore_ascii_case(tag))
            .collect()
    }

    /// True when `node` is `ancestor` or lies below it (`Node.contains`).
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}
