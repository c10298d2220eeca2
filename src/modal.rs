//! Modal dialogs.
//!
//! At most one `.modal` is visible at a time. Opening one adds `show`, sets
//! `display: flex` and locks page scrolling by setting `overflow: hidden` on
//! the body; the body's previous `overflow` value is remembered and restored
//! when the modal closes, so open-then-close leaves the body exactly as it
//! was.
//!
//! Closing is idempotent and tolerant of races: a backdrop click followed by
//! an Escape (or two explicit closes) leaves the same state as a single close.

use crate::dom::{Document, NodeId};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ModalManager {
    open: Option<String>,
    /// Body `overflow` before the lock, `Some(None)` when it was unset.
    saved_overflow: Option<Option<String>>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the visible modal.
    pub fn open_modal(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Show the modal with `id`. Any other open modal is hidden first.
    /// Unknown ids are ignored; returns whether a modal was opened.
    pub fn open<D: Document>(&mut self, doc: &mut D, id: &str) -> bool {
        let Some(modal) = doc.element_by_id(id) else {
            return false;
        };
        if let Some(current) = self.open.take() {
            if let Some(node) = doc.element_by_id(&current) {
                hide(doc, node);
            }
        }
        doc.add_class(modal, "show");
        doc.set_style(modal, "display", "flex");

        let body = doc.body();
        if self.saved_overflow.is_none() {
            self.saved_overflow = Some(doc.style(body, "overflow"));
        }
        doc.set_style(body, "overflow", "hidden");
        self.open = Some(id.to_string());
        debug!(modal = id, "modal opened");
        true
    }

    /// Hide the modal with `id`. The scroll lock is released only when no
    /// other modal remains open.
    pub fn close<D: Document>(&mut self, doc: &mut D, id: &str) {
        let Some(modal) = doc.element_by_id(id) else {
            return;
        };
        hide(doc, modal);
        if self.open.as_deref() == Some(id) {
            self.open = None;
        }
        if self.open.is_none() {
            self.unlock(doc);
        }
        debug!(modal = id, "modal closed");
    }

    /// Hide every `.modal` and release the scroll lock. Safe with nothing open.
    pub fn close_all<D: Document>(&mut self, doc: &mut D) {
        for modal in doc.elements_by_class("modal") {
            hide(doc, modal);
        }
        self.open = None;
        self.unlock(doc);
    }

    /// Backdrop click: closes the modal only when the click landed on the
    /// modal root itself, not on its content.
    pub fn on_click<D: Document>(&mut self, doc: &mut D, target: NodeId) {
        if !doc.has_class(target, "modal") {
            return;
        }
        if let Some(id) = doc.id_of(target) {
            self.close(doc, &id);
        }
    }

    fn unlock<D: Document>(&mut self, doc: &mut D) {
        let body = doc.body();
        match self.saved_overflow.take() {
            Some(Some(previous)) => doc.set_style(body, "overflow", &previous),
            Some(None) => doc.set_style(body, "overflow", ""),
            // Never locked by us: leave the body alone.
            None => {}
        }
    }
}

fn hide<D: Document>(doc: &mut D, modal: NodeId) {
    doc.remove_class(modal, "show");
    doc.set_style(modal, "display", "none");
}
