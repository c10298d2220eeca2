//! Host document abstraction.
//!
//! Every component talks to the page through the [`Document`] trait: element
//! lookup by id/class/tag, class lists, inline styles, text, form values,
//! vertical geometry, scrolling and blocking prompts. Nothing else in the
//! crate knows what the host is.
//!
//! The module is split into:
//! - **Document**: [`Document`] trait + [`NodeId`] / [`Rect`] handle types
//! - **Memory**: [`MemoryDocument`], an element arena used by tests and by
//!   the `simulate` command

pub mod document;
pub mod memory;

pub use document::{Document, NodeId, Rect};
pub use memory::{Element, MemoryDocument};
