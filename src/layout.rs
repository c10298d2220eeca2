//! Page layout: the portfolio's structure as data.
//!
//! A `PageLayout` is read from TOML and describes the sections in order,
//! their content blocks, and the modal dialogs. The same layout feeds both
//! outputs:
//!
//! - [`PageLayout::to_document`] builds a [`MemoryDocument`] with the
//!   markup contract the behavior components bind to, and with vertical
//!   geometry (sections stacked from the top of the page) so the page can be
//!   simulated without a browser.
//! - [`crate::shell`] renders the same structure as HTML.
//!
//! ```toml
//! title = "Ada Lovelace"
//! viewport_height = 800
//!
//! [[sections]]
//! id = "home"
//! title = "Hello"
//! hero = true
//!
//! [[sections]]
//! id = "about"
//! title = "About"
//! stats = [{ value = "150+", label = "Programs" }]
//! ```

use crate::dom::{Document, Element, MemoryDocument, NodeId};
use crate::page::parse_inline_call;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Layout validation error: {0}")]
    Validation(String),
}

/// Height of a section's heading band; content blocks start below it.
const HEADING_BAND: f64 = 80.0;
const BLOCK_HEIGHT: f64 = 120.0;

fn default_viewport_height() -> f64 {
    800.0
}

fn default_navbar_height() -> f64 {
    70.0
}

fn default_section_height() -> f64 {
    800.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageLayout {
    pub title: String,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_navbar_height")]
    pub navbar_height: f64,
    #[serde(default)]
    pub sections: Vec<SectionLayout>,
    #[serde(default)]
    pub modals: Vec<ModalLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionLayout {
    pub id: String,
    pub title: String,
    #[serde(default = "default_section_height")]
    pub height: f64,
    /// Markdown shown under the heading.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    /// Carousel slides; at most one section may have them.
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub contact_form: bool,
    /// Wrap the section content in a reveal-on-scroll block.
    #[serde(default)]
    pub fade_in: bool,
    /// Landing block with the scroll indicator.
    #[serde(default)]
    pub hero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    /// Counter label, e.g. `"150+"` or `"4.5"`.
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationItem {
    pub title: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub years: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Modal opened by the slide's details button.
    #[serde(default)]
    pub modal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalLayout {
    pub id: String,
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

pub fn load_layout(path: &Path) -> Result<PageLayout, LayoutError> {
    let content = std::fs::read_to_string(path)?;
    PageLayout::from_toml_str(&content)
}

impl PageLayout {
    pub fn from_toml_str(content: &str) -> Result<Self, LayoutError> {
        let layout: PageLayout = toml::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.viewport_height <= 0.0 {
            return Err(LayoutError::Validation(
                "viewport_height must be positive".into(),
            ));
        }
        let mut ids = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(LayoutError::Validation(format!(
                    "section '{}' has an empty id",
                    section.title
                )));
            }
            if !ids.insert(section.id.as_str()) {
                return Err(LayoutError::Validation(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if section.height <= 0.0 {
                return Err(LayoutError::Validation(format!(
                    "section '{}' must have a positive height",
                    section.id
                )));
            }
        }
        for modal in &self.modals {
            if modal.id.trim().is_empty() {
                return Err(LayoutError::Validation("modal with an empty id".into()));
            }
            if !ids.insert(modal.id.as_str()) {
                return Err(LayoutError::Validation(format!(
                    "duplicate id '{}'",
                    modal.id
                )));
            }
        }
        let carousels = self.sections.iter().filter(|s| !s.slides.is_empty()).count();
        if carousels > 1 {
            return Err(LayoutError::Validation(
                "at most one section may contain carousel slides".into(),
            ));
        }
        for slide in self.sections.iter().flat_map(|s| &s.slides) {
            if let Some(modal) = &slide.modal {
                if !self.modals.iter().any(|m| &m.id == modal) {
                    return Err(LayoutError::Validation(format!(
                        "slide '{}' opens unknown modal '{modal}'",
                        slide.title
                    )));
                }
            }
        }
        Ok(())
    }

    /// Sum of all section heights.
    pub fn page_height(&self) -> f64 {
        self.sections.iter().map(|s| s.height).sum()
    }

    /// Build the in-memory document. Sections are stacked from the top of
    /// the page; the navbar is fixed over the first `navbar_height` pixels.
    pub fn to_document(&self) -> MemoryDocument {
        let mut doc = MemoryDocument::new(self.viewport_height);
        let body = doc.body();

        let navbar = doc.append(
            body,
            Element::new("nav")
                .with_id("navbar")
                .with_class("navbar")
                .with_geometry(0.0, self.navbar_height),
        );
        doc.append(navbar, Element::new("div").with_id("hamburger").with_class("hamburger"));
        let menu = doc.append(navbar, Element::new("ul").with_id("nav-menu").with_class("nav-menu"));
        for section in &self.sections {
            let item = doc.append(menu, Element::new("li"));
            doc.append(
                item,
                Element::new("a")
                    .with_id(&format!("nav-{}", section.id))
                    .with_class("nav-link")
                    .with_attr("href", &format!("#{}", section.id))
                    .with_text(&section.title),
            );
        }

        let mut top = 0.0;
        for section in &self.sections {
            self.append_section(&mut doc, body, section, top);
            top += section.height;
        }

        for modal in &self.modals {
            let node = doc.append(
                body,
                Element::new("div")
                    .with_id(&modal.id)
                    .with_class("modal")
                    .with_style("display", "none"),
            );
            let content = doc.append(node, Element::new("div").with_class("modal-content"));
            doc.append(
                content,
                Element::new("span")
                    .with_id(&format!("{}-close", modal.id))
                    .with_class("close")
                    .with_attr("onclick", &format!("closeModal('{}')", modal.id)),
            );
            doc.append(content, Element::new("h2").with_text(&modal.title));
            doc.append(content, Element::new("div").with_class("modal-body").with_text(&modal.body));
        }

        doc.append(
            body,
            Element::new("button")
                .with_id("back-to-top")
                .with_class("back-to-top"),
        );
        doc
    }

    fn append_section(&self, doc: &mut MemoryDocument, body: NodeId, section: &SectionLayout, top: f64) {
        let node = doc.append(
            body,
            Element::new("section")
                .with_id(&section.id)
                .with_class("section")
                .with_geometry(top, section.height),
        );
        doc.append(
            node,
            Element::new("h2")
                .with_class("section-title")
                .with_text(&section.title)
                .with_geometry(top, HEADING_BAND),
        );

        let content_top = top + HEADING_BAND;
        let mut content = Element::new("div")
            .with_class("section-content")
            .with_geometry(content_top, (section.height - HEADING_BAND).max(0.0));
        if section.fade_in {
            content = content.with_class("animate-fade-in");
        }
        let content = doc.append(node, content);
        let mut blocks = Blocks::new(content_top);

        if section.hero {
            let hero = doc.append(
                content,
                blocks.next(Element::new("div").with_class("hero-content")),
            );
            doc.append(hero, Element::new("h1").with_text(&section.title));
            doc.append(
                content,
                blocks.next(Element::new("div").with_id("scroll-indicator").with_class("scroll-indicator")),
            );
        }
        if let Some(text) = &section.body {
            doc.append(content, blocks.next(Element::new("div").with_class("section-body").with_text(text)));
        }
        for (i, stat) in section.stats.iter().enumerate() {
            let block = doc.append(content, blocks.next(Element::new("div").with_class("stat")));
            doc.append(
                block,
                Element::new("span")
                    .with_id(&format!("stat-{}-{i}", section.id))
                    .with_class("stat-number")
                    .with_text(&stat.value),
            );
            doc.append(block, Element::new("span").with_class("stat-label").with_text(&stat.label));
        }
        for (i, item) in section.education.iter().enumerate() {
            let card = doc.append(
                content,
                blocks.next(
                    Element::new("div")
                        .with_id(&format!("edu-{i}"))
                        .with_class("edu-item"),
                ),
            );
            doc.append(card, Element::new("h3").with_text(&item.title));
        }
        if !section.slides.is_empty() {
            append_carousel(doc, content, &section.slides, blocks.next(Element::new("div")));
        }
        if section.contact_form {
            append_contact_form(doc, content, blocks.next(Element::new("form")));
        }
    }
}

/// Hands out consecutive vertical slots inside a section.
struct Blocks {
    next_top: f64,
}

impl Blocks {
    fn new(top: f64) -> Self {
        Self { next_top: top }
    }

    fn next(&mut self, element: Element) -> Element {
        let top = self.next_top;
        self.next_top += BLOCK_HEIGHT;
        element.with_geometry(top, BLOCK_HEIGHT)
    }
}

fn append_carousel(doc: &mut MemoryDocument, parent: NodeId, slides: &[Slide], container: Element) {
    let container = doc.append(parent, container.with_class("projects-carousel-container"));
    let region = doc.append(
        container,
        Element::new("div")
            .with_id("projects-carousel")
            .with_class("projects-carousel"),
    );
    for (i, slide) in slides.iter().enumerate() {
        let node = doc.append(
            region,
            Element::new("div")
                .with_id(&format!("project-slide-{}", i + 1))
                .with_class("projects-slide"),
        );
        doc.append(node, Element::new("h3").with_text(&slide.title));
        if let Some(modal) = &slide.modal {
            doc.append(
                node,
                Element::new("button")
                    .with_id(&format!("project-details-{}", i + 1))
                    .with_class("project-details")
                    .with_attr("onclick", &format!("openModal('{modal}')")),
            );
        }
    }
    for (id, delta) in [("carousel-prev", -1), ("carousel-next", 1)] {
        doc.append(
            container,
            Element::new("button")
                .with_id(id)
                .with_class("carousel-btn")
                .with_attr("onclick", &format!("changeProjectSlide({delta})")),
        );
    }
    let dots = doc.append(container, Element::new("div").with_class("projects-carousel-dots"));
    for i in 1..=slides.len() {
        doc.append(
            dots,
            Element::new("span")
                .with_id(&format!("dot-{i}"))
                .with_class("dot")
                .with_attr("onclick", &format!("currentProjectSlide({i})")),
        );
    }
}

fn append_contact_form(doc: &mut MemoryDocument, parent: NodeId, form: Element) {
    let form = doc.append(parent, form.with_class("contact-form"));
    doc.append(
        form,
        Element::new("input")
            .with_id("contact-name")
            .with_attr("type", "text")
            .with_attr("placeholder", "Your Name"),
    );
    doc.append(
        form,
        Element::new("input")
            .with_id("contact-email")
            .with_attr("type", "email")
            .with_attr("placeholder", "Your Email"),
    );
    doc.append(
        form,
        Element::new("textarea")
            .with_id("contact-message")
            .with_attr("placeholder", "Your Message"),
    );
    doc.append(form, Element::new("button").with_attr("type", "submit").with_text("Send"));
}

/// Handler names referenced by `onclick` attributes in `doc`, with their
/// raw argument text, in document order.
pub fn inline_handlers<D: Document>(doc: &D) -> Vec<(NodeId, String, String)> {
    doc.all_elements()
        .into_iter()
        .filter_map(|node| {
            let call = doc.attribute(node, "onclick")?;
            let (name, arg) = parse_inline_call(&call)?;
            Some((node, name.to_string(), arg.to_string()))
        })
        .collect()
}
