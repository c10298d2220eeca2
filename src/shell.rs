//! HTML shell rendering.
//!
//! Renders a [`PageLayout`] as a single static `index.html` carrying the
//! markup contract the behavior layer binds to: `#navbar`, `.nav-link`
//! anchors, `.section` blocks, `#projects-carousel` with its slides and dots,
//! `.modal` dialogs, `.contact-form` and `#back-to-top`. Controls that call
//! into the page name their entry point in an inline `onclick` attribute
//! (`openModal('note-g')`, `currentProjectSlide(2)`).
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # The page
//! └── ...             # Asset directory, copied verbatim
//! ```
//!
//! Section and modal bodies are markdown, converted with pulldown-cmark.
//! The stock stylesheet is embedded at compile time; the behavior bundle is
//! referenced as `js/main.js` and is expected among the copied assets.

use crate::layout::{ModalLayout, PageLayout, SectionLayout, Slide};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset path {} is outside {}", .path.display(), .root.display())]
    AssetPath { path: PathBuf, root: PathBuf },
}

const CSS_STATIC: &str = include_str!("../static/shell.css");
const SCRIPT_SRC: &str = "js/main.js";

/// What a build wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub page: PathBuf,
    pub assets_copied: usize,
}

/// Render the page into `output_dir` and copy `assets_dir` next to it.
pub fn build(
    layout: &PageLayout,
    assets_dir: Option<&Path>,
    output_dir: &Path,
) -> Result<BuildReport, ShellError> {
    fs::create_dir_all(output_dir)?;

    let assets_copied = match assets_dir {
        Some(dir) => copy_assets(dir, output_dir)?,
        None => 0,
    };

    let page = output_dir.join("index.html");
    fs::write(&page, render_page(layout, CSS_STATIC).into_string())?;
    info!(page = %page.display(), assets_copied, "page generated");

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        page,
        assets_copied,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths. Returns
/// the number of files copied.
pub fn copy_assets(src: &Path, dst: &Path) -> Result<usize, ShellError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| ShellError::AssetPath {
                path: entry.path().to_path_buf(),
                root: src.to_path_buf(),
            })?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            debug!(asset = %relative.display(), "asset copied");
            copied += 1;
        }
    }
    Ok(copied)
}

/// Markdown to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script src=(SCRIPT_SRC) defer {}
            }
        }
    }
}

/// The whole page.
pub fn render_page(layout: &PageLayout, css: &str) -> Markup {
    let content = html! {
        (render_navbar(layout))
        main {
            @for section in &layout.sections {
                (render_section(section))
            }
        }
        @for modal in &layout.modals {
            (render_modal(modal))
        }
        button.back-to-top id="back-to-top" aria-label="Back to top" { "↑" }
    };
    base_document(&layout.title, css, content)
}

fn render_navbar(layout: &PageLayout) -> Markup {
    html! {
        nav.navbar id="navbar" {
            a.nav-logo href="#" { (layout.title) }
            div.hamburger id="hamburger" {
                span.bar {}
                span.bar {}
                span.bar {}
            }
            ul.nav-menu id="nav-menu" {
                @for section in &layout.sections {
                    li {
                        a.nav-link
                            id=(format!("nav-{}", section.id))
                            href=(format!("#{}", section.id)) { (section.title) }
                    }
                }
            }
        }
    }
}

fn render_section(section: &SectionLayout) -> Markup {
    html! {
        section.section id=(section.id) {
            h2.section-title { (section.title) }
            div.section-content.animate-fade-in[section.fade_in] {
                @if section.hero {
                    div.hero-content {
                        h1 { (section.title) }
                    }
                    div.scroll-indicator id="scroll-indicator" { "↓" }
                }
                @if let Some(body) = &section.body {
                    div.section-body { (PreEscaped(render_markdown(body))) }
                }
                @if !section.stats.is_empty() {
                    div.stats {
                        @for (i, stat) in section.stats.iter().enumerate() {
                            div.stat {
                                span.stat-number id=(format!("stat-{}-{i}", section.id)) { (stat.value) }
                                span.stat-label { (stat.label) }
                            }
                        }
                    }
                }
                @for (i, item) in section.education.iter().enumerate() {
                    div.edu-item id=(format!("edu-{i}")) {
                        h3 { (item.title) }
                        @if !item.school.is_empty() {
                            p.edu-school { (item.school) }
                        }
                        @if !item.years.is_empty() {
                            p.edu-years { (item.years) }
                        }
                    }
                }
                @if !section.slides.is_empty() {
                    (render_carousel(&section.slides))
                }
                @if section.contact_form {
                    (render_contact_form())
                }
            }
        }
    }
}

fn render_carousel(slides: &[Slide]) -> Markup {
    html! {
        div.projects-carousel-container {
            div.projects-carousel id="projects-carousel" {
                @for (i, slide) in slides.iter().enumerate() {
                    div.projects-slide.active[i == 0] id=(format!("project-slide-{}", i + 1)) {
                        h3 { (slide.title) }
                        @if !slide.summary.is_empty() {
                            p { (slide.summary) }
                        }
                        @if let Some(modal) = &slide.modal {
                            button.project-details
                                id=(format!("project-details-{}", i + 1))
                                onclick=(format!("openModal('{modal}')")) { "Details" }
                        }
                    }
                }
            }
            button.carousel-btn id="carousel-prev" onclick="changeProjectSlide(-1)" { "‹" }
            button.carousel-btn id="carousel-next" onclick="changeProjectSlide(1)" { "›" }
            div.projects-carousel-dots {
                @for i in 1..=slides.len() {
                    span.dot.active[i == 1]
                        id=(format!("dot-{i}"))
                        onclick=(format!("currentProjectSlide({i})")) {}
                }
            }
        }
    }
}

fn render_contact_form() -> Markup {
    html! {
        form.contact-form {
            input id="contact-name" type="text" placeholder="Your Name";
            input id="contact-email" type="email" placeholder="Your Email";
            textarea id="contact-message" placeholder="Your Message" {}
            button type="submit" { "Send" }
        }
    }
}

fn render_modal(modal: &ModalLayout) -> Markup {
    html! {
        div.modal id=(modal.id) style="display: none" {
            div.modal-content {
                span.close
                    id=(format!("{}-close", modal.id))
                    onclick=(format!("closeModal('{}')", modal.id)) { "×" }
                h2 { (modal.title) }
                div.modal-body { (PreEscaped(render_markdown(&modal.body))) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
