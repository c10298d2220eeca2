//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Simulate
//!
//! ```text
//! View state after 16 steps (t = 2300ms)
//!     Scroll: 3600px
//!     Active section: contact
//!     Navbar: scrolled
//!     Menu: closed
//!     Slide: 2
//!     Modal: none
//!     Scroll lock: off
//!
//! Triggers
//!     Counters: fired
//!     Education cards: fired (3 revealed)
//!     Back to top: visible
//!
//! Counters
//!     001 150+
//!     002 4.5
//!
//! Prompts
//!     001 Message sent!
//! ```
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 home (800px, hero)
//! 002 about (800px, 3 stats)
//!
//! Modals
//! 001 note-g
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::layout::{PageLayout, SectionLayout};
use crate::page::ViewState;
use crate::script::SimulationReport;
use crate::shell::BuildReport;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn fired(flag: bool) -> &'static str {
    if flag { "fired" } else { "waiting" }
}

/// Numbered list under a heading; omitted entirely when empty.
fn numbered_block(heading: &str, items: &[String], lines: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(heading.to_string());
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), item));
    }
}

/// Short description of what a section contains.
fn section_features(section: &SectionLayout) -> Vec<String> {
    let mut features = vec![format!("{}px", section.height)];
    if section.hero {
        features.push("hero".into());
    }
    if !section.stats.is_empty() {
        features.push(format!("{} stats", section.stats.len()));
    }
    if !section.education.is_empty() {
        features.push(format!("{} cards", section.education.len()));
    }
    if !section.slides.is_empty() {
        features.push(format!("{} slides", section.slides.len()));
    }
    if section.contact_form {
        features.push("contact form".into());
    }
    if section.fade_in {
        features.push("fade-in".into());
    }
    features
}

// ============================================================================
// Simulate
// ============================================================================

pub fn format_view_state(state: &ViewState) -> Vec<String> {
    let mut lines = vec![
        format!("{}Scroll: {}px", indent(1), state.scroll_y),
        format!(
            "{}Active section: {}",
            indent(1),
            state.active_section.as_deref().unwrap_or("none")
        ),
        format!(
            "{}Navbar: {}",
            indent(1),
            if state.navbar_scrolled { "scrolled" } else { "top" }
        ),
        format!(
            "{}Menu: {}",
            indent(1),
            if state.menu_open { "open" } else { "closed" }
        ),
        format!("{}Slide: {}", indent(1), state.slide + 1),
        format!(
            "{}Modal: {}",
            indent(1),
            state.open_modal.as_deref().unwrap_or("none")
        ),
        format!("{}Scroll lock: {}", indent(1), on_off(state.scroll_locked)),
    ];

    lines.push(String::new());
    lines.push("Triggers".to_string());
    lines.push(format!("{}Counters: {}", indent(1), fired(state.counters_animated)));
    lines.push(format!(
        "{}Education cards: {} ({} revealed)",
        indent(1),
        fired(state.education_animated),
        state.revealed_cards
    ));
    lines.push(format!(
        "{}Back to top: {}",
        indent(1),
        if state.back_to_top_visible { "visible" } else { "hidden" }
    ));

    numbered_block("Counters", &state.counters, &mut lines);
    lines
}

pub fn format_simulation(report: &SimulationReport) -> Vec<String> {
    let mut lines = vec![format!(
        "View state after {} steps (t = {}ms)",
        report.steps, report.state.now_ms
    )];
    lines.extend(format_view_state(&report.state));
    numbered_block("Prompts", &report.prompts, &mut lines);
    lines
}

pub fn print_simulation(report: &SimulationReport) {
    for line in format_simulation(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(layout: &PageLayout) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    for (i, section) in layout.sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section.id,
            section_features(section).join(", ")
        ));
    }
    if !layout.modals.is_empty() {
        lines.push(String::new());
        lines.push("Modals".to_string());
        for (i, modal) in layout.modals.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), modal.id));
        }
    }
    lines
}

pub fn print_check_output(layout: &PageLayout) {
    for line in format_check_output(layout) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    vec![
        format!("Page → {}", report.page.display()),
        format!("{}Assets copied: {}", indent(1), report.assets_copied),
        format!("Site generated at {}", report.output_dir.display()),
    ]
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
