//! Scripted simulation.
//!
//! A script is a JSON array of steps replayed against a [`Page`]:
//!
//! ```json
//! [
//!   {"step": "event", "type": "dom_content_loaded"},
//!   {"step": "scroll", "y": 900},
//!   {"step": "wait", "ms": 1000},
//!   {"step": "invoke", "name": "openModal", "arg": "note-g"}
//! ]
//! ```
//!
//! `scroll` and `resize` update the document first and then dispatch the
//! matching event, as a browser would. `wait` advances virtual time.

use crate::dom::{Document, MemoryDocument};
use crate::event::PageEvent;
use crate::page::{Page, PageError, ViewState};
use crate::timing::Millis;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {index}: no element with id '{id}'")]
    UnknownTarget { index: usize, id: String },
    #[error("step {index}: {source}")]
    Invoke {
        index: usize,
        #[source]
        source: PageError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Event(PageEvent),
    Scroll { y: f64 },
    Resize { height: f64 },
    /// Type into a form field.
    Input { target: String, value: String },
    Wait { ms: Millis },
    Invoke {
        name: String,
        #[serde(default)]
        arg: String,
    },
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

pub fn parse_script(content: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(content)?)
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub steps: usize,
    pub state: ViewState,
    /// Prompts shown to the user, in order.
    pub prompts: Vec<String>,
}

/// Replay `steps` in order. Stops at the first step that cannot be applied.
pub fn run(page: &mut Page<MemoryDocument>, steps: &[Step]) -> Result<SimulationReport, ScriptError> {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "replaying step");
        apply(page, index, step)?;
    }
    Ok(SimulationReport {
        steps: steps.len(),
        state: page.view_state(),
        prompts: page.doc().alerts().to_vec(),
    })
}

fn apply(page: &mut Page<MemoryDocument>, index: usize, step: &Step) -> Result<(), ScriptError> {
    match step {
        Step::Event(event) => page.dispatch(event.clone()),
        Step::Scroll { y } => {
            page.doc_mut().set_scroll_y(*y);
            page.dispatch(PageEvent::Scroll);
        }
        Step::Resize { height } => {
            page.doc_mut().set_viewport_height(*height);
            page.dispatch(PageEvent::Resize);
        }
        Step::Input { target, value } => {
            let node = page
                .doc()
                .element_by_id(target)
                .ok_or_else(|| ScriptError::UnknownTarget {
                    index,
                    id: target.clone(),
                })?;
            page.doc_mut().set_value(node, value);
        }
        Step::Wait { ms } => page.advance(*ms),
        Step::Invoke { name, arg } => page
            .controls()
            .invoke(name, arg)
            .map_err(|source| ScriptError::Invoke { index, source })?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_page;

    const TOUR: &str = include_str!("../fixtures/scripts/tour.json");

    #[test]
    fn parses_every_step_kind() {
        let steps = parse_script(
            r#"[
                {"step": "event", "type": "click", "target": "hamburger"},
                {"step": "scroll", "y": 120.5},
                {"step": "resize", "height": 600},
                {"step": "input", "target": "contact-name", "value": "Ada"},
                {"step": "wait", "ms": 16},
                {"step": "invoke", "name": "closeModal", "arg": "x"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], Step::Event(PageEvent::click("hamburger")));
        assert_eq!(steps[4], Step::Wait { ms: 16 });
    }

    #[test]
    fn tour_script_ends_at_contact() {
        let mut page = sample_page();
        let report = run(&mut page, &parse_script(TOUR).unwrap()).unwrap();
        let state = &report.state;
        assert_eq!(state.active_section.as_deref(), Some("contact"));
        assert_eq!(state.slide, 1);
        assert_eq!(state.open_modal, None);
        assert!(!state.scroll_locked);
        assert!(state.counters_animated);
        assert!(state.education_animated);
        assert_eq!(state.revealed_cards, 3);
        assert_eq!(state.counters, ["150+", "4.5", "12"]);
        assert_eq!(report.prompts, ["Message sent!"]);
    }

    #[test]
    fn unknown_input_target_reports_step() {
        let mut page = sample_page();
        let steps = parse_script(r#"[{"step": "input", "target": "nope", "value": "x"}]"#).unwrap();
        let err = run(&mut page, &steps).unwrap_err();
        assert_eq!(err.to_string(), "step 0: no element with id 'nope'");
    }

    #[test]
    fn failed_invoke_reports_step() {
        let mut page = sample_page();
        let steps = parse_script(
            r#"[{"step": "wait", "ms": 1}, {"step": "invoke", "name": "explode"}]"#,
        )
        .unwrap();
        let err = run(&mut page, &steps).unwrap_err();
        assert!(matches!(err, ScriptError::Invoke { index: 1, .. }));
    }

    #[test]
    fn unknown_step_is_rejected() {
        assert!(parse_script(r#"[{"step": "teleport"}]"#).is_err());
    }
}
