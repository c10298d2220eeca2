//! Events the page reacts to.
//!
//! Targets are element ids. An absent or unknown id means the event hit the
//! page background. Events are serializable so simulation scripts can carry
//! them verbatim:
//!
//! ```json
//! {"type": "click", "target": "nav-about"}
//! {"type": "key_down", "key": "ArrowRight"}
//! {"type": "touch_end", "x": 120.0, "target": "projects-carousel"}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    DomContentLoaded,
    Load,
    /// The host has already updated its scroll position.
    Scroll,
    /// The host has already updated its viewport.
    Resize,
    Click {
        #[serde(default)]
        target: Option<String>,
    },
    TouchStart {
        x: f64,
        #[serde(default)]
        target: Option<String>,
    },
    TouchEnd {
        x: f64,
        #[serde(default)]
        target: Option<String>,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Pointer now hovers `target` (or nothing).
    PointerMove {
        #[serde(default)]
        target: Option<String>,
    },
    /// Contact form submitted.
    Submit,
    Error {
        message: String,
    },
    UnhandledRejection {
        reason: String,
    },
}

impl PageEvent {
    pub fn click(target: &str) -> Self {
        Self::Click {
            target: Some(target.to_string()),
        }
    }

    pub fn key(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    /// False for lifecycle and global error events, which are handled
    /// before the page is initialized.
    pub fn needs_listeners(&self) -> bool {
        !matches!(
            self,
            Self::DomContentLoaded | Self::Load | Self::Error { .. } | Self::UnhandledRejection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_events() {
        let event: PageEvent = serde_json::from_str(r#"{"type":"click","target":"nav-about"}"#).unwrap();
        assert_eq!(event, PageEvent::click("nav-about"));

        let event: PageEvent = serde_json::from_str(r#"{"type":"key_down","key":"Escape"}"#).unwrap();
        assert_eq!(event, PageEvent::key("Escape"));

        let event: PageEvent = serde_json::from_str(r#"{"type":"dom_content_loaded"}"#).unwrap();
        assert_eq!(event, PageEvent::DomContentLoaded);
    }

    #[test]
    fn click_target_defaults_to_background() {
        let event: PageEvent = serde_json::from_str(r#"{"type":"click"}"#).unwrap();
        assert_eq!(event, PageEvent::Click { target: None });
    }

    #[test]
    fn only_user_input_waits_for_listeners() {
        assert!(!PageEvent::DomContentLoaded.needs_listeners());
        assert!(!PageEvent::Error { message: "boom".into() }.needs_listeners());
        assert!(PageEvent::Scroll.needs_listeners());
        assert!(PageEvent::key("Escape").needs_listeners());
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        assert!(serde_json::from_str::<PageEvent>(r#"{"type":"hover"}"#).is_err());
    }
}
