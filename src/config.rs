//! Behavior configuration module.
//!
//! Handles loading, validating, and merging `behavior.toml`. Every threshold,
//! delay, and section id the components use comes from here; the stock
//! defaults reproduce the behavior of the published portfolio page.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [nav]
//! section_offset = 100        # Extra lead (px) before a section counts as current
//! bottom_tolerance = 10       # Distance (px) from page end that forces the last link
//! scrolled_threshold = 50     # Scroll offset (px) after which the navbar is "scrolled"
//! bottom_section = "contact"  # Section whose link wins at the bottom of the page
//! shortcuts = ["home", "about", "hobbies", "education", "projects", "contact"]
//!
//! [carousel]
//! slide_count = 2
//! swipe_threshold = 50        # Minimum horizontal travel (px) for a swipe
//!
//! [counters]
//! section = "about"
//! duration_ms = 800
//! tick_ms = 16
//!
//! [reveal]
//! section = "education"
//! stagger_ms = 200
//!
//! [observer]
//! threshold = 0.1             # Visible fraction that reveals a fade-in element
//! root_margin = 50            # Pre-trigger margin (px) around the viewport
//!
//! [timing]
//! scroll_throttle_ms = 10
//! resize_debounce_ms = 250
//!
//! [back_to_top]
//! show_after = 300
//! throttle_ms = 100
//!
//! [hero]
//! delay_ms = 100
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! [carousel]
//! slide_count = 3
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Behavior configuration loaded from `behavior.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub nav: NavConfig,
    pub carousel: CarouselConfig,
    pub counters: CounterConfig,
    pub reveal: RevealConfig,
    pub observer: ObserverConfig,
    pub timing: TimingConfig,
    pub back_to_top: BackToTopConfig,
    pub hero: HeroConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.slide_count == 0 {
            return Err(ConfigError::Validation(
                "carousel.slide_count must be at least 1".into(),
            ));
        }
        if self.counters.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "counters.tick_ms must be non-zero".into(),
            ));
        }
        if !(self.observer.threshold > 0.0 && self.observer.threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "observer.threshold must be in (0, 1]".into(),
            ));
        }
        if self.nav.bottom_section.is_empty() {
            return Err(ConfigError::Validation(
                "nav.bottom_section must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Navigation highlighting and navbar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub section_offset: f64,
    pub bottom_tolerance: f64,
    pub scrolled_threshold: f64,
    pub bottom_section: String,
    /// Section ids reachable with Ctrl/Cmd + 1..=9, in order.
    pub shortcuts: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_offset: 100.0,
            bottom_tolerance: 10.0,
            scrolled_threshold: 50.0,
            bottom_section: "contact".to_string(),
            shortcuts: ["home", "about", "hobbies", "education", "projects", "contact"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub slide_count: usize,
    pub swipe_threshold: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_count: 2,
            swipe_threshold: 50.0,
        }
    }
}

/// Stat counter animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Section whose first appearance starts the counters.
    pub section: String,
    pub duration_ms: u64,
    pub tick_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            section: "about".to_string(),
            duration_ms: 800,
            tick_ms: 16,
        }
    }
}

/// Staggered card reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub section: String,
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section: "education".to_string(),
            stagger_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    pub threshold: f64,
    pub root_margin: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub scroll_throttle_ms: u64,
    pub resize_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 10,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackToTopConfig {
    pub show_after: f64,
    pub throttle_ms: u64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            show_after: 300.0,
            throttle_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub delay_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self { delay_ms: 100 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BehaviorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<BehaviorConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load behavior config from `path`.
///
/// A missing file yields the stock defaults; a present file is merged on top
/// of them.
pub fn load_config(path: &Path) -> Result<BehaviorConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `behavior.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio-view behavior configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# A section becomes current this many pixels (plus the navbar height)
# before its top edge reaches the top of the viewport.
section_offset = 100

# Within this many pixels of the page end, the bottom section's link is
# forced active.
bottom_tolerance = 10

# Scroll offset after which the navbar gets the "scrolled" class.
scrolled_threshold = 50

# Section whose nav link wins at the bottom of the page.
bottom_section = "contact"

# Ctrl/Cmd + 1, 2, ... scroll to these sections.
shortcuts = ["home", "about", "hobbies", "education", "projects", "contact"]

# ---------------------------------------------------------------------------
# Projects carousel
# ---------------------------------------------------------------------------
[carousel]
slide_count = 2

# Minimum horizontal finger travel (px) that counts as a swipe.
swipe_threshold = 50

# ---------------------------------------------------------------------------
# Stat counters
# ---------------------------------------------------------------------------
[counters]
section = "about"
duration_ms = 800
tick_ms = 16

# ---------------------------------------------------------------------------
# Staggered card reveal
# ---------------------------------------------------------------------------
[reveal]
section = "education"
stagger_ms = 200

# ---------------------------------------------------------------------------
# Fade-in observer
# ---------------------------------------------------------------------------
[observer]
# Fraction of an element that must be visible before it is revealed.
threshold = 0.1

# Margin (px) added around the viewport so elements reveal slightly early.
root_margin = 50

# ---------------------------------------------------------------------------
# Event rate limiting
# ---------------------------------------------------------------------------
[timing]
scroll_throttle_ms = 10
resize_debounce_ms = 250

# ---------------------------------------------------------------------------
# Back-to-top button
# ---------------------------------------------------------------------------
[back_to_top]
show_after = 300
throttle_ms = 100

# ---------------------------------------------------------------------------
# Hero block
# ---------------------------------------------------------------------------
[hero]
delay_ms = 100
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_published_page() {
        let config = BehaviorConfig::default();
        assert_eq!(config.nav.section_offset, 100.0);
        assert_eq!(config.nav.bottom_section, "contact");
        assert_eq!(config.carousel.slide_count, 2);
        assert_eq!(config.carousel.swipe_threshold, 50.0);
        assert_eq!(config.counters.duration_ms, 800);
        assert_eq!(config.counters.tick_ms, 16);
        assert_eq!(config.reveal.stagger_ms, 200);
        assert_eq!(config.observer.threshold, 0.1);
        assert_eq!(config.timing.resize_debounce_ms, 250);
    }

    #[test]
    fn parse_partial_config() {
        let overlay: toml::Value = toml::from_str(
            r#"
[carousel]
slide_count = 3
"#,
        )
        .unwrap();
        let config = resolve_config(Some(overlay)).unwrap();
        assert_eq!(config.carousel.slide_count, 3);
        // Sibling keys keep their defaults
        assert_eq!(config.carousel.swipe_threshold, 50.0);
        assert_eq!(config.nav.bottom_tolerance, 10.0);
    }

    #[test]
    fn unknown_keys_rejected() {
        let overlay: toml::Value = toml::from_str("[carousel]\nslides = 3\n").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn zero_slides_fails_validation() {
        let overlay: toml::Value = toml::from_str("[carousel]\nslide_count = 0\n").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        let mut config = BehaviorConfig::default();
        config.observer.threshold = 1.5;
        assert!(config.validate().is_err());
        config.observer.threshold = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_overlays_nested_tables() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("behavior.toml")).unwrap();
        assert_eq!(config, BehaviorConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("behavior.toml");
        fs::write(&path, "[reveal]\nstagger_ms = 150\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.reveal.stagger_ms, 150);
        assert_eq!(config.reveal.section, "education");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("behavior.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        assert_eq!(config, BehaviorConfig::default());
    }
}
