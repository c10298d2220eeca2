//! Stat counter interpolation.
//!
//! A counter's target is read from its own label (`"150+"`, `"4.5"`), then
//! interpolated from 0 in equal increments of `target / (duration / tick)`.
//! The animation is a pure function of elapsed time so the scheduler only has
//! to count ticks:
//!
//! ```text
//! value(elapsed) = min(floor(elapsed / tick) * increment, target)
//! ```
//!
//! Labels keep their shape: a `+` anywhere in the label becomes a trailing
//! `+`, and labels containing a dot are shown with one decimal place while
//! the rest are floored to integers.

use crate::timing::Millis;

/// How a counter label is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFormat {
    pub decimal: bool,
    pub plus_suffix: bool,
}

impl CounterFormat {
    pub fn of(label: &str) -> Self {
        Self {
            decimal: label.contains('.'),
            plus_suffix: label.contains('+'),
        }
    }

    pub fn render(&self, value: f64) -> String {
        let suffix = if self.plus_suffix { "+" } else { "" };
        if self.decimal {
            format!("{value:.1}{suffix}")
        } else {
            format!("{}{suffix}", value.floor() as i64)
        }
    }
}

/// Numeric target of a label: every character except digits and dots is
/// dropped, then the longest leading decimal number is parsed.
pub fn parse_target(label: &str) -> Option<f64> {
    let digits: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in digits.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }
    digits[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// One rendered frame of a counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub value: f64,
    pub text: String,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    tick_ms: Millis,
    format: CounterFormat,
}

impl CounterAnimation {
    /// Build from a label. Labels without a number yield `None`.
    pub fn from_label(label: &str, duration_ms: Millis, tick_ms: Millis) -> Option<Self> {
        let target = parse_target(label)?;
        let tick_ms = tick_ms.max(1);
        let steps = (duration_ms as f64 / tick_ms as f64).max(1.0);
        Some(Self {
            target,
            increment: target / steps,
            tick_ms,
            format: CounterFormat::of(label),
        })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn tick_ms(&self) -> Millis {
        self.tick_ms
    }

    /// Frame shown `elapsed_ms` after the animation started. Only whole
    /// ticks count; the value is clamped so it never overshoots.
    pub fn step(&self, elapsed_ms: Millis) -> CounterFrame {
        let ticks = elapsed_ms / self.tick_ms;
        let mut value = ticks as f64 * self.increment;
        let finished = value >= self.target;
        if finished {
            value = self.target;
        }
        CounterFrame {
            value,
            text: self.format.render(value),
            finished,
        }
    }
}
