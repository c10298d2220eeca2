//! # Folio View
//!
//! The behavior layer of a single-page portfolio site: which nav link is
//! highlighted, which project slide is showing, which modal is open, and
//! which scroll-triggered animations have already played.
//!
//! All of it is view state driven by user events (scroll, click, key, touch)
//! and by timers. The crate models that state explicitly so it can run, and
//! be tested, without a browser.
//!
//! ```text
//! PageLayout (TOML) ──▶ MemoryDocument ──▶ Page ◀── PageEvent / Controls
//!        │                                  │
//!        └──▶ shell (maud HTML)             └──▶ ViewState
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | The `Document` host seam and an in-memory arena implementation |
//! | [`page`] | Owns all component state and the clock; routes events; exposes `Controls` |
//! | [`nav`] | Active-link highlighting, navbar state, hamburger menu, section shortcuts |
//! | [`carousel`] | Two-slide projects carousel with wraparound, dots, swipe and arrow keys |
//! | [`modal`] | Single-open modal dialogs with body scroll lock |
//! | [`animation`] | Fire-once counters, staggered card reveals, visibility-threshold fade-ins |
//! | [`form`] | Contact form validation and acknowledgement |
//! | [`timing`] | Virtual-time scheduler, throttle and debounce |
//! | [`event`] | Serializable page events |
//! | [`config`] | Behavior tuning: `behavior.toml` loading, merging, and validation |
//! | [`layout`] | Page structure as TOML; builds the in-memory document |
//! | [`shell`] | Renders the page layout to static HTML and copies assets |
//! | [`script`] | Replays JSON step scripts against a page |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## State Objects, Not Globals
//!
//! Every component is a plain struct owned by [`page::Page`]. Markup that
//! calls into the page (`onclick="openModal('x')"`) goes through
//! [`page::Controls`], a capability borrowed from the page with exactly four
//! entry points. Nothing lives at process scope, so any number of pages can
//! coexist in one test binary.
//!
//! ## Missing Markup Means Disabled, Not Broken
//!
//! Components look up their elements once, when the page is built. A
//! component whose markup is absent is constructed disabled and ignores its
//! events. No event handler ever fails on a missing element.
//!
//! ## Virtual Time
//!
//! Throttles, debounces, counter ticks and staggered reveals are entries in a
//! [`timing::Scheduler`]. The host moves time forward explicitly with
//! [`page::Page::advance`], which makes every timing property deterministic
//! in tests. Counter animation itself is a pure function of elapsed time
//! ([`animation::CounterAnimation::step`]).
//!
//! ## One Layout, Two Renderings
//!
//! The same [`layout::PageLayout`] produces the HTML shell and the in-memory
//! document used by `simulate`, so the markup contract the components bind
//! to cannot drift between the two.

pub mod animation;
pub mod carousel;
pub mod config;
pub mod dom;
pub mod event;
pub mod form;
pub mod layout;
pub mod modal;
pub mod nav;
pub mod output;
pub mod page;
pub mod script;
pub mod shell;
pub mod timing;

#[cfg(test)]
pub(crate) mod test_helpers;
