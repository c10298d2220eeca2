//! The page: one document, the component state objects, and the clock.
//!
//! [`Page`] is the single owner of all view state. Components are bound to
//! the document when the page is built; any component whose markup is
//! missing is built disabled and ignores its events. The host feeds
//! [`PageEvent`]s through [`Page::dispatch`] and moves virtual time forward
//! with [`Page::advance`]; timer work (throttled scroll handling, counter
//! ticks, staggered reveals) only runs inside `advance`.
//!
//! Markup-declared controls reach the carousel and modals through
//! [`Controls`], a narrow capability borrowed from the page.

use crate::animation::{self, CounterAnimation, OneShot, RevealObserver};
use crate::carousel::{Carousel, Direction};
use crate::config::BehaviorConfig;
use crate::dom::{Document, NodeId};
use crate::event::PageEvent;
use crate::form::ContactForm;
use crate::modal::ModalManager;
use crate::nav::{HamburgerMenu, NavHighlighter};
use crate::timing::{Debounce, Millis, Scheduler, Throttle, TimerId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Names under which [`Controls`] entry points are reachable from markup.
pub const ENTRY_POINTS: [&str; 4] = [
    "changeProjectSlide",
    "currentProjectSlide",
    "openModal",
    "closeModal",
];

/// Split an inline handler such as `openModal('note-g')` into its name and
/// raw argument text.
pub fn parse_inline_call(call: &str) -> Option<(&str, &str)> {
    let (name, rest) = call.trim().split_once('(')?;
    let arg = rest.trim_end().strip_suffix(')')?;
    Some((name.trim(), arg))
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("unknown entry point: {0}")]
    UnknownEntryPoint(String),
    #[error("invalid argument {arg:?} for {entry_point}")]
    InvalidArgument { entry_point: String, arg: String },
}

/// Deferred work owned by the page's clock.
#[derive(Debug, Clone, PartialEq)]
enum Task {
    Scroll,
    BackToTop,
    Resize,
    CounterTick(usize),
    Reveal(NodeId),
    Hero(NodeId),
}

#[derive(Debug, Clone)]
struct CounterRun {
    node: NodeId,
    animation: CounterAnimation,
    ticks: u64,
    timer: TimerId,
    finished: bool,
}

/// Snapshot of the observable view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub now_ms: Millis,
    pub scroll_y: f64,
    pub active_section: Option<String>,
    pub navbar_scrolled: bool,
    pub menu_open: bool,
    pub slide: usize,
    pub open_modal: Option<String>,
    pub scroll_locked: bool,
    pub counters_animated: bool,
    pub education_animated: bool,
    pub counters: Vec<String>,
    pub revealed_cards: usize,
    pub back_to_top_visible: bool,
}

pub struct Page<D: Document> {
    doc: D,
    config: BehaviorConfig,
    clock: Scheduler<Task>,
    nav: NavHighlighter,
    menu: HamburgerMenu,
    carousel: Carousel,
    modals: ModalManager,
    counters_latch: OneShot,
    education_latch: OneShot,
    counter_runs: Vec<CounterRun>,
    observer: RevealObserver,
    form: ContactForm,
    back_to_top: Option<NodeId>,
    scroll_indicator: Option<NodeId>,
    scroll_throttle: Throttle,
    back_to_top_throttle: Throttle,
    resize_debounce: Debounce,
    hovered: Option<NodeId>,
    ready: bool,
}

impl<D: Document> Page<D> {
    /// Bind every component to `doc`. Nothing in the document is modified
    /// until [`PageEvent::DomContentLoaded`].
    pub fn new(doc: D, config: BehaviorConfig) -> Self {
        let nav = NavHighlighter::attach(&doc, &config.nav);
        let menu = HamburgerMenu::attach(&doc);
        let carousel = Carousel::attach(&doc, &config.carousel);
        let observer = RevealObserver::attach(&doc, &config.observer);
        let form = ContactForm::attach(&doc);
        let back_to_top = doc.element_by_id("back-to-top");
        let scroll_indicator = doc.elements_by_class("scroll-indicator").into_iter().next();
        Self {
            scroll_throttle: Throttle::new(config.timing.scroll_throttle_ms),
            back_to_top_throttle: Throttle::new(config.back_to_top.throttle_ms),
            resize_debounce: Debounce::new(config.timing.resize_debounce_ms),
            doc,
            config,
            clock: Scheduler::new(),
            nav,
            menu,
            carousel,
            modals: ModalManager::new(),
            counters_latch: OneShot::new(),
            education_latch: OneShot::new(),
            counter_runs: Vec::new(),
            observer,
            form,
            back_to_top,
            scroll_indicator,
            hovered: None,
            ready: false,
        }
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    /// Host access, e.g. to move the scroll position before a
    /// [`PageEvent::Scroll`].
    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn nav(&self) -> &NavHighlighter {
        &self.nav
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Timers still armed (throttles, counters, reveals).
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    pub fn counters_animated(&self) -> bool {
        self.counters_latch.fired()
    }

    pub fn education_animated(&self) -> bool {
        self.education_latch.fired()
    }

    pub fn controls(&mut self) -> Controls<'_, D> {
        Controls { page: self }
    }

    /// Route one host event. Until `DOMContentLoaded` (or `load`) has run,
    /// only lifecycle and error events are handled; listeners are not yet
    /// attached, so user input is dropped.
    pub fn dispatch(&mut self, event: PageEvent) {
        if !self.ready && event.needs_listeners() {
            debug!(?event, "event before initialization ignored");
            return;
        }
        match event {
            PageEvent::DomContentLoaded => self.on_ready(),
            PageEvent::Load => self.on_load(),
            PageEvent::Scroll => self.on_scroll(),
            PageEvent::Resize => {
                self.observer.check(&mut self.doc);
                self.resize_debounce.bounce(&mut self.clock, Task::Resize);
            }
            PageEvent::Click { target } => {
                let target = self.resolve(target.as_deref());
                self.on_click(target);
            }
            PageEvent::TouchStart { x, target } => {
                if self.in_carousel(target.as_deref()) {
                    self.carousel.touch_start(x);
                }
            }
            PageEvent::TouchEnd { x, target } => {
                if self.in_carousel(target.as_deref()) {
                    self.carousel.touch_end(&mut self.doc, x);
                }
            }
            PageEvent::KeyDown { key, ctrl, meta } => self.on_key(&key, ctrl || meta),
            PageEvent::PointerMove { target } => {
                self.hovered = self.resolve(target.as_deref());
            }
            PageEvent::Submit => {
                self.form.submit(&mut self.doc);
            }
            PageEvent::Error { message } => error!(%message, "an error occurred"),
            PageEvent::UnhandledRejection { reason } => {
                error!(%reason, "unhandled promise rejection")
            }
        }
    }

    /// Move virtual time forward by `elapsed` ms, running every timer that
    /// comes due, in due order.
    pub fn advance(&mut self, elapsed: Millis) {
        let until = self.clock.now() + elapsed;
        while let Some((_, task)) = self.clock.pop_due(until) {
            self.run(task);
        }
    }

    /// Snapshot of everything a viewer could observe.
    pub fn view_state(&self) -> ViewState {
        let body = self.doc.body();
        let navbar_scrolled = self
            .doc
            .element_by_id("navbar")
            .is_some_and(|n| self.doc.has_class(n, "scrolled"));
        let revealed_cards = self
            .doc
            .elements_by_class("edu-item")
            .into_iter()
            .filter(|&c| animation::is_revealed(&self.doc, c))
            .count();
        ViewState {
            now_ms: self.clock.now(),
            scroll_y: self.doc.scroll_y(),
            active_section: self.nav.active_section().map(String::from),
            navbar_scrolled,
            menu_open: self.menu.is_open(&self.doc),
            slide: self.carousel.index(),
            open_modal: self.modals.open_modal().map(String::from),
            scroll_locked: self.doc.style(body, "overflow").as_deref() == Some("hidden"),
            counters_animated: self.counters_latch.fired(),
            education_animated: self.education_latch.fired(),
            counters: self
                .doc
                .elements_by_class("stat-number")
                .into_iter()
                .map(|n| self.doc.text_content(n))
                .collect(),
            revealed_cards,
            back_to_top_visible: self
                .back_to_top
                .is_some_and(|b| self.doc.has_class(b, "show")),
        }
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;

        self.carousel.render(&mut self.doc);
        self.observer.prepare(&mut self.doc);
        self.observer.check(&mut self.doc);
        for card in self.doc.elements_by_class("edu-item") {
            animation::prepare_hidden(&mut self.doc, card, "all 0.6s ease");
        }
        if let Some(indicator) = self.scroll_indicator {
            self.doc.set_style(indicator, "cursor", "pointer");
        }
        info!(
            nav = self.nav.is_enabled(),
            carousel = self.carousel.is_enabled(),
            form = self.form.is_enabled(),
            observed = self.observer.observed().len(),
            "page behavior initialized"
        );
    }

    fn on_load(&mut self) {
        self.on_ready();
        self.handle_scroll();
        if let Some(hero) = self.doc.elements_by_class("hero-content").into_iter().next() {
            self.doc.set_style(hero, "opacity", "0");
            self.doc.set_style(hero, "transform", "translateY(30px)");
            self.clock.schedule(self.config.hero.delay_ms, Task::Hero(hero));
        }
    }

    fn on_scroll(&mut self) {
        self.observer.check(&mut self.doc);
        self.scroll_throttle.hit(&mut self.clock, Task::Scroll);
        if self.back_to_top.is_some() {
            self.back_to_top_throttle
                .hit(&mut self.clock, Task::BackToTop);
        }
    }

    fn on_click(&mut self, target: Option<NodeId>) {
        if let Some(t) = target {
            if let Some(section) = self.nav.link_target(&self.doc, t) {
                if self.nav.scroll_to_section(&mut self.doc, &section) {
                    self.menu.close(&mut self.doc);
                }
            }
        }
        self.menu.on_click(&mut self.doc, target);
        let Some(t) = target else { return };
        if let Some((name, arg)) = self.inline_handler(t) {
            if let Err(err) = self.controls().invoke(&name, &arg) {
                warn!(%err, "inline handler failed");
            }
        }
        self.modals.on_click(&mut self.doc, t);
        if self.back_to_top.is_some_and(|b| self.doc.contains(b, t)) {
            self.doc.scroll_to(0.0);
        }
        if self.scroll_indicator.is_some_and(|s| self.doc.contains(s, t)) {
            self.nav.scroll_to_section(&mut self.doc, "about");
        }
    }

    fn on_key(&mut self, key: &str, modifier: bool) {
        self.carousel.on_key(&mut self.doc, key, self.hovered);
        if key == "Escape" {
            self.modals.close_all(&mut self.doc);
        }
        if modifier {
            if let Some(section) = self.nav.shortcut_target(key).map(String::from) {
                self.nav.scroll_to_section(&mut self.doc, &section);
            }
        }
    }

    /// Throttled scroll work: navbar state, highlight, one-shot triggers.
    fn handle_scroll(&mut self) {
        self.nav.update_navbar(&mut self.doc);
        self.nav.update(&mut self.doc);
        self.maybe_start_counters();
        self.maybe_reveal_education();
    }

    fn maybe_start_counters(&mut self) {
        let section = self.config.counters.section.clone();
        let duration = self.config.counters.duration_ms;
        let tick = self.config.counters.tick_ms;
        let clock = &mut self.clock;
        let runs = &mut self.counter_runs;
        self.counters_latch
            .maybe_trigger(&mut self.doc, &section, |doc| {
                for node in doc.elements_by_class("stat-number") {
                    let label = doc.text_content(node);
                    let Some(animation) = CounterAnimation::from_label(&label, duration, tick) else {
                        debug!(%label, "counter label has no number");
                        continue;
                    };
                    let timer = clock.schedule_every(animation.tick_ms(), Task::CounterTick(runs.len()));
                    runs.push(CounterRun {
                        node,
                        animation,
                        ticks: 0,
                        timer,
                        finished: false,
                    });
                }
                debug!(count = runs.len(), "counters started");
            });
    }

    fn maybe_reveal_education(&mut self) {
        let section = self.config.reveal.section.clone();
        let stagger = self.config.reveal.stagger_ms;
        let clock = &mut self.clock;
        self.education_latch
            .maybe_trigger(&mut self.doc, &section, |doc| {
                let cards = doc.elements_by_class("edu-item");
                for (delay, card) in animation::stagger_plan(&cards, stagger) {
                    clock.schedule(delay, Task::Reveal(card));
                }
            });
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Scroll => {
                self.scroll_throttle.release();
                self.handle_scroll();
            }
            Task::BackToTop => {
                self.back_to_top_throttle.release();
                if let Some(button) = self.back_to_top {
                    if self.doc.scroll_y() > self.config.back_to_top.show_after {
                        self.doc.add_class(button, "show");
                    } else {
                        self.doc.remove_class(button, "show");
                    }
                }
            }
            Task::Resize => {
                self.resize_debounce.release();
                self.nav.update(&mut self.doc);
            }
            Task::CounterTick(i) => self.tick_counter(i),
            Task::Reveal(card) => animation::reveal(&mut self.doc, card),
            Task::Hero(hero) => {
                self.doc.set_style(hero, "transition", "all 1s ease");
                animation::reveal(&mut self.doc, hero);
            }
        }
    }

    fn tick_counter(&mut self, i: usize) {
        let Some(run) = self.counter_runs.get_mut(i) else {
            return;
        };
        if run.finished {
            return;
        }
        run.ticks += 1;
        let frame = run.animation.step(run.ticks * run.animation.tick_ms());
        self.doc.set_text_content(run.node, &frame.text);
        if frame.finished {
            run.finished = true;
            self.clock.cancel(run.timer);
        }
    }

    /// Nearest `onclick` handler at or above `node`.
    fn inline_handler(&self, node: NodeId) -> Option<(String, String)> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(call) = self.doc.attribute(n, "onclick") {
                return parse_inline_call(&call).map(|(name, arg)| (name.to_string(), arg.to_string()));
            }
            current = self.doc.parent(n);
        }
        None
    }

    fn resolve(&self, id: Option<&str>) -> Option<NodeId> {
        id.and_then(|id| self.doc.element_by_id(id))
    }

    fn in_carousel(&self, target: Option<&str>) -> bool {
        self.resolve(target)
            .is_some_and(|t| self.carousel.in_region(&self.doc, t))
    }
}

/// Capability handed to markup-declared controls (`onclick="openModal('x')"`).
pub struct Controls<'a, D: Document> {
    page: &'a mut Page<D>,
}

impl<D: Document> Controls<'_, D> {
    /// `changeProjectSlide(delta)`: step by the sign of `delta`.
    pub fn change_project_slide(&mut self, delta: i64) {
        if let Some(direction) = Direction::from_delta(delta) {
            self.page.carousel.advance(&mut self.page.doc, direction);
        }
    }

    /// `currentProjectSlide(n)`: jump to 1-based slide `n`.
    pub fn current_project_slide(&mut self, slide: usize) -> bool {
        self.page.carousel.go_to(&mut self.page.doc, slide)
    }

    pub fn open_modal(&mut self, id: &str) -> bool {
        self.page.modals.open(&mut self.page.doc, id)
    }

    pub fn close_modal(&mut self, id: &str) {
        self.page.modals.close(&mut self.page.doc, id);
    }

    /// Call an entry point by its markup name with a single textual argument.
    pub fn invoke(&mut self, name: &str, arg: &str) -> Result<(), PageError> {
        let invalid = || PageError::InvalidArgument {
            entry_point: name.to_string(),
            arg: arg.to_string(),
        };
        let arg = arg.trim().trim_matches(|c| c == '\'' || c == '"');
        match name {
            "changeProjectSlide" => {
                let delta: i64 = arg.parse().map_err(|_| invalid())?;
                self.change_project_slide(delta);
            }
            "currentProjectSlide" => {
                let slide: usize = arg.parse().map_err(|_| invalid())?;
                if !self.current_project_slide(slide) {
                    return Err(invalid());
                }
            }
            "openModal" => {
                self.open_modal(arg);
            }
            "closeModal" => self.close_modal(arg),
            _ => return Err(PageError::UnknownEntryPoint(name.to_string())),
        }
        Ok(())
    }
}
