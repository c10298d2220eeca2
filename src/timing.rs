//! Virtual time: timer queue, throttling and debouncing.
//!
//! The page never sleeps. Timers are entries in a [`Scheduler`] keyed by the
//! virtual millisecond they are due at; the host advances the clock and the
//! page drains due tasks one at a time with [`Scheduler::pop_due`]. Because
//! each task is handled before the next is popped, a handler may cancel a
//! repeating timer (or schedule new ones) and the queue stays consistent.
//!
//! Ordering: tasks due at the same millisecond fire in scheduling order.

use std::collections::BTreeMap;

/// Milliseconds of virtual time.
pub type Millis = u64;

/// Handle returned when scheduling; used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    task: T,
    /// `Some(interval)` for `setInterval`-style timers.
    repeat: Option<Millis>,
}

/// Timer queue over an abstract task type.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// `setTimeout(task, delay)`.
    pub fn schedule(&mut self, delay: Millis, task: T) -> TimerId {
        self.insert(self.now + delay, task, None)
    }

    /// `setInterval(task, interval)`. A zero interval is treated as 1ms so
    /// the timer cannot starve the queue.
    pub fn schedule_every(&mut self, interval: Millis, task: T) -> TimerId {
        let interval = interval.max(1);
        self.insert(self.now + interval, task, Some(interval))
    }

    /// Disarm a timer. Cancelling an unknown or already-fired one-shot timer
    /// is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.queue.retain(|_, entry| entry.id != id);
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Repeating timers are re-armed before being returned.
    /// When nothing is due the clock moves to `until` and `None` is returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, T)> {
        let due = match self.queue.first_key_value() {
            Some((&(due, _), _)) if due <= until => due,
            _ => {
                self.now = self.now.max(until);
                return None;
            }
        };
        let (_, entry) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        if let Some(interval) = entry.repeat {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.queue.insert(
                (due + interval, seq),
                Entry {
                    id: entry.id,
                    task: entry.task.clone(),
                    repeat: entry.repeat,
                },
            );
        }
        Some((entry.id, entry.task))
    }

    fn insert(&mut self, due: Millis, task: T, repeat: Option<Millis>) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        self.queue.insert((due, seq), Entry { id, task, repeat });
        id
    }
}

/// Coalesces a burst of events into at most one handler run per interval.
///
/// The first event of a burst arms a timer; events arriving while it is armed
/// are dropped. The handler runs when the timer fires and reads whatever state
/// is current then, so it always sees the latest scroll position.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Millis,
    armed: bool,
}

impl Throttle {
    pub fn new(interval: Millis) -> Self {
        Self {
            interval,
            armed: false,
        }
    }

    /// Register an event. Returns `true` when this event armed the timer.
    pub fn hit<T: Clone>(&mut self, clock: &mut Scheduler<T>, task: T) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        clock.schedule(self.interval, task);
        true
    }

    /// Called by the handler when the armed timer fires.
    pub fn release(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Trailing-edge debounce: only the last event of a burst fires, `delay`
/// after it arrived.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Millis,
    timer: Option<TimerId>,
}

impl Debounce {
    pub fn new(delay: Millis) -> Self {
        Self { delay, timer: None }
    }

    /// Register an event, pushing the deadline back.
    pub fn bounce<T: Clone>(&mut self, clock: &mut Scheduler<T>, task: T) {
        if let Some(previous) = self.timer.take() {
            clock.cancel(previous);
        }
        self.timer = Some(clock.schedule(self.delay, task));
    }

    /// Called by the handler when the timer fires.
    pub fn release(&mut self) {
        self.timer = None;
    }
}
