//! Countdown timer bound to a page element
//!
//! A `CountdownTimer` renders the seconds remaining as `M:SS` into its element
//! and colors it by urgency. It fires its completion callback once, when the
//! countdown reaches zero.
//!
//! # Lifecycle
//!
//! 1. `new()` resolves the element and records the duration
//! 2. `start()` captures the start time, renders, arms a recurring tick
//! 3. Each tick recomputes remaining from elapsed wall-clock time
//! 4. At zero the tick is disarmed and the callback runs
//!
//! Remaining time is derived from the clock, never decremented, so delayed
//! ticks do not accumulate drift. A host that stops ticking altogether (a
//! backgrounded tab) makes the display jump on resume.

use std::cell::RefCell;
use std::rc::Rc;

use crate::format::{ColorTier, format_clock};
use crate::page::Page;
use crate::scheduler::TaskHandle;
use crate::target::Target;

struct TimerState {
    element_id: String,
    target: Option<Target>,
    duration_secs: u32,
    remaining_secs: u32,
    started_at_ms: Option<u64>,
    tick: Option<TaskHandle>,
    on_complete: Option<Rc<dyn Fn()>>,
}

/// Countdown display bound to one element.
///
/// Cloning yields another handle to the same timer.
#[derive(Clone)]
pub struct CountdownTimer {
    page: Page,
    state: Rc<RefCell<TimerState>>,
}

impl CountdownTimer {
    /// Bind a timer to `element_id`.
    ///
    /// A missing element is not an error: the timer is created, and `start()`
    /// does nothing.
    pub fn new(page: &Page, element_id: &str, duration_secs: u32) -> Self {
        let target = page.document().element(element_id);
        if target.is_none() {
            tracing::debug!(element_id, "Countdown element not found");
        }

        Self {
            page: page.clone(),
            state: Rc::new(RefCell::new(TimerState {
                element_id: element_id.to_string(),
                target,
                duration_secs,
                remaining_secs: duration_secs,
                started_at_ms: None,
                tick: None,
                on_complete: None,
            })),
        }
    }

    /// Bind a timer using the configured default duration
    pub fn with_default_duration(page: &Page, element_id: &str) -> Self {
        Self::new(page, element_id, page.config().countdown.default_duration_secs)
    }

    /// Set the callback invoked when the countdown reaches zero
    pub fn on_complete(self, callback: impl Fn() + 'static) -> Self {
        self.state.borrow_mut().on_complete = Some(Rc::new(callback));
        self
    }

    pub fn start(&self) {
        let scheduler = self.page.scheduler();
        {
            let mut state = self.state.borrow_mut();
            let Some(target) = state.target.clone() else {
                tracing::debug!(element_id = %state.element_id, "Countdown start skipped, no element");
                return;
            };

            // Restarting a running timer replaces its tick.
            if let Some(tick) = state.tick.take() {
                scheduler.cancel(tick);
            }

            state.started_at_ms = Some(scheduler.now_ms());
            state.remaining_secs = state.duration_secs;
            self.render(&target, state.remaining_secs);
        }

        let timer = self.clone();
        let interval_ms = self.page.config().countdown.tick_interval_ms;
        let tick = scheduler.every(interval_ms, Box::new(move || timer.tick()));
        self.state.borrow_mut().tick = Some(tick);
    }

    /// Disarm the tick. Safe to call repeatedly and after expiry.
    pub fn stop(&self) {
        let tick = self.state.borrow_mut().tick.take();
        if let Some(tick) = tick {
            self.page.scheduler().cancel(tick);
        }
    }

    /// Stop, optionally replace the duration, and start again
    pub fn reset(&self, duration_secs: Option<u32>) {
        self.stop();
        {
            let mut state = self.state.borrow_mut();
            if let Some(duration_secs) = duration_secs {
                state.duration_secs = duration_secs;
            }
            state.remaining_secs = state.duration_secs;
        }
        self.start();
    }

    pub fn remaining(&self) -> u32 {
        self.state.borrow().remaining_secs
    }

    pub fn duration(&self) -> u32 {
        self.state.borrow().duration_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// Whether a tick is currently armed
    pub fn is_running(&self) -> bool {
        self.state.borrow().tick.is_some()
    }

    fn tick(&self) {
        let (finished, callback) = {
            let mut state = self.state.borrow_mut();
            // A stopped timer ignores ticks the host had already queued.
            if state.tick.is_none() {
                return;
            }
            let (Some(target), Some(started_at_ms)) = (state.target.clone(), state.started_at_ms)
            else {
                return;
            };

            let elapsed_secs = self.page.scheduler().now_ms().saturating_sub(started_at_ms) / 1000;
            let remaining = u64::from(state.duration_secs).saturating_sub(elapsed_secs);
            state.remaining_secs = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.render(&target, state.remaining_secs);

            (state.remaining_secs == 0, state.on_complete.clone())
        };

        if finished {
            self.stop();
            tracing::debug!(element_id = %self.state.borrow().element_id, "Countdown expired");
            if let Some(callback) = callback {
                callback();
            }
        }
    }

    fn render(&self, target: &Target, remaining_secs: u32) {
        let config = &self.page.config().countdown;
        let tier = ColorTier::for_remaining(remaining_secs, config);
        target.set_text(&format_clock(remaining_secs));
        target.set_color(tier.color(&config.colors));
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CountdownTimer")
            .field("element_id", &state.element_id)
            .field("duration_secs", &state.duration_secs)
            .field("remaining_secs", &state.remaining_secs)
            .field("running", &state.tick.is_some())
            .finish()
    }
}
