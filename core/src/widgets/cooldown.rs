//! Resend button with cooldown
//!
//! While cooling down the button is disabled and shows `Wait M:SS` behind a
//! clock icon. Each step re-arms a one-shot callback and decrements a plain
//! counter, so a host that delays callbacks stretches the cooldown.
//!
//! Two restore paths exist and are deliberately different:
//! - cooldown expiry restores the content the button had when
//!   `set_cooldown()` was called
//! - `reset()` restores the text the button had when it was constructed

use std::cell::RefCell;
use std::rc::Rc;

use tickdown_types::CooldownConfig;

use crate::format::format_clock;
use crate::page::Page;
use crate::scheduler::TaskHandle;
use crate::target::Target;

struct CooldownState {
    button_id: String,
    button: Option<Target>,
    cooldown_secs: u32,
    /// Text content captured at construction
    original_text: String,
    remaining_secs: u32,
    /// Inner content captured by `set_cooldown()`, present while cooling down
    restore_markup: Option<String>,
    pending: Option<TaskHandle>,
}

/// Resend button that disables itself for a cooldown period.
#[derive(Clone)]
pub struct ResendOtpButton {
    page: Page,
    state: Rc<RefCell<CooldownState>>,
}

impl ResendOtpButton {
    pub fn new(page: &Page, button_id: &str, cooldown_secs: u32) -> Self {
        let button = page.document().element(button_id);
        let original_text = match &button {
            Some(button) => button.text(),
            None => {
                tracing::debug!(button_id, "Resend button not found");
                String::new()
            }
        };

        Self {
            page: page.clone(),
            state: Rc::new(RefCell::new(CooldownState {
                button_id: button_id.to_string(),
                button,
                cooldown_secs,
                original_text,
                remaining_secs: 0,
                restore_markup: None,
                pending: None,
            })),
        }
    }

    /// Bind a button using the configured default cooldown
    pub fn with_default_cooldown(page: &Page, button_id: &str) -> Self {
        Self::new(page, button_id, page.config().cooldown.default_cooldown_secs)
    }

    /// Disable the button and count down the cooldown.
    ///
    /// Calling again mid-cooldown restarts the count but keeps the content
    /// captured by the first call, so expiry never restores a `Wait` label.
    pub fn set_cooldown(&self) {
        {
            let mut state = self.state.borrow_mut();
            let Some(button) = state.button.clone() else {
                tracing::debug!(button_id = %state.button_id, "Cooldown skipped, no button");
                return;
            };

            if let Some(pending) = state.pending.take() {
                self.page.scheduler().cancel(pending);
            }

            button.set_enabled(false);
            if state.restore_markup.is_none() {
                state.restore_markup = Some(button.markup());
            }
            state.remaining_secs = state.cooldown_secs;
        }

        self.step();
    }

    /// Re-enable the button with its construction-time text
    pub fn reset(&self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            let Some(button) = state.button.clone() else {
                return;
            };
            button.set_enabled(true);
            button.set_text(&state.original_text);
            state.restore_markup = None;
            state.remaining_secs = 0;
            state.pending.take()
        };

        if let Some(pending) = pending {
            self.page.scheduler().cancel(pending);
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        self.state.borrow().restore_markup.is_some()
    }

    /// Seconds the counter will show on its next step
    pub fn remaining(&self) -> u32 {
        self.state.borrow().remaining_secs
    }

    /// Text captured at construction
    pub fn original_text(&self) -> String {
        self.state.borrow().original_text.clone()
    }

    fn step(&self) {
        let config = &self.page.config().cooldown;
        let rearm = {
            let mut state = self.state.borrow_mut();
            let Some(button) = state.button.clone() else {
                return;
            };

            button.set_markup(&cooldown_label(state.remaining_secs, config));

            if state.remaining_secs > 0 {
                state.remaining_secs -= 1;
                true
            } else {
                button.set_enabled(true);
                if let Some(markup) = state.restore_markup.take() {
                    button.set_markup(&markup);
                }
                state.pending = None;
                tracing::debug!(button_id = %state.button_id, "Cooldown finished");
                false
            }
        };

        if rearm {
            let button = self.clone();
            let pending = self
                .page
                .scheduler()
                .after(config.tick_interval_ms, Box::new(move || button.step()));
            self.state.borrow_mut().pending = Some(pending);
        }
    }
}

/// Button content while cooling down, e.g. `<i class="fas fa-clock"></i> Wait 0:59`
pub fn cooldown_label(remaining_secs: u32, config: &CooldownConfig) -> String {
    format!(
        r#"<i class="{}"></i> {} {}"#,
        config.icon_class,
        config.label_prefix,
        format_clock(remaining_secs)
    )
}

impl std::fmt::Debug for ResendOtpButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ResendOtpButton")
            .field("button_id", &state.button_id)
            .field("cooldown_secs", &state.cooldown_secs)
            .field("remaining_secs", &state.remaining_secs)
            .field("cooling_down", &state.restore_markup.is_some())
            .finish()
    }
}
