//! Rate-limit banner
//!
//! Shows a "Too Many Attempts" banner at the top of the page with a countdown
//! of the retry-after interval, and hides it when the countdown completes.
//! The banner slot is created on first use; hiding only suppresses its
//! display, the element stays in the document.

use std::cell::RefCell;
use std::rc::Rc;

use tickdown_types::RateLimitConfig;

use crate::page::Page;
use crate::target::Target;

use super::CountdownTimer;

#[derive(Default)]
struct BannerState {
    container: Option<Target>,
    countdown: Option<CountdownTimer>,
    retry_after_secs: u32,
    visible: bool,
}

/// Dismissible banner counting down a retry-after interval.
#[derive(Clone)]
pub struct RateLimitHandler {
    page: Page,
    container_id: String,
    state: Rc<RefCell<BannerState>>,
}

impl RateLimitHandler {
    pub fn new(page: &Page, container_id: &str) -> Self {
        let container = page.document().element(container_id);
        Self {
            page: page.clone(),
            container_id: container_id.to_string(),
            state: Rc::new(RefCell::new(BannerState {
                container,
                ..BannerState::default()
            })),
        }
    }

    /// Bind to the configured banner slot
    pub fn with_default_container(page: &Page) -> Self {
        Self::new(page, &page.config().rate_limit.container_id)
    }

    /// Render the banner and count down `retry_after_secs`.
    ///
    /// Showing again rebuilds the banner and replaces the running countdown.
    pub fn show(&self, retry_after_secs: u32) {
        let config = &self.page.config().rate_limit;

        let (container, previous) = {
            let mut state = self.state.borrow_mut();
            if state.container.is_none() {
                state.container = self.page.document().prepend_to_body(&self.container_id);
            }
            let Some(container) = state.container.clone() else {
                tracing::debug!(container_id = %self.container_id, "Rate-limit banner skipped, no body");
                return;
            };
            (container, state.countdown.take())
        };

        if let Some(previous) = previous {
            previous.stop();
        }

        container.set_markup(&banner_markup(config));
        container.set_visible(true);

        // The countdown holds this handler until `hide()` releases it, so an
        // unowned banner still hides itself.
        let handler = self.clone();
        let countdown = CountdownTimer::new(&self.page, &config.timer_element_id, retry_after_secs)
            .on_complete(move || handler.hide());

        {
            let mut state = self.state.borrow_mut();
            state.retry_after_secs = retry_after_secs;
            state.visible = true;
            state.countdown = Some(countdown.clone());
        }

        tracing::info!(retry_after_secs, "Showing rate-limit banner");
        countdown.start();
    }

    /// Show with the configured default retry-after
    pub fn show_default(&self) {
        self.show(self.page.config().rate_limit.default_retry_after_secs);
    }

    /// Suppress the banner's display and stop its countdown
    pub fn hide(&self) {
        let (container, countdown) = {
            let mut state = self.state.borrow_mut();
            state.visible = false;
            (state.container.clone(), state.countdown.take())
        };

        if let Some(countdown) = countdown {
            countdown.stop();
        }
        if let Some(container) = container {
            container.set_visible(false);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn retry_after(&self) -> u32 {
        self.state.borrow().retry_after_secs
    }

    /// Countdown of the banner currently shown
    pub fn countdown(&self) -> Option<CountdownTimer> {
        self.state.borrow().countdown.clone()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

/// Banner layout rendered into the container
pub fn banner_markup(config: &RateLimitConfig) -> String {
    format!(
        r#"
            <div class="alert alert-danger alert-dismissible fade show" role="alert" id="{alert_id}">
                <div class="mb-3">
                    <i class="fas fa-exclamation-triangle"></i>
                    <strong>Too Many Attempts</strong>
                </div>
                <p class="mb-2">You've exceeded the maximum number of attempts. Please try again in:</p>
                <div class="alert alert-warning" style="font-size: 1.5rem; text-align: center; font-weight: bold;">
                    <span id="{timer_id}">15:00</span>
                </div>
                <small class="text-muted">
                    This is a security measure to protect your account from unauthorized access.
                </small>
                <button type="button" class="btn-close" data-bs-dismiss="alert"></button>
            </div>
        "#,
        alert_id = config.alert_element_id,
        timer_id = config.timer_element_id,
    )
}

impl std::fmt::Debug for RateLimitHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RateLimitHandler")
            .field("container_id", &self.container_id)
            .field("retry_after_secs", &state.retry_after_secs)
            .field("visible", &state.visible)
            .finish()
    }
}
