//! JS-facing widget classes
//!
//! Page templates construct widgets directly, with the same class and method
//! names the inline scripts use:
//!
//! ```js
//! const timer = new CountdownTimer("otpTimer", 300, () => form.reset());
//! timer.start();
//! new ResendOtpButton("resendBtn", 60).setCooldown();
//! new RateLimitHandler().show(900);
//! ```

use js_sys::Function;
use tickdown_core::{CountdownTimer, RateLimitHandler, ResendOtpButton};
use wasm_bindgen::prelude::*;

use crate::current_page;

#[wasm_bindgen(js_name = CountdownTimer)]
pub struct JsCountdownTimer {
    inner: CountdownTimer,
}

#[wasm_bindgen(js_class = CountdownTimer)]
impl JsCountdownTimer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        duration_seconds: Option<u32>,
        on_complete: Option<Function>,
    ) -> JsCountdownTimer {
        let page = current_page();
        let mut timer = match duration_seconds {
            Some(duration) => CountdownTimer::new(&page, element_id, duration),
            None => CountdownTimer::with_default_duration(&page, element_id),
        };

        if let Some(callback) = on_complete {
            timer = timer.on_complete(move || {
                if let Err(err) = callback.call0(&JsValue::NULL) {
                    tracing::warn!(?err, "Countdown completion callback threw");
                }
            });
        }

        Self { inner: timer }
    }

    pub fn start(&self) {
        self.inner.start();
    }

    pub fn stop(&self) {
        self.inner.stop();
    }

    /// `reset()` keeps the duration, `reset(n)` replaces it
    pub fn reset(&self, duration_seconds: Option<u32>) {
        self.inner.reset(duration_seconds);
    }

    #[wasm_bindgen(js_name = getRemaining)]
    pub fn get_remaining(&self) -> u32 {
        self.inner.remaining()
    }

    #[wasm_bindgen(js_name = isExpired)]
    pub fn is_expired(&self) -> bool {
        self.inner.is_expired()
    }
}

#[wasm_bindgen(js_name = ResendOtpButton)]
pub struct JsResendOtpButton {
    inner: ResendOtpButton,
}

#[wasm_bindgen(js_class = ResendOtpButton)]
impl JsResendOtpButton {
    #[wasm_bindgen(constructor)]
    pub fn new(button_id: &str, cooldown_seconds: Option<u32>) -> JsResendOtpButton {
        let page = current_page();
        let inner = match cooldown_seconds {
            Some(cooldown) => ResendOtpButton::new(&page, button_id, cooldown),
            None => ResendOtpButton::with_default_cooldown(&page, button_id),
        };
        Self { inner }
    }

    #[wasm_bindgen(js_name = setCooldown)]
    pub fn set_cooldown(&self) {
        self.inner.set_cooldown();
    }

    pub fn reset(&self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = isCoolingDown)]
    pub fn is_cooling_down(&self) -> bool {
        self.inner.is_cooling_down()
    }
}

#[wasm_bindgen(js_name = RateLimitHandler)]
pub struct JsRateLimitHandler {
    inner: RateLimitHandler,
}

#[wasm_bindgen(js_class = RateLimitHandler)]
impl JsRateLimitHandler {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: Option<String>) -> JsRateLimitHandler {
        let page = current_page();
        let inner = match container_id {
            Some(id) => RateLimitHandler::new(&page, &id),
            None => RateLimitHandler::with_default_container(&page),
        };
        Self { inner }
    }

    pub fn show(&self, retry_after_seconds: Option<u32>) {
        match retry_after_seconds {
            Some(secs) => self.inner.show(secs),
            None => self.inner.show_default(),
        }
    }

    pub fn hide(&self) {
        self.inner.hide();
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }
}
