//! Shared configuration types for tickdown
//!
//! This crate contains serializable configuration types that are shared between
//! the host-independent widget logic (tickdown-core) and the WASM adapter
//! (tickdown-web).
//!
//! Every field carries a serde default, so an empty TOML document or an empty JS
//! object deserializes into the stock widget behavior.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Top-level config
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for every widget on a page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub countdown: CountdownConfig,
    pub cooldown: CooldownConfig,
    pub rate_limit: RateLimitConfig,
    pub markup: MarkupConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// Countdown
// ─────────────────────────────────────────────────────────────────────────────

/// Countdown timer behavior and color tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Duration used when none is supplied (seconds)
    pub default_duration_secs: u32,
    /// Period of the recurring tick (milliseconds)
    pub tick_interval_ms: u32,
    /// At or below this many seconds the display is urgent
    pub urgent_threshold_secs: u32,
    /// At or below this many seconds the display is a warning
    pub warning_threshold_secs: u32,
    pub colors: TierColors,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: 300,
            tick_interval_ms: 1000,
            urgent_threshold_secs: 60,
            warning_threshold_secs: 120,
            colors: TierColors::default(),
        }
    }
}

/// CSS colors applied per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierColors {
    pub urgent: String,
    pub warning: String,
    pub ok: String,
}

impl Default for TierColors {
    fn default() -> Self {
        Self {
            urgent: "#dc3545".to_string(),
            warning: "#ff6c00".to_string(),
            ok: "#28a745".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resend cooldown
// ─────────────────────────────────────────────────────────────────────────────

/// Resend button cooldown behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    pub default_cooldown_secs: u32,
    pub tick_interval_ms: u32,
    /// Text shown before the remaining time, e.g. "Wait 0:59"
    pub label_prefix: String,
    /// CSS class list of the icon rendered in front of the label
    pub icon_class: String,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            default_cooldown_secs: 60,
            tick_interval_ms: 1000,
            label_prefix: "Wait".to_string(),
            icon_class: "fas fa-clock".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate limit banner
// ─────────────────────────────────────────────────────────────────────────────

/// Element ids and defaults used by the rate-limit banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Slot the banner is rendered into (created at the top of the body if absent)
    pub container_id: String,
    /// Countdown field nested inside the banner
    pub timer_element_id: String,
    /// Pre-rendered alert that triggers the banner on page load
    pub alert_element_id: String,
    pub default_retry_after_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            container_id: "rateLimitMessage".to_string(),
            timer_element_id: "rateLimitTimer".to_string(),
            alert_element_id: "rateLimitAlert".to_string(),
            default_retry_after_secs: 900,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Declarative markup
// ─────────────────────────────────────────────────────────────────────────────

/// Attribute names read from the page during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Boolean marker for auto-started timers
    pub timer_attribute: String,
    pub duration_attribute: String,
    pub retry_after_attribute: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            timer_attribute: "data-timer".to_string(),
            duration_attribute: "data-duration".to_string(),
            retry_after_attribute: "data-retry-after".to_string(),
        }
    }
}
