//! Countdown widgets independent of any particular host
//!
//! The widgets talk to their environment through two capabilities carried by
//! [`Page`]: a [`Document`] that resolves element ids to [`RenderTarget`]s, and
//! a [`Scheduler`] for the host's timers. The browser adapter lives in
//! `tickdown-web`. In-memory doubles live in the `testing` module, built for
//! tests and behind the `testing` feature.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod format;
pub mod page;
pub mod scheduler;
pub mod target;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod widgets;

// Re-exports for convenience
pub use bootstrap::{
    Bootstrapped, MarkupSource, PageSnapshot, RateLimitAlert, TimerMarker, bootstrap,
};
pub use error::ConfigError;
pub use format::{ColorTier, format_clock};
pub use page::Page;
pub use scheduler::{Scheduler, TaskHandle};
pub use target::{Document, RenderTarget, Target};
pub use tickdown_types::WidgetConfig;
pub use widgets::{CountdownTimer, RateLimitHandler, ResendOtpButton};
