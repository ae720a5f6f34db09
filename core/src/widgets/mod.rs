//! Countdown widgets
//!
//! This module provides:
//! - **CountdownTimer**: `M:SS` countdown with urgency colors and a completion hook
//! - **ResendOtpButton**: button disabled for a cooldown, showing `Wait M:SS`
//! - **RateLimitHandler**: banner counting down a retry-after interval
//!
//! Every widget treats a missing element as a silent no-op, so pages can
//! construct widgets before (or without) the markup they bind to.

mod cooldown;
mod countdown;
mod rate_limit;

#[cfg(test)]
mod cooldown_tests;

pub use cooldown::{ResendOtpButton, cooldown_label};
pub use countdown::CountdownTimer;
pub use rate_limit::{RateLimitHandler, banner_markup};
