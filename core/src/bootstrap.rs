//! Page-load bootstrap
//!
//! Runs once per document: starts every declaratively marked timer and shows
//! the rate-limit banner when the server rendered the page in a rate-limited
//! state. The host exposes its markup through [`MarkupSource`] and
//! [`PageSnapshot::read`] collects the relevant attributes; [`bootstrap`] only
//! sees the snapshot.

use tickdown_types::{MarkupConfig, RateLimitConfig};

use crate::page::Page;
use crate::widgets::{CountdownTimer, RateLimitHandler};

/// Read access to the attributes of a loaded document.
pub trait MarkupSource {
    type Element;

    /// Elements carrying `attribute`, in document order
    fn elements_with_attribute(&self, attribute: &str) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Id of `element`, empty when it has none
    fn id_of(&self, element: &Self::Element) -> String;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
}

/// An element carrying the timer marker attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerMarker {
    pub element_id: String,
    /// Raw duration attribute, if present
    pub duration: Option<String>,
}

/// A pre-rendered rate-limit alert
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitAlert {
    /// Raw retry-after attribute, if present
    pub retry_after: Option<String>,
}

/// Attribute state of the document at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub timers: Vec<TimerMarker>,
    pub rate_limit_alert: Option<RateLimitAlert>,
}

impl PageSnapshot {
    /// Collect the timer markers and the pre-rendered rate-limit alert.
    pub fn read<S: MarkupSource>(
        source: &S,
        markup: &MarkupConfig,
        rate_limit: &RateLimitConfig,
    ) -> Self {
        let timers = source
            .elements_with_attribute(&markup.timer_attribute)
            .iter()
            .map(|element| TimerMarker {
                element_id: source.id_of(element),
                duration: source.attribute(element, &markup.duration_attribute),
            })
            .collect();

        let rate_limit_alert = source
            .element_by_id(&rate_limit.alert_element_id)
            .map(|alert| RateLimitAlert {
                retry_after: source.attribute(&alert, &markup.retry_after_attribute),
            });

        Self {
            timers,
            rate_limit_alert,
        }
    }
}

/// Widgets started by [`bootstrap`].
///
/// Dropping this does not stop anything: armed widgets are kept alive by the
/// scheduler until they finish.
#[derive(Debug, Default)]
pub struct Bootstrapped {
    pub timers: Vec<CountdownTimer>,
    pub rate_limit: Option<RateLimitHandler>,
}

/// Start declared timers and show the rate-limit banner if the page asks for it.
pub fn bootstrap(page: &Page, snapshot: &PageSnapshot) -> Bootstrapped {
    let config = page.config();

    let timers: Vec<CountdownTimer> = snapshot
        .timers
        .iter()
        .map(|marker| {
            // A zero duration counts as missing, like an absent attribute.
            let duration = marker
                .duration
                .as_deref()
                .and_then(parse_seconds)
                .filter(|secs| *secs > 0)
                .unwrap_or_else(|| {
                    if marker.duration.is_some() {
                        tracing::warn!(
                            element_id = %marker.element_id,
                            raw = ?marker.duration,
                            "Invalid timer duration, using default"
                        );
                    }
                    config.countdown.default_duration_secs
                });

            let timer = CountdownTimer::new(page, &marker.element_id, duration);
            timer.start();
            timer
        })
        .collect();

    let rate_limit = snapshot.rate_limit_alert.as_ref().map(|alert| {
        let retry_after = alert
            .retry_after
            .as_deref()
            .and_then(parse_seconds)
            .unwrap_or(config.rate_limit.default_retry_after_secs);

        let handler = RateLimitHandler::with_default_container(page);
        handler.show(retry_after);
        handler
    });

    tracing::info!(
        timers = timers.len(),
        rate_limited = rate_limit.is_some(),
        "Bootstrapped page widgets"
    );

    Bootstrapped { timers, rate_limit }
}

/// Parse a seconds attribute the way `parseInt` reads it: leading whitespace
/// and a `+` sign are accepted, parsing stops at the first non-digit.
///
/// Unlike `parseInt`, values past `u32::MAX` are capped at `u32::MAX` instead
/// of kept in full. Returns `None` for empty, non-numeric or negative input.
pub fn parse_seconds(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return None;
    }
    // Saturate rather than reject absurdly large values
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::target::RenderTarget;
    use crate::testing::{ManualScheduler, MemoryDocument};

    fn setup() -> (MemoryDocument, Rc<ManualScheduler>, Page) {
        let doc = MemoryDocument::new();
        let scheduler = Rc::new(ManualScheduler::new());
        let page = Page::new(Rc::new(doc.clone()), scheduler.clone());
        (doc, scheduler, page)
    }

    fn marker(id: &str, duration: Option<&str>) -> TimerMarker {
        TimerMarker {
            element_id: id.to_string(),
            duration: duration.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("300"), Some(300));
        assert_eq!(parse_seconds("  45"), Some(45));
        assert_eq!(parse_seconds("+12"), Some(12));
        assert_eq!(parse_seconds("120s"), Some(120));
        assert_eq!(parse_seconds("7.9"), Some(7));
        assert_eq!(parse_seconds("0"), Some(0));
        assert_eq!(parse_seconds(""), None);
        assert_eq!(parse_seconds("abc"), None);
        assert_eq!(parse_seconds("-5"), None);
        assert_eq!(parse_seconds("99999999999"), Some(u32::MAX));
    }

    #[test]
    fn test_bootstrap_starts_marked_timers() {
        let (doc, scheduler, page) = setup();
        doc.insert("otp", "");
        doc.insert("session", "");
        doc.insert("fallback", "");
        doc.insert("zero", "");

        let snapshot = PageSnapshot {
            timers: vec![
                marker("otp", Some("120")),
                marker("session", None),
                marker("fallback", Some("soon")),
                marker("zero", Some("0")),
            ],
            rate_limit_alert: None,
        };
        let started = bootstrap(&page, &snapshot);

        assert_eq!(started.timers.len(), 4);
        assert!(started.rate_limit.is_none());
        let text = |id: &str| doc.get(id).map(|el| el.text()).unwrap_or_default();
        assert_eq!(text("otp"), "2:00");
        assert_eq!(text("session"), "5:00");
        assert_eq!(text("fallback"), "5:00");
        assert_eq!(text("zero"), "5:00");
        assert_eq!(scheduler.pending(), 4);
    }

    #[test]
    fn test_bootstrap_skips_timers_without_element() {
        let (_doc, scheduler, page) = setup();

        let snapshot = PageSnapshot {
            timers: vec![marker("", Some("60")), marker("gone", Some("60"))],
            rate_limit_alert: None,
        };
        let started = bootstrap(&page, &snapshot);

        assert_eq!(started.timers.len(), 2);
        assert!(started.timers.iter().all(|timer| !timer.is_running()));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_bootstrap_timers_have_no_completion_hook() {
        let (doc, scheduler, page) = setup();
        doc.insert("otp", "");

        let snapshot = PageSnapshot {
            timers: vec![marker("otp", Some("2"))],
            rate_limit_alert: None,
        };
        let started = bootstrap(&page, &snapshot);
        drop(started);

        scheduler.advance_secs(2);
        assert_eq!(doc.get("otp").map(|el| el.text()).as_deref(), Some("0:00"));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_bootstrap_shows_rate_limit_banner() {
        let (doc, _scheduler, page) = setup();

        let snapshot = PageSnapshot {
            timers: Vec::new(),
            rate_limit_alert: Some(RateLimitAlert {
                retry_after: Some("600".to_string()),
            }),
        };
        let started = bootstrap(&page, &snapshot);

        let handler = started.rate_limit.expect("banner shown");
        assert!(handler.is_visible());
        assert_eq!(handler.retry_after(), 600);
        assert_eq!(doc.get("rateLimitTimer").map(|el| el.text()).as_deref(), Some("10:00"));
    }

    #[test]
    fn test_bootstrap_retry_after_defaults() {
        let (_doc, _scheduler, page) = setup();

        for raw in [None, Some("later")] {
            let snapshot = PageSnapshot {
                timers: Vec::new(),
                rate_limit_alert: Some(RateLimitAlert {
                    retry_after: raw.map(str::to_string),
                }),
            };
            let started = bootstrap(&page, &snapshot);
            assert_eq!(started.rate_limit.map(|handler| handler.retry_after()), Some(900));
        }
    }

    #[test]
    fn test_read_collects_timer_markers() {
        let (doc, _scheduler, page) = setup();
        let markup = &page.config().markup;

        let otp = doc.insert("otp", "");
        otp.set_attribute("data-timer", "");
        otp.set_attribute("data-duration", "120");
        doc.insert("session", "").set_attribute("data-timer", "");
        doc.insert_anonymous("").set_attribute("data-timer", "");
        doc.insert("other", "").set_attribute("data-duration", "30");

        let snapshot = PageSnapshot::read(&doc, markup, &page.config().rate_limit);

        assert_eq!(
            snapshot.timers,
            vec![
                marker("otp", Some("120")),
                marker("session", None),
                marker("", None),
            ]
        );
        assert!(snapshot.rate_limit_alert.is_none());
    }

    #[test]
    fn test_read_rate_limit_alert() {
        let (doc, _scheduler, page) = setup();
        let config = page.config();

        let alert = doc.insert("rateLimitAlert", "");
        let snapshot = PageSnapshot::read(&doc, &config.markup, &config.rate_limit);
        assert_eq!(snapshot.rate_limit_alert, Some(RateLimitAlert { retry_after: None }));

        alert.set_attribute("data-retry-after", "600");
        let snapshot = PageSnapshot::read(&doc, &config.markup, &config.rate_limit);
        assert_eq!(
            snapshot.rate_limit_alert,
            Some(RateLimitAlert {
                retry_after: Some("600".to_string()),
            })
        );
    }

    #[test]
    fn test_read_then_bootstrap_marked_page() {
        let (doc, scheduler, page) = setup();
        let config = page.config();

        let otp = doc.insert("otp", "");
        otp.set_attribute("data-timer", "");
        otp.set_attribute("data-duration", "90");
        doc.insert_anonymous("").set_attribute("data-timer", "");
        doc.insert("rateLimitAlert", "");

        let snapshot = PageSnapshot::read(&doc, &config.markup, &config.rate_limit);
        let started = bootstrap(&page, &snapshot);

        assert_eq!(started.timers.len(), 2);
        assert!(started.timers[0].is_running());
        assert!(!started.timers[1].is_running());
        assert_eq!(otp.text(), "1:30");

        let handler = started.rate_limit.expect("banner shown");
        assert_eq!(handler.retry_after(), 900);
        assert_eq!(doc.get("rateLimitTimer").map(|el| el.text()).as_deref(), Some("15:00"));
        // One tick for the timer, one for the banner countdown
        assert_eq!(scheduler.pending(), 2);
    }

    #[test]
    fn test_bootstrap_empty_page() {
        let (doc, scheduler, page) = setup();

        let started = bootstrap(&page, &PageSnapshot::default());

        assert!(started.timers.is_empty());
        assert!(started.rate_limit.is_none());
        assert!(doc.body_prefix().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }
}
