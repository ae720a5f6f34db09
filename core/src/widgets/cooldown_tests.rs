//! Tests for ResendOtpButton

use std::rc::Rc;

use tickdown_types::CooldownConfig;

use super::{ResendOtpButton, cooldown_label};
use crate::page::Page;
use crate::target::RenderTarget;
use crate::testing::{ManualScheduler, MemoryDocument};

const SEND_MARKUP: &str = r#"<i class="fas fa-paper-plane"></i> Resend code"#;

fn setup() -> (MemoryDocument, Rc<ManualScheduler>, Page) {
    let doc = MemoryDocument::new();
    let scheduler = Rc::new(ManualScheduler::new());
    let page = Page::new(Rc::new(doc.clone()), scheduler.clone());
    (doc, scheduler, page)
}

fn wait_label(secs: u32) -> String {
    cooldown_label(secs, &CooldownConfig::default())
}

#[test]
fn test_cooldown_label() {
    assert_eq!(wait_label(59), r#"<i class="fas fa-clock"></i> Wait 0:59"#);
    assert_eq!(wait_label(75), r#"<i class="fas fa-clock"></i> Wait 1:15"#);
}

#[test]
fn test_cooldown_disables_and_counts_down() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 3);
    button.set_cooldown();

    assert!(!element.state().enabled);
    assert!(button.is_cooling_down());
    assert_eq!(element.markup(), wait_label(3));

    scheduler.advance_secs(1);
    assert_eq!(element.markup(), wait_label(2));

    scheduler.advance_secs(1);
    assert_eq!(element.markup(), wait_label(1));
    assert!(!element.state().enabled);

    scheduler.advance_secs(1);
    assert!(element.state().enabled);
    assert_eq!(element.markup(), SEND_MARKUP);
    assert!(!button.is_cooling_down());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_expiry_restores_content_from_cooldown_time() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 2);
    element.set_markup("<b>Send again</b>");
    button.set_cooldown();

    scheduler.advance_secs(2);
    assert_eq!(element.markup(), "<b>Send again</b>");
    assert!(element.state().enabled);
}

#[test]
fn test_reset_restores_construction_text() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 60);
    assert_eq!(button.original_text(), " Resend code");

    element.set_markup("<b>Send again</b>");
    button.set_cooldown();
    scheduler.advance_secs(5);

    button.reset();
    assert!(element.state().enabled);
    assert_eq!(element.text(), " Resend code");
    assert!(!button.is_cooling_down());
    assert_eq!(scheduler.pending(), 0);

    // The cancelled countdown never rewrites the label
    scheduler.advance_secs(120);
    assert_eq!(element.text(), " Resend code");
}

#[test]
fn test_missing_button_is_silent_noop() {
    let (_doc, scheduler, page) = setup();

    let button = ResendOtpButton::new(&page, "absent", 60);
    button.set_cooldown();
    button.reset();

    assert!(!button.is_cooling_down());
    assert_eq!(button.original_text(), "");
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_counter_drifts_when_steps_are_delayed() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 60);
    button.set_cooldown();

    // Ten seconds pass but only one step runs: the counter loses nine seconds
    scheduler.suspend(10_000);
    scheduler.advance(0);
    assert_eq!(element.markup(), wait_label(59));
}

#[test]
fn test_repeat_cooldown_keeps_first_snapshot() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 5);
    button.set_cooldown();
    scheduler.advance_secs(2);

    button.set_cooldown();
    assert_eq!(element.markup(), wait_label(5));
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance_secs(5);
    assert_eq!(element.markup(), SEND_MARKUP);
    assert!(element.state().enabled);
}

#[test]
fn test_zero_cooldown_restores_immediately() {
    let (doc, scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::new(&page, "resend", 0);
    button.set_cooldown();

    assert!(element.state().enabled);
    assert_eq!(element.markup(), SEND_MARKUP);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_default_cooldown() {
    let (doc, _scheduler, page) = setup();
    let element = doc.insert_markup("resend", SEND_MARKUP);

    let button = ResendOtpButton::with_default_cooldown(&page, "resend");
    button.set_cooldown();
    assert_eq!(element.markup(), wait_label(60));
}
