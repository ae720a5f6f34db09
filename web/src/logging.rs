//! Console logging for the wasm build.
//!
//! Routes `tracing` events to the browser console through `dioxus-logger`.
//! Debug builds log at DEBUG so missing-element no-ops show up while a page is
//! being wired; release builds log at INFO.

use dioxus_logger::tracing::Level;

pub fn init() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // A host page that already installed a subscriber keeps its own.
    if let Err(err) = dioxus_logger::init(level) {
        web_sys::console::warn_1(&format!("tickdown logging not initialized: {err}").into());
    }
}
