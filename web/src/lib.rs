//! Browser bindings for tickdown widgets
//!
//! Loading the wasm module initializes console logging and bootstraps the page
//! once its content is parsed: every `[data-timer]` element starts counting
//! down, and a server-rendered `#rateLimitAlert` brings up the rate-limit
//! banner. The widget classes in [`bindings`] are exported for page scripts.
//!
//! Configuration is read from an optional inline JSON block:
//!
//! ```html
//! <script type="application/json" id="tickdown-config">
//!   { "cooldown": { "label_prefix": "Retry in" } }
//! </script>
//! ```

pub mod bindings;
mod dom;
mod logging;
mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use tickdown_core::{Page, PageSnapshot, WidgetConfig, bootstrap};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub use dom::{BrowserDocument, DomTarget};
pub use scheduler::BrowserScheduler;

/// Id of the inline JSON configuration block
pub const CONFIG_ELEMENT_ID: &str = "tickdown-config";

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Page context shared by every widget created from JS.
///
/// Built on first use from the window's document and the inline config.
pub fn current_page() -> Page {
    PAGE.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| {
                let document = BrowserDocument::from_window();
                let config = document
                    .as_ref()
                    .map(read_inline_config)
                    .unwrap_or_default();
                build_page(document, config)
            })
            .clone()
    })
}

fn build_page(document: Option<BrowserDocument>, config: WidgetConfig) -> Page {
    let document: Rc<dyn tickdown_core::Document> = match document {
        Some(document) => Rc::new(document),
        None => Rc::new(NoDocument),
    };
    Page::with_config(document, Rc::new(BrowserScheduler::new()), config)
}

/// Stand-in when the module runs without a window (e.g. inside a worker)
struct NoDocument;

impl tickdown_core::Document for NoDocument {
    fn element(&self, _id: &str) -> Option<tickdown_core::Target> {
        None
    }

    fn prepend_to_body(&self, _id: &str) -> Option<tickdown_core::Target> {
        None
    }
}

/// Parse the inline config block, falling back to defaults on any problem
fn read_inline_config(document: &BrowserDocument) -> WidgetConfig {
    let Some(source) = document
        .raw()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return WidgetConfig::default();
    };

    let parsed = match js_sys::JSON::parse(&source) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(?err, "Inline config is not valid JSON, using defaults");
            return WidgetConfig::default();
        }
    };

    let config: WidgetConfig = match serde_wasm_bindgen::from_value(parsed) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "Inline config has the wrong shape, using defaults");
            return WidgetConfig::default();
        }
    };

    match tickdown_core::config::validate(&config) {
        Ok(()) => config,
        Err(err) => {
            tracing::warn!(%err, "Inline config rejected, using defaults");
            WidgetConfig::default()
        }
    }
}

/// Run the page bootstrap against the live document
fn run_bootstrap() {
    let page = current_page();
    let Some(document) = BrowserDocument::from_window() else {
        tracing::debug!("No document, skipping bootstrap");
        return;
    };

    let config = page.config();
    let snapshot = PageSnapshot::read(&document, &config.markup, &config.rate_limit);
    // Armed widgets are owned by the scheduler from here on.
    let _ = bootstrap(&page, &snapshot);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Ok(());
    };

    if document.ready_state() == "loading" {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        let listener = Closure::once_into_js(run_bootstrap);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            listener.unchecked_ref(),
            &options,
        )?;
    } else {
        run_bootstrap();
    }

    Ok(())
}
