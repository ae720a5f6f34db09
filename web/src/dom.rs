//! DOM adapter
//!
//! Binds the core `Document` / `RenderTarget` capabilities to `web-sys`
//! elements, and exposes the declarative markup as a `MarkupSource`.

use std::rc::Rc;

use tickdown_core::{Document, MarkupSource, RenderTarget, Target};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// A page element widgets render into.
pub struct DomTarget {
    element: HtmlElement,
}

impl DomTarget {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(property, value) {
            tracing::debug!(property, ?err, "Failed to set style");
        }
    }
}

impl RenderTarget for DomTarget {
    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn markup(&self) -> String {
        self.element.inner_html()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_markup(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn set_color(&self, color: &str) {
        self.set_style("color", color);
    }

    fn set_visible(&self, visible: bool) {
        self.set_style("display", if visible { "block" } else { "none" });
    }

    fn set_enabled(&self, enabled: bool) {
        if let Err(err) = self.element.toggle_attribute_with_force("disabled", !enabled) {
            tracing::debug!(enabled, ?err, "Failed to toggle disabled attribute");
        }
        if let Err(err) = self.element.class_list().toggle_with_force("disabled", !enabled) {
            tracing::debug!(enabled, ?err, "Failed to toggle disabled class");
        }
        self.set_style("opacity", if enabled { "1" } else { "0.6" });
    }
}

/// The window's document.
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Document of the global window, if running in a browser page
    pub fn from_window() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }

    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for BrowserDocument {
    fn element(&self, id: &str) -> Option<Target> {
        let element = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Rc::new(DomTarget::new(element)))
    }

    fn prepend_to_body(&self, id: &str) -> Option<Target> {
        let body = self.document.body()?;
        let element = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        element.set_id(id);
        body.insert_before(&element, body.first_child().as_ref()).ok()?;
        Some(Rc::new(DomTarget::new(element)))
    }
}

impl MarkupSource for BrowserDocument {
    type Element = Element;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<Element> {
        let selector = format!("[{attribute}]");
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::warn!(%selector, ?err, "Marker query failed");
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn id_of(&self, element: &Element) -> String {
        element.id()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use tickdown_core::{PageSnapshot, RateLimitAlert, TimerMarker, WidgetConfig};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> BrowserDocument {
        BrowserDocument::from_window().unwrap()
    }

    /// Mount `html` in a fresh holder at the end of the body
    fn mount(document: &BrowserDocument, html: &str) -> Element {
        let holder = document.raw().create_element("div").unwrap();
        holder.set_inner_html(html);
        document.raw().body().unwrap().append_child(&holder).unwrap();
        holder
    }

    fn marker(id: &str, duration: Option<&str>) -> TimerMarker {
        TimerMarker {
            element_id: id.to_string(),
            duration: duration.map(str::to_string),
        }
    }

    #[wasm_bindgen_test]
    fn read_timer_markers() {
        let document = document();
        let config = WidgetConfig::default();
        let holder = mount(
            &document,
            r#"<span id="otp" data-timer data-duration="120"></span>
               <span data-timer data-duration="30"></span>
               <span id="session" data-timer></span>
               <span id="other" data-duration="45"></span>"#,
        );

        let snapshot = PageSnapshot::read(&document, &config.markup, &config.rate_limit);
        holder.remove();

        assert_eq!(
            snapshot.timers,
            vec![
                marker("otp", Some("120")),
                marker("", Some("30")),
                marker("session", None),
            ]
        );
        assert!(snapshot.rate_limit_alert.is_none());
    }

    #[wasm_bindgen_test]
    fn read_rate_limit_alert() {
        let document = document();
        let config = WidgetConfig::default();

        let holder = mount(&document, r#"<div id="rateLimitAlert"></div>"#);
        let without = PageSnapshot::read(&document, &config.markup, &config.rate_limit);
        holder.remove();

        let holder = mount(&document, r#"<div id="rateLimitAlert" data-retry-after="600"></div>"#);
        let with = PageSnapshot::read(&document, &config.markup, &config.rate_limit);
        holder.remove();

        assert_eq!(without.rate_limit_alert, Some(RateLimitAlert { retry_after: None }));
        assert_eq!(
            with.rate_limit_alert,
            Some(RateLimitAlert {
                retry_after: Some("600".to_string()),
            })
        );
    }

    #[wasm_bindgen_test]
    fn set_enabled_toggles_attribute_and_class() {
        let document = document();
        let holder = mount(&document, r#"<button id="resend">Send</button>"#);
        let target = document.element("resend").unwrap();
        let button = document.raw().get_element_by_id("resend").unwrap();

        target.set_enabled(false);
        let disabled = (button.has_attribute("disabled"), button.class_list().contains("disabled"));
        target.set_enabled(true);
        let enabled = (button.has_attribute("disabled"), button.class_list().contains("disabled"));
        holder.remove();

        assert_eq!(disabled, (true, true));
        assert_eq!(enabled, (false, false));
    }

    #[wasm_bindgen_test]
    fn prepend_to_body_inserts_first_child() {
        let document = document();
        assert!(document.prepend_to_body("prepended").is_some());
        let body = document.raw().body().unwrap();
        let first_id = body
            .first_element_child()
            .map(|element| element.id())
            .unwrap_or_default();
        if let Some(element) = document.raw().get_element_by_id("prepended") {
            element.remove();
        }

        assert_eq!(first_id, "prepended");
    }
}
