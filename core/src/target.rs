//! Renderable targets and document lookups
//!
//! The widgets only ever need a handful of mutations on the element they are
//! bound to. [`RenderTarget`] is that surface; [`Document`] resolves ids to
//! targets. The browser adapter implements both over `web-sys`, the tests over
//! `testing::MemoryDocument`.
//!
//! Methods take `&self`: element handles are shared between a widget and the
//! host, and mutation goes through the host (DOM) or interior mutability.

use std::rc::Rc;

/// An element a widget writes into.
pub trait RenderTarget {
    /// Plain text content of the element
    fn text(&self) -> String;

    /// Inner markup of the element
    fn markup(&self) -> String;

    fn set_text(&self, text: &str);

    /// Replace the inner markup. Elements created by the markup become
    /// resolvable through the owning [`Document`].
    fn set_markup(&self, markup: &str);

    /// Set the CSS foreground color
    fn set_color(&self, color: &str);

    /// Show (`display: block`) or hide (`display: none`) the element
    fn set_visible(&self, visible: bool);

    /// Enable or disable the element, including its disabled visual state
    fn set_enabled(&self, enabled: bool);
}

/// Shared handle to a render target
pub type Target = Rc<dyn RenderTarget>;

/// Element lookup for the current document instance.
pub trait Document {
    /// Resolve an element by id
    fn element(&self, id: &str) -> Option<Target>;

    /// Create an empty block element with `id` and insert it as the first
    /// child of the body. Returns `None` when the document has no body.
    fn prepend_to_body(&self, id: &str) -> Option<Target>;
}
