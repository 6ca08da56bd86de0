//! Element abstractions the bridge drives.
//!
//! The focus arbiter never touches `web_sys` directly. It talks to the render
//! surface and the proxy field through these traits, so the same state machine
//! runs against the browser (`crate::web`) and the in-memory page
//! ([`crate::headless`]).

/// An element that can be asked to take keyboard focus.
///
/// Focus requests are fire-and-forget: an element that cannot take focus
/// (e.g. detached from the document) simply ignores the request.
pub trait Focusable {
    /// Moves keyboard focus to this element.
    fn focus(&self);
}

/// The text field used as the composition proxy.
pub trait ProxyElement: Focusable {
    /// Sets one inline CSS property.
    fn set_style_property(&self, name: &str, value: &str);

    /// Sets one DOM attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Empties the field's value (the pending composition buffer).
    fn clear_value(&self);
}

/// Events the proxy field listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyEvent {
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `compositionend`, carrying the committed text when the platform
    /// provides one.
    CompositionEnd {
        /// Finalized composition text
        data: Option<String>,
    },
}
