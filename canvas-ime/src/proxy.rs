//! The invisible text field that receives IME composition on behalf of the
//! render surface.

use iced::Point;
use std::cell::Cell;

use crate::config::ImeConfig;
use crate::dom::ProxyElement;
use crate::i18n::Translations;

/// Inline styles that hide the proxy while keeping it focusable.
///
/// The field must stay rendered: elements with `display: none` or
/// `visibility: hidden` cannot take focus, so it is shrunk to 1×1 and made
/// transparent instead.
pub const PROXY_STYLE: &[(&str, &str)] = &[
    ("background-color", "transparent"),
    ("border", "none"),
    ("outline", "none"),
    ("width", "1px"),
    ("height", "1px"),
    ("caret-color", "transparent"),
    ("position", "absolute"),
    ("left", "0px"),
    ("top", "0px"),
];

/// Owns the proxy element and its on-screen position.
pub struct CompositionProxy<P> {
    element: P,
    position: Cell<Point>,
}

impl<P: ProxyElement> CompositionProxy<P> {
    /// Styles and labels `element` so it can serve as the proxy.
    pub fn mount(element: P, config: &ImeConfig) -> Self {
        for (name, value) in PROXY_STYLE {
            element.set_style_property(name, value);
        }

        let label = Translations::new(config.language).proxy_label();
        element.set_attribute("id", &config.proxy_id);
        element.set_attribute("aria-label", &label);
        element.set_attribute("autocomplete", "off");
        element.set_attribute("spellcheck", "false");

        Self {
            element,
            position: Cell::new(Point::ORIGIN),
        }
    }

    /// The underlying element.
    pub fn element(&self) -> &P {
        &self.element
    }

    /// Current top-left corner, in surface coordinates.
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// Moves the top-left corner to `point`. Values are not clamped.
    pub fn move_to(&self, point: Point) {
        self.element
            .set_style_property("left", &format!("{}px", point.x));
        self.element.set_style_property("top", &format!("{}px", point.y));
        self.position.set(point);
    }

    pub(crate) fn focus(&self) {
        self.element.focus();
    }

    /// Empties the field so stale text cannot leak into the next
    /// composition session.
    pub(crate) fn clear(&self) {
        self.element.clear_value();
    }
}
