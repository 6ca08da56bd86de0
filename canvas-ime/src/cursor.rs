//! Keeps the proxy co-located with the host's text cursor.
//!
//! Browsers and IMEs place the candidate window next to the focused element.
//! The proxy is invisible, so parking it on the caret makes that popup show up
//! where the user is typing.

use iced::{Point, Rectangle, Size};

use crate::dom::ProxyElement;
use crate::proxy::CompositionProxy;

/// Where the active text cursor is drawn on the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorHint {
    area: Rectangle,
}

impl CursorHint {
    /// Creates a hint from the caret rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            area: Rectangle::new(Point::new(x, y), Size::new(width, height)),
        }
    }

    /// Top-left corner of the caret.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.area.position()
    }

    /// The full caret rectangle.
    #[must_use]
    pub fn area(&self) -> Rectangle {
        self.area
    }
}

impl From<Rectangle> for CursorHint {
    fn from(area: Rectangle) -> Self {
        Self { area }
    }
}

/// Moves the proxy onto the caret. Only the origin is applied; the proxy
/// keeps its 1×1 size.
pub(crate) fn place<P: ProxyElement>(
    proxy: &CompositionProxy<P>,
    hint: CursorHint,
) {
    log::debug!(
        "moving composition proxy to caret at ({}, {}), {}x{}",
        hint.area.x,
        hint.area.y,
        hint.area.width,
        hint.area.height
    );
    proxy.move_to(hint.origin());
}
