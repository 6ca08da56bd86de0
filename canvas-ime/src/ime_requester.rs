//! iced integration: forwards a widget tree's IME requests to the bridge.

use iced::advanced::input_method::{self, InputMethod};
use iced::advanced::widget::{Widget, tree};
use iced::advanced::{Clipboard, Layout, Renderer, Shell, layout, overlay};
use iced::{
    Element, Event, Length, Point, Rectangle, Size, Vector, mouse, window,
};
use std::rc::Rc;

use crate::control::ImeControl;

/// Applies one iced input method request to the bridge.
///
/// `Enabled` enters composition mode (only if not already composing, so the
/// proxy is not refocused every frame) and parks the proxy on the caret.
/// `Disabled` leaves composition mode if it is active. `cursor` must already
/// be in surface coordinates.
pub fn apply_input_method<T>(control: &dyn ImeControl, ime: &InputMethod<T>) {
    match ime {
        InputMethod::Enabled { cursor, .. } => {
            if !control.is_inputting() {
                control.set_composition_mode(true);
            }
            control.set_ime_cursor(
                cursor.x,
                cursor.y,
                cursor.width,
                cursor.height,
            );
        }
        InputMethod::Disabled => {
            if control.is_inputting() {
                control.set_composition_mode(false);
            }
        }
    }
}

/// An invisible widget that keeps the bridge in sync with an editor.
///
/// It lays out to zero size and draws nothing; it exists only to push the
/// editor's IME state to the bridge on every redraw. Stack it on top of the
/// editor:
///
/// ```no_run
/// use canvas_ime::{ImeControl, ImeRequester};
/// use iced::widget::Stack;
/// use iced::{Element, Point, Rectangle, Size};
/// use std::rc::Rc;
///
/// fn with_ime<'a, Message: 'a>(
///     editor: Element<'a, Message>,
///     bridge: &Rc<dyn ImeControl>,
///     focused: bool,
///     caret: Point,
/// ) -> Element<'a, Message> {
///     let caret = Rectangle::new(caret, Size::new(2.0, 18.0));
///
///     Stack::new()
///         .push(editor)
///         .push(ImeRequester::new(Rc::clone(bridge), focused, caret))
///         .into()
/// }
/// ```
#[derive(Clone)]
pub struct ImeRequester {
    // Bridge to drive
    control: Rc<dyn ImeControl>,

    // Whether composition should be active
    // Logic: true only while the owning editor is focused.
    enabled: bool,

    // Caret rectangle, relative to the widget
    // Purpose: the proxy is parked here so the IME candidate window opens
    // next to the caret instead of at the page origin.
    cursor: Rectangle,
}

impl ImeRequester {
    /// Creates a new IME requester widget.
    ///
    /// # Arguments
    ///
    /// * `control` - The bridge that owns the proxy field.
    /// * `enabled` - Whether composition should be active (usually true
    ///   when the editor is focused).
    /// * `cursor` - The visual caret position and size relative to the
    ///   widget.
    pub fn new(
        control: Rc<dyn ImeControl>,
        enabled: bool,
        cursor: Rectangle,
    ) -> Self {
        Self {
            control,
            enabled,
            cursor,
        }
    }

    /// The request this widget issues when its layout sits at `position`.
    fn request(&self, position: Point) -> InputMethod<&'static str> {
        if self.enabled {
            InputMethod::Enabled {
                cursor: Rectangle {
                    x: self.cursor.x + position.x,
                    y: self.cursor.y + position.y,
                    width: self.cursor.width,
                    height: self.cursor.height,
                },
                purpose: input_method::Purpose::Normal,
                preedit: None,
            }
        } else {
            InputMethod::Disabled
        }
    }
}

impl<Message, Theme, R> Widget<Message, Theme, R> for ImeRequester
where
    R: Renderer,
{
    fn size(&self) -> Size<Length> {
        Size::new(Length::Shrink, Length::Shrink)
    }

    fn layout(
        &mut self,
        _tree: &mut tree::Tree,
        _renderer: &R,
        _limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(Size::new(0.0, 0.0))
    }

    fn draw(
        &self,
        _tree: &tree::Tree,
        _renderer: &mut R,
        _theme: &Theme,
        _style: &iced::advanced::renderer::Style,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::stateless()
    }

    fn state(&self) -> tree::State {
        tree::State::None
    }

    fn update(
        &mut self,
        _tree: &mut tree::Tree,
        event: &Event,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _renderer: &R,
        _clipboard: &mut dyn Clipboard,
        _shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        // Sync on `RedrawRequested`: by then the widget has been rebuilt from
        // the latest `view()`, so the caret position is current. Input events
        // would see last frame's caret.
        if let Event::Window(window::Event::RedrawRequested(_)) = event {
            // The proxy is positioned in surface coordinates, so offset the
            // widget-relative caret by the widget's own position.
            let request = self.request(layout.bounds().position());
            apply_input_method(self.control.as_ref(), &request);
        }
    }

    fn mouse_interaction(
        &self,
        _tree: &tree::Tree,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &R,
    ) -> mouse::Interaction {
        mouse::Interaction::None
    }

    fn overlay<'a>(
        &'a mut self,
        _tree: &'a mut tree::Tree,
        _layout: Layout<'a>,
        _renderer: &R,
        _viewport: &Rectangle,
        _translation: Vector,
    ) -> Option<overlay::Element<'a, Message, Theme, R>> {
        None
    }
}

impl<'a, Message, Theme, R> From<ImeRequester>
    for Element<'a, Message, Theme, R>
where
    Message: 'a,
    Theme: 'a,
    R: Renderer + 'a,
{
    fn from(requester: ImeRequester) -> Self {
        Element::new(requester)
    }
}
