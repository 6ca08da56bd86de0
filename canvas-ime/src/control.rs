//! Host-facing control surface.

/// Operations the host calls on the bridge.
///
/// Object safe, so hosts and widgets can hold an `Rc<dyn ImeControl>`
/// without naming the backend's element types.
pub trait ImeControl {
    /// Enters (`true`) or leaves (`false`) composition mode, moving keyboard
    /// focus to the proxy or back to the render surface.
    fn set_composition_mode(&self, active: bool);

    /// Moves the proxy onto the caret at `(x, y)`. `width` and `height`
    /// describe the caret but do not resize the proxy.
    fn set_ime_cursor(&self, x: f32, y: f32, width: f32, height: f32);

    /// Whether composition mode is active.
    fn is_inputting(&self) -> bool;
}
