//! An in-memory page with a render surface and a proxy field.
//!
//! Mirrors the parts of browser behavior the bridge depends on: which element
//! holds focus, the proxy's value, its inline styles and attributes, and the
//! native default actions the bridge may or may not prevent. Used by the test
//! suite and by native hosts that want to script a composition session.
//!
//! # Example
//!
//! ```
//! use canvas_ime::headless::{Node, Page};
//! use canvas_ime::{FocusArbiter, ImeConfig};
//!
//! let page = Page::new();
//! let arbiter = FocusArbiter::new(
//!     page.surface(),
//!     page.create_proxy(),
//!     &ImeConfig::default(),
//!     |_text: String| {},
//! );
//!
//! arbiter.set_composition_mode(true);
//! page.click_surface(&arbiter);
//! assert_eq!(page.focused(), Some(Node::Proxy));
//! ```

use iced::event::Status;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::arbiter::FocusArbiter;
use crate::dom::{Focusable, ProxyElement, ProxyEvent};

/// The two elements of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// The render surface (the canvas).
    Surface,
    /// The composition proxy field.
    Proxy,
}

#[derive(Debug, Default)]
struct PageState {
    focused: Option<Node>,
    focus_log: Vec<Node>,
    proxy_attached: bool,
    proxy_value: String,
    proxy_style: BTreeMap<String, String>,
    proxy_attributes: BTreeMap<String, String>,
}

impl PageState {
    fn focus(&mut self, node: Node) {
        if node == Node::Proxy && !self.proxy_attached {
            return;
        }
        self.focused = Some(node);
        self.focus_log.push(node);
    }
}

/// Shared handle to an in-memory page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    state: Rc<RefCell<PageState>>,
}

/// The render surface of a [`Page`].
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    state: Rc<RefCell<PageState>>,
}

/// The proxy field of a [`Page`].
#[derive(Debug, Clone)]
pub struct HeadlessProxy {
    state: Rc<RefCell<PageState>>,
}

/// Arbiter over the in-memory elements.
pub type HeadlessArbiter = FocusArbiter<HeadlessSurface, HeadlessProxy>;

impl Page {
    /// Creates an empty page with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the page's render surface.
    #[must_use]
    pub fn surface(&self) -> HeadlessSurface {
        HeadlessSurface {
            state: Rc::clone(&self.state),
        }
    }

    /// Creates the proxy field and attaches it to the page.
    #[must_use]
    pub fn create_proxy(&self) -> HeadlessProxy {
        self.state.borrow_mut().proxy_attached = true;
        HeadlessProxy {
            state: Rc::clone(&self.state),
        }
    }

    /// Removes the proxy from the page. Later focus requests on it are
    /// silently ignored, as in a browser.
    pub fn detach_proxy(&self) {
        let mut state = self.state.borrow_mut();
        state.proxy_attached = false;
        if state.focused == Some(Node::Proxy) {
            state.focused = None;
        }
    }

    /// The element holding focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<Node> {
        self.state.borrow().focused
    }

    /// Every successful focus change, oldest first.
    #[must_use]
    pub fn focus_log(&self) -> Vec<Node> {
        self.state.borrow().focus_log.clone()
    }

    /// Current value of the proxy field.
    #[must_use]
    pub fn proxy_value(&self) -> String {
        self.state.borrow().proxy_value.clone()
    }

    /// Overwrites the proxy field's value, as an IME writing preedit text
    /// would.
    pub fn set_proxy_value(&self, value: &str) {
        value.clone_into(&mut self.state.borrow_mut().proxy_value);
    }

    /// An inline style property of the proxy.
    #[must_use]
    pub fn proxy_style(&self, name: &str) -> Option<String> {
        self.state.borrow().proxy_style.get(name).cloned()
    }

    /// An attribute of the proxy.
    #[must_use]
    pub fn proxy_attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().proxy_attributes.get(name).cloned()
    }

    /// Types `ch` on whichever element is focused.
    ///
    /// When the proxy has focus it receives `keydown` and `keyup`; unless the
    /// bridge captures the key, the character lands in the field's value.
    pub fn press_key(&self, arbiter: &HeadlessArbiter, ch: char) {
        if self.focused() != Some(Node::Proxy) {
            return;
        }

        if arbiter.handle_proxy_event(ProxyEvent::KeyDown) == Status::Ignored {
            self.state.borrow_mut().proxy_value.push(ch);
        }
        let _ = arbiter.handle_proxy_event(ProxyEvent::KeyUp);
    }

    /// Runs a complete composition that commits `text`.
    ///
    /// The IME writes the text into the focused proxy and then fires
    /// `compositionend`. Nothing happens if the proxy is not focused.
    pub fn compose(&self, arbiter: &HeadlessArbiter, text: &str) {
        if self.focused() != Some(Node::Proxy) {
            return;
        }

        self.set_proxy_value(text);
        let _ = arbiter.handle_proxy_event(ProxyEvent::CompositionEnd {
            data: Some(text.to_string()),
        });
    }

    /// Clicks the render surface: native click-to-focus first, then the
    /// bridge's click listener.
    pub fn click_surface(&self, arbiter: &HeadlessArbiter) {
        self.state.borrow_mut().focus(Node::Surface);
        arbiter.handle_surface_click();
    }
}

impl Focusable for HeadlessSurface {
    fn focus(&self) {
        self.state.borrow_mut().focus(Node::Surface);
    }
}

impl Focusable for HeadlessProxy {
    fn focus(&self) {
        self.state.borrow_mut().focus(Node::Proxy);
    }
}

impl ProxyElement for HeadlessProxy {
    fn set_style_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .proxy_style
            .insert(name.to_string(), value.to_string());
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .proxy_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn clear_value(&self) {
        self.state.borrow_mut().proxy_value.clear();
    }
}
