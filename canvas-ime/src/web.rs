//! Browser backend built on `web-sys`.
//!
//! [`install`] creates the proxy `<input>`, mounts it on `document.body`, and
//! wires the DOM listeners to a shared [`FocusArbiter`]. The listeners live as
//! long as the page; there is no teardown.

use iced::event::Status;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CompositionEvent, Document, EventTarget, HtmlElement, HtmlInputElement,
    KeyboardEvent, MouseEvent,
};

use crate::arbiter::FocusArbiter;
use crate::config::ImeConfig;
use crate::dom::{Focusable, ProxyElement, ProxyEvent};
use crate::error::ImeError;
use crate::sink::TextSink;

/// The page's render surface, usually a `<canvas>`.
#[derive(Debug, Clone)]
pub struct WebSurface {
    element: HtmlElement,
}

/// The proxy `<input>` element.
#[derive(Debug, Clone)]
pub struct WebProxy {
    element: HtmlInputElement,
}

/// Arbiter over real DOM elements.
pub type WebArbiter = FocusArbiter<WebSurface, WebProxy>;

impl WebSurface {
    /// The wrapped element.
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl WebProxy {
    /// The wrapped element.
    pub fn element(&self) -> &HtmlInputElement {
        &self.element
    }
}

impl Focusable for WebSurface {
    fn focus(&self) {
        if let Err(err) = self.element.focus() {
            log::debug!("render surface refused focus: {err:?}");
        }
    }
}

impl Focusable for WebProxy {
    fn focus(&self) {
        if let Err(err) = self.element.focus() {
            log::debug!("composition proxy refused focus: {err:?}");
        }
    }
}

impl ProxyElement for WebProxy {
    fn set_style_property(&self, name: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(name, value) {
            log::debug!("failed to set proxy style {name}: {err:?}");
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.element.set_attribute(name, value) {
            log::debug!("failed to set proxy attribute {name}: {err:?}");
        }
    }

    fn clear_value(&self) {
        self.element.set_value("");
    }
}

/// Installs the bridge on the element matching
/// [`ImeConfig::surface_selector`].
///
/// # Errors
///
/// Fails when the page has no window, document, or body, when nothing
/// matches the selector, or when a DOM call raises.
pub fn install(
    config: &ImeConfig,
    sink: impl TextSink + 'static,
) -> Result<Rc<WebArbiter>, ImeError> {
    let document = document()?;
    let surface = document
        .query_selector(&config.surface_selector)
        .map_err(dom_error("querySelector"))?
        .ok_or_else(|| {
            ImeError::SurfaceNotFound(config.surface_selector.clone())
        })?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ImeError::UnexpectedElement { expected: "an HTML" })?;

    install_on(surface, config, sink)
}

/// Installs the bridge on an element the host already holds, such as the
/// canvas of a winit window.
///
/// # Errors
///
/// Fails when the page has no window, document, or body, or when a DOM call
/// raises.
pub fn install_on(
    surface: HtmlElement,
    config: &ImeConfig,
    sink: impl TextSink + 'static,
) -> Result<Rc<WebArbiter>, ImeError> {
    let document = document()?;
    let body = document.body().ok_or(ImeError::NoBody)?;
    let input = document
        .create_element("input")
        .map_err(dom_error("createElement"))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| ImeError::UnexpectedElement { expected: "an input" })?;

    let arbiter = FocusArbiter::new(
        WebSurface { element: surface },
        WebProxy { element: input },
        config,
        sink,
    );

    let input = arbiter.proxy().element().element();
    body.append_child(input).map_err(dom_error("appendChild"))?;

    let proxy_target: &EventTarget = input.as_ref();
    let surface_target: &EventTarget = arbiter.surface().element().as_ref();

    // keydown and keyup share one listener
    let keys = Rc::clone(&arbiter);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(
        move |event: KeyboardEvent| {
            let kind = if event.type_() == "keyup" {
                ProxyEvent::KeyUp
            } else {
                ProxyEvent::KeyDown
            };
            if keys.handle_proxy_event(kind) == Status::Captured {
                event.prevent_default();
            }
        },
    );
    for kind in ["keydown", "keyup"] {
        proxy_target
            .add_event_listener_with_callback(
                kind,
                on_key.as_ref().unchecked_ref(),
            )
            .map_err(dom_error("addEventListener"))?;
    }
    on_key.forget();

    let composing = Rc::clone(&arbiter);
    let on_compositionend = Closure::<dyn FnMut(CompositionEvent)>::new(
        move |event: CompositionEvent| {
            let _ = composing.handle_proxy_event(ProxyEvent::CompositionEnd {
                data: event.data(),
            });
        },
    );
    proxy_target
        .add_event_listener_with_callback(
            "compositionend",
            on_compositionend.as_ref().unchecked_ref(),
        )
        .map_err(dom_error("addEventListener"))?;
    on_compositionend.forget();

    let clicks = Rc::clone(&arbiter);
    let on_click =
        Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
            clicks.handle_surface_click();
        });
    surface_target
        .add_event_listener_with_callback(
            "click",
            on_click.as_ref().unchecked_ref(),
        )
        .map_err(dom_error("addEventListener"))?;
    on_click.forget();

    log::debug!("composition proxy #{} installed", config.proxy_id);
    Ok(arbiter)
}

fn document() -> Result<Document, ImeError> {
    web_sys::window()
        .ok_or(ImeError::NoWindow)?
        .document()
        .ok_or(ImeError::NoDocument)
}

fn dom_error(operation: &'static str) -> impl FnOnce(JsValue) -> ImeError {
    move |err| ImeError::Dom {
        operation,
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
