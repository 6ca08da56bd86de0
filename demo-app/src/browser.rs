//! A one-line canvas editor fed by the composition proxy.

use canvas_ime::web::WebArbiter;
use canvas_ime::{ImeConfig, ImeError};
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 120;
const FONT_SIZE: f64 = 28.0;
const MARGIN: f64 = 24.0;

pub fn run() {
    console_error_panic_hook::set_once();
    // Nothing to report to if the console logger is already set.
    let _ = console_log::init_with_level(log::Level::Debug);

    // The DOM listeners keep the bridge alive after `start` returns.
    if let Err(err) = start() {
        log::error!("failed to start demo: {err}");
    }
}

/// Text drawn on the canvas.
struct Editor {
    context: CanvasRenderingContext2d,
    text: String,
}

impl Editor {
    fn insert(&mut self, text: &str) {
        self.text.push_str(text);
        self.redraw();
    }

    /// Left edge of the caret, in canvas pixels.
    fn caret_x(&self) -> f64 {
        let width = self
            .context
            .measure_text(&self.text)
            .map(|metrics| metrics.width())
            .unwrap_or_default();
        MARGIN + width
    }

    fn redraw(&self) {
        let baseline = (f64::from(HEIGHT) + FONT_SIZE) / 2.0;
        self.context
            .clear_rect(0.0, 0.0, f64::from(WIDTH), f64::from(HEIGHT));
        if let Err(err) = self.context.fill_text(&self.text, MARGIN, baseline) {
            log::warn!("failed to draw text: {err:?}");
        }
        self.context.fill_rect(
            self.caret_x(),
            baseline - FONT_SIZE,
            2.0,
            FONT_SIZE + 4.0,
        );
    }
}

fn start() -> Result<(), ImeError> {
    let document = web_sys::window()
        .ok_or(ImeError::NoWindow)?
        .document()
        .ok_or(ImeError::NoDocument)?;
    let body = document.body().ok_or(ImeError::NoBody)?;

    let canvas = document
        .create_element("canvas")
        .map_err(dom_error("createElement"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ImeError::UnexpectedElement { expected: "a canvas" })?;
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);
    canvas.set_tab_index(0);
    body.append_child(&canvas).map_err(dom_error("appendChild"))?;

    let context = canvas
        .get_context("2d")
        .map_err(dom_error("getContext"))?
        .ok_or(ImeError::UnexpectedElement { expected: "a 2d context" })?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ImeError::UnexpectedElement { expected: "a 2d context" })?;
    context.set_font(&format!("{FONT_SIZE}px sans-serif"));

    let editor = Rc::new(RefCell::new(Editor {
        context,
        text: String::new(),
    }));
    editor.borrow().redraw();

    // The sink needs the bridge to move the caret, but the bridge owns the
    // sink: hand it a weak handle once installed.
    let slot: Rc<OnceCell<Weak<WebArbiter>>> = Rc::new(OnceCell::new());
    let sink_slot = Rc::clone(&slot);
    let sink_editor = Rc::clone(&editor);
    let sink = move |text: String| {
        let mut editor = sink_editor.borrow_mut();
        editor.insert(&text);
        if let Some(bridge) = sink_slot.get().and_then(Weak::upgrade) {
            park_caret(&bridge, &editor);
        }
    };

    let bridge = canvas_ime::web::install_on(
        HtmlElement::from(canvas),
        &ImeConfig::default(),
        sink,
    )?;
    let _ = slot.set(Rc::downgrade(&bridge));

    bridge.set_composition_mode(true);
    park_caret(&bridge, &editor.borrow());
    log::info!("demo ready, start typing");

    Ok(())
}

fn park_caret(bridge: &WebArbiter, editor: &Editor) {
    let caret = editor.caret_x() as f32;
    let top = ((f64::from(HEIGHT) - FONT_SIZE) / 2.0) as f32;
    bridge.set_ime_cursor(caret, top, 2.0, FONT_SIZE as f32);
}

fn dom_error(operation: &'static str) -> impl FnOnce(JsValue) -> ImeError {
    move |err| ImeError::Dom {
        operation,
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
