//! Focus arbitration between the render surface and the composition proxy.
//!
//! The arbiter owns both elements and a single flag: whether composition mode
//! is active. Everything runs on the UI thread, one event at a time, so state
//! lives in `Cell`/`RefCell` and the arbiter is shared through `Rc`.

use iced::event::Status;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::click;
use crate::config::ImeConfig;
use crate::control::ImeControl;
use crate::cursor::{self, CursorHint};
use crate::dom::{Focusable, ProxyElement, ProxyEvent};
use crate::proxy::CompositionProxy;
use crate::sink::TextSink;

/// Which element is the intended keyboard focus target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// The render surface holds focus.
    #[default]
    Idle,
    /// The composition proxy holds focus.
    Composing,
}

/// Owns the render surface reference, the proxy, and the composition flag.
pub struct FocusArbiter<S, P> {
    surface: S,
    proxy: CompositionProxy<P>,
    state: Cell<FocusState>,
    sink: RefCell<Box<dyn TextSink>>,
    deliver_empty_commits: bool,
}

impl<S, P> FocusArbiter<S, P>
where
    S: Focusable,
    P: ProxyElement,
{
    /// Mounts `proxy` as the composition field for `surface`.
    ///
    /// The arbiter starts [`FocusState::Idle`]; no focus call is made until
    /// the host switches modes.
    pub fn new(
        surface: S,
        proxy: P,
        config: &ImeConfig,
        sink: impl TextSink + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            surface,
            proxy: CompositionProxy::mount(proxy, config),
            state: Cell::new(FocusState::Idle),
            sink: RefCell::new(Box::new(sink)),
            deliver_empty_commits: config.deliver_empty_commits,
        })
    }

    /// Enters or leaves composition mode.
    ///
    /// Repeating the current mode only repeats the focus call.
    pub fn set_composition_mode(&self, active: bool) {
        let next = if active {
            FocusState::Composing
        } else {
            FocusState::Idle
        };

        if self.state.replace(next) != next {
            log::debug!("composition mode {:?} -> {:?}", !active, active);
        }

        match next {
            FocusState::Composing => self.proxy.focus(),
            FocusState::Idle => self.surface.focus(),
        }
    }

    /// Whether composition mode is active.
    pub fn is_inputting(&self) -> bool {
        self.state.get() == FocusState::Composing
    }

    /// Current focus state.
    pub fn state(&self) -> FocusState {
        self.state.get()
    }

    /// Moves the proxy onto the caret. Coordinates are not validated.
    pub fn set_ime_cursor(&self, x: f32, y: f32, width: f32, height: f32) {
        self.set_ime_cursor_area(CursorHint::new(x, y, width, height));
    }

    /// Like [`Self::set_ime_cursor`], taking the caret as a rectangle.
    pub fn set_ime_cursor_area(&self, hint: impl Into<CursorHint>) {
        cursor::place(&self.proxy, hint.into());
    }

    /// Dispatches an event received by the proxy field.
    ///
    /// Returns [`Status::Captured`] when the platform's default action must
    /// be prevented, which is the case for every key event.
    pub fn handle_proxy_event(&self, event: ProxyEvent) -> Status {
        match event {
            ProxyEvent::KeyDown | ProxyEvent::KeyUp => {
                log::trace!("suppressing native key handling on proxy");
                Status::Captured
            }
            ProxyEvent::CompositionEnd { data } => {
                self.commit(data.unwrap_or_default());
                Status::Ignored
            }
        }
    }

    /// Dispatches a click on the render surface.
    ///
    /// While composing this hands focus back to the proxy. Returns whether it
    /// did.
    pub fn handle_surface_click(&self) -> bool {
        click::intercept(self)
    }

    /// The composition proxy.
    pub fn proxy(&self) -> &CompositionProxy<P> {
        &self.proxy
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn commit(&self, text: String) {
        if text.is_empty() && !self.deliver_empty_commits {
            log::debug!("dropping empty composition");
        } else {
            match self.sink.try_borrow_mut() {
                Ok(mut sink) => {
                    log::debug!(
                        "delivering composed text ({} bytes)",
                        text.len()
                    );
                    sink.deliver_composed_text(text);
                }
                Err(_) => {
                    log::warn!(
                        "composition ended inside the text sink, dropping it"
                    );
                }
            }
        }
        self.proxy.clear();
    }
}

impl<S, P> ImeControl for FocusArbiter<S, P>
where
    S: Focusable,
    P: ProxyElement,
{
    fn set_composition_mode(&self, active: bool) {
        FocusArbiter::set_composition_mode(self, active);
    }

    fn set_ime_cursor(&self, x: f32, y: f32, width: f32, height: f32) {
        FocusArbiter::set_ime_cursor(self, x, y, width, height);
    }

    fn is_inputting(&self) -> bool {
        FocusArbiter::is_inputting(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessProxy, HeadlessSurface, Node, Page};
    use crate::sink::CommitQueue;
    use iced::Point;
    use iced::advanced::input_method;

    type Arbiter = FocusArbiter<HeadlessSurface, HeadlessProxy>;

    fn setup(config: &ImeConfig) -> (Page, Rc<Arbiter>, CommitQueue) {
        let page = Page::new();
        let queue = CommitQueue::new();
        let arbiter = FocusArbiter::new(
            page.surface(),
            page.create_proxy(),
            config,
            queue.clone(),
        );
        (page, arbiter, queue)
    }

    fn drain(queue: &CommitQueue) -> Vec<String> {
        let mut texts = Vec::new();
        queue.poll_events(|event| {
            if let iced::Event::InputMethod(input_method::Event::Commit(text)) =
                event
            {
                texts.push(text);
            }
        });
        texts
    }

    /// A fresh arbiter is idle and has not moved focus.
    #[test]
    fn test_initial_state() {
        let (page, arbiter, _) = setup(&ImeConfig::default());

        assert_eq!(arbiter.state(), FocusState::Idle);
        assert!(!arbiter.is_inputting());
        assert!(page.focus_log().is_empty());
    }

    /// For any sequence of mode changes, the flag equals the last value and
    /// the focused element is the proxy exactly when composing.
    #[test]
    fn test_mode_sequence_tracks_focus() {
        let (page, arbiter, _) = setup(&ImeConfig::default());
        let sequence = [true, true, false, true, false, false, true];

        for active in sequence {
            arbiter.set_composition_mode(active);

            assert_eq!(arbiter.is_inputting(), active);
            let expected = if active { Node::Proxy } else { Node::Surface };
            assert_eq!(page.focused(), Some(expected));
        }
    }

    /// Repeating a mode is a no-op apart from the redundant focus call.
    #[test]
    fn test_mode_is_idempotent() {
        let (page, arbiter, _) = setup(&ImeConfig::default());

        arbiter.set_composition_mode(true);
        arbiter.set_composition_mode(true);

        assert_eq!(arbiter.state(), FocusState::Composing);
        assert_eq!(page.focus_log(), vec![Node::Proxy, Node::Proxy]);
    }

    /// Clicking the surface while composing ends with the proxy focused,
    /// after the browser's own focus change to the surface.
    #[test]
    fn test_click_while_composing_refocuses_proxy() {
        let (page, arbiter, _) = setup(&ImeConfig::default());
        arbiter.set_composition_mode(true);

        page.click_surface(&arbiter);

        assert_eq!(page.focused(), Some(Node::Proxy));
        assert_eq!(arbiter.state(), FocusState::Composing);
        assert_eq!(
            page.focus_log(),
            vec![Node::Proxy, Node::Surface, Node::Proxy]
        );
    }

    /// Clicking the surface while idle leaves focus on the surface.
    #[test]
    fn test_click_while_idle_keeps_surface() {
        let (page, arbiter, _) = setup(&ImeConfig::default());
        arbiter.set_composition_mode(false);

        assert!(!arbiter.handle_surface_click());
        page.click_surface(&arbiter);

        assert_eq!(page.focused(), Some(Node::Surface));
        assert_eq!(arbiter.state(), FocusState::Idle);
    }

    /// One composition produces exactly one delivery and an empty buffer;
    /// idling afterwards produces nothing more.
    #[test]
    fn test_composition_end_delivers_once() {
        let (page, arbiter, queue) = setup(&ImeConfig::default());
        arbiter.set_composition_mode(true);

        page.compose(&arbiter, "猫");

        assert_eq!(drain(&queue), vec!["猫"]);
        assert_eq!(page.proxy_value(), "");

        assert!(drain(&queue).is_empty());
    }

    /// Key events on the proxy never insert characters into its value.
    #[test]
    fn test_keys_are_suppressed() {
        let (page, arbiter, queue) = setup(&ImeConfig::default());
        arbiter.set_composition_mode(true);

        for ch in "hello".chars() {
            page.press_key(&arbiter, ch);
        }

        assert_eq!(page.proxy_value(), "");
        assert!(queue.is_empty());
        assert_eq!(
            arbiter.handle_proxy_event(ProxyEvent::KeyDown),
            Status::Captured
        );
        assert_eq!(
            arbiter.handle_proxy_event(ProxyEvent::KeyUp),
            Status::Captured
        );
    }

    /// Empty compositions reach the sink by default.
    #[test]
    fn test_empty_commit_delivered_by_default() {
        let (page, arbiter, queue) = setup(&ImeConfig::default());
        page.set_proxy_value("ni");

        let status = arbiter
            .handle_proxy_event(ProxyEvent::CompositionEnd { data: None });

        assert_eq!(status, Status::Ignored);
        assert_eq!(drain(&queue), vec![""]);
        assert_eq!(page.proxy_value(), "");
    }

    /// With empty commits disabled the sink is skipped but the buffer is
    /// still cleared.
    #[test]
    fn test_empty_commit_suppressed_when_configured() {
        let config = ImeConfig::default().with_empty_commits(false);
        let (page, arbiter, queue) = setup(&config);
        page.set_proxy_value("ni");

        let _ = arbiter.handle_proxy_event(ProxyEvent::CompositionEnd {
            data: Some(String::new()),
        });
        assert!(queue.is_empty());
        assert_eq!(page.proxy_value(), "");

        let _ = arbiter.handle_proxy_event(ProxyEvent::CompositionEnd {
            data: Some("你".to_string()),
        });
        assert_eq!(drain(&queue), vec!["你"]);
    }

    /// The cursor call moves only the origin and keeps the proxy 1×1.
    #[test]
    fn test_set_ime_cursor() {
        let (page, arbiter, _) = setup(&ImeConfig::default());

        arbiter.set_ime_cursor(120.0, 45.0, 10.0, 20.0);

        assert_eq!(page.proxy_style("left").as_deref(), Some("120px"));
        assert_eq!(page.proxy_style("top").as_deref(), Some("45px"));
        assert_eq!(page.proxy_style("width").as_deref(), Some("1px"));
        assert_eq!(page.proxy_style("height").as_deref(), Some("1px"));
        assert_eq!(arbiter.proxy().position(), Point::new(120.0, 45.0));
    }

    /// A sink may call back into the arbiter while text is delivered.
    #[test]
    fn test_sink_can_leave_composition_mode() {
        let page = Page::new();
        let handle: Rc<RefCell<Option<Rc<Arbiter>>>> =
            Rc::new(RefCell::new(None));
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink_handle = Rc::clone(&handle);
        let sink_received = Rc::clone(&received);
        let arbiter = FocusArbiter::new(
            page.surface(),
            page.create_proxy(),
            &ImeConfig::default(),
            move |text: String| {
                sink_received.borrow_mut().push(text);
                if let Some(arbiter) = sink_handle.borrow().as_ref() {
                    arbiter.set_composition_mode(false);
                }
            },
        );
        *handle.borrow_mut() = Some(Rc::clone(&arbiter));

        arbiter.set_composition_mode(true);
        page.compose(&arbiter, "한");

        assert_eq!(*received.borrow(), vec!["한".to_string()]);
        assert!(!arbiter.is_inputting());
        assert_eq!(page.focused(), Some(Node::Surface));

        // Break the cycle so the arbiter is dropped.
        handle.borrow_mut().take();
    }

    /// A composition that ends while the sink is still running is dropped,
    /// but the proxy is cleared all the same.
    #[test]
    fn test_nested_composition_end_is_dropped() {
        let page = Page::new();
        let handle: Rc<RefCell<Option<Rc<Arbiter>>>> =
            Rc::new(RefCell::new(None));
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink_page = page.clone();
        let sink_handle = Rc::clone(&handle);
        let sink_received = Rc::clone(&received);
        let arbiter = FocusArbiter::new(
            page.surface(),
            page.create_proxy(),
            &ImeConfig::default(),
            move |text: String| {
                sink_received.borrow_mut().push(text);
                sink_page.set_proxy_value("ねこ");
                if let Some(arbiter) = sink_handle.borrow().as_ref() {
                    let status =
                        arbiter.handle_proxy_event(ProxyEvent::CompositionEnd {
                            data: Some("ねこ".to_string()),
                        });
                    assert_eq!(status, Status::Ignored);
                    assert_eq!(sink_page.proxy_value(), "");
                }
            },
        );
        *handle.borrow_mut() = Some(Rc::clone(&arbiter));

        arbiter.set_composition_mode(true);
        page.compose(&arbiter, "猫");

        assert_eq!(*received.borrow(), vec!["猫".to_string()]);
        assert_eq!(page.proxy_value(), "");

        // The sink is free again afterwards.
        page.compose(&arbiter, "犬");
        assert_eq!(
            *received.borrow(),
            vec!["猫".to_string(), "犬".to_string()]
        );

        handle.borrow_mut().take();
    }

    /// Focus requests on a detached proxy fail silently; the flag still
    /// follows the host.
    #[test]
    fn test_detached_proxy_fails_silently() {
        let (page, arbiter, _) = setup(&ImeConfig::default());
        page.detach_proxy();

        arbiter.set_composition_mode(true);

        assert!(arbiter.is_inputting());
        assert_eq!(page.focused(), None);
    }

    /// The trait object forwards to the arbiter.
    #[test]
    fn test_ime_control_trait_object() {
        let (page, arbiter, _) = setup(&ImeConfig::default());
        let control: Rc<dyn ImeControl> = arbiter;

        control.set_composition_mode(true);
        control.set_ime_cursor(8.0, 16.0, 2.0, 18.0);

        assert!(control.is_inputting());
        assert_eq!(page.focused(), Some(Node::Proxy));
        assert_eq!(page.proxy_style("left").as_deref(), Some("8px"));
    }
}
