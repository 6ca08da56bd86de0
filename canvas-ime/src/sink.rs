//! Receivers for committed composition text.

use iced::Event;
use iced::advanced::input_method;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Host-side receiver of finished composition units.
///
/// Every call gets its own owned copy of the text; nothing is shared with
/// the DOM event it came from. Any `FnMut(String)` closure is a sink.
pub trait TextSink {
    /// Called once per completed composition.
    fn deliver_composed_text(&mut self, text: String);
}

impl<F> TextSink for F
where
    F: FnMut(String),
{
    fn deliver_composed_text(&mut self, text: String) {
        self(text);
    }
}

/// A shared FIFO of committed text, drained by the host's event loop.
///
/// Clones share the same queue: hand one clone to the bridge as its sink and
/// keep another to poll from.
///
/// # Example
///
/// ```
/// use canvas_ime::{CommitQueue, TextSink};
///
/// let queue = CommitQueue::new();
/// let mut sink = queue.clone();
/// sink.deliver_composed_text("猫".to_string());
///
/// let mut events = Vec::new();
/// queue.poll_events(|event| events.push(event));
/// assert_eq!(events.len(), 1);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommitQueue {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl CommitQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commits waiting to be polled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns `true` when nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drains pending commits in arrival order as iced input method events.
    pub fn poll_events<F>(&self, mut callback: F)
    where
        F: FnMut(Event),
    {
        // Released before the callback runs so it may feed the queue again.
        let pending: Vec<String> = self.queue.borrow_mut().drain(..).collect();
        for text in pending {
            callback(Event::InputMethod(input_method::Event::Commit(text)));
        }
    }
}

impl TextSink for CommitQueue {
    fn deliver_composed_text(&mut self, text: String) {
        self.queue.borrow_mut().push_back(text);
    }
}
