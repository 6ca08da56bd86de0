//! An input method bridge for canvas-rendered text editors.
//!
//! A canvas cannot receive IME composition: browsers only show a candidate
//! window and fire `composition*` events on focused editable elements. This
//! crate keeps an invisible one-pixel `<input>` (the *composition proxy*) next
//! to the render surface and moves focus between the two, so an application
//! drawn with iced (or any other canvas renderer) can accept CJK and other
//! composed text.
//!
//! # Features
//!
//! - **Focus arbitration** between the render surface and the proxy
//! - **Caret tracking** so the candidate window opens next to the caret
//! - **Committed text delivery** to a [`TextSink`], or as iced events through
//!   a [`CommitQueue`]
//! - **Key suppression** so raw keystrokes never leak into the proxy
//! - **Click interception** that keeps composition alive when the surface is
//!   clicked
//! - **Localized** accessible label for the proxy
//!
//! # Example
//!
//! ```
//! use canvas_ime::headless::{Node, Page};
//! use canvas_ime::{CommitQueue, FocusArbiter, ImeConfig};
//!
//! let page = Page::new();
//! let commits = CommitQueue::new();
//! let arbiter = FocusArbiter::new(
//!     page.surface(),
//!     page.create_proxy(),
//!     &ImeConfig::default(),
//!     commits.clone(),
//! );
//!
//! // The editor gained focus: route keyboard input through the proxy.
//! arbiter.set_composition_mode(true);
//! arbiter.set_ime_cursor(120.0, 48.0, 2.0, 18.0);
//! assert_eq!(page.focused(), Some(Node::Proxy));
//!
//! // The user finishes a composition.
//! page.compose(&arbiter, "日本");
//! assert_eq!(commits.len(), 1);
//! assert!(page.proxy_value().is_empty());
//! ```
//!
//! # Browser
//!
//! On `wasm32` the `web` module installs the bridge on a real page:
//!
//! ```ignore
//! use canvas_ime::{CommitQueue, ImeConfig};
//!
//! let commits = CommitQueue::new();
//! let config = ImeConfig::default();
//! let bridge = canvas_ime::web::install(&config, commits.clone())?;
//! bridge.set_composition_mode(true);
//! ```
//!
//! # iced
//!
//! [`ImeRequester`] is an invisible widget that forwards an editor's focus
//! and caret to the bridge on every redraw; [`apply_input_method`] does the
//! same for a single [`iced::advanced::input_method::InputMethod`] request.

rust_i18n::i18n!("locales", fallback = "en");

mod arbiter;
mod click;
mod config;
mod control;
mod cursor;
mod dom;
mod error;
mod i18n;
mod ime_requester;
mod proxy;
mod sink;

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arbiter::{FocusArbiter, FocusState};
pub use config::{DEFAULT_PROXY_ID, DEFAULT_SURFACE_SELECTOR, ImeConfig};
pub use control::ImeControl;
pub use cursor::CursorHint;
pub use dom::{Focusable, ProxyElement, ProxyEvent};
pub use error::ImeError;
pub use i18n::{Language, Translations};
pub use ime_requester::{ImeRequester, apply_input_method};
pub use proxy::{CompositionProxy, PROXY_STYLE};
pub use sink::{CommitQueue, TextSink};
