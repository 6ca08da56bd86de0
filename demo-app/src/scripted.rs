//! A scripted composition session on the in-memory page.

use canvas_ime::headless::{Node, Page};
use canvas_ime::{CommitQueue, FocusArbiter, ImeConfig, Language};
use iced::advanced::input_method;

/// Width of one glyph in the pretend editor.
const GLYPH_WIDTH: f32 = 24.0;

/// Words the pretend IME commits, in order.
const WORDS: [&str; 3] = ["日本語", "の", "入力"];

pub fn run() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug"),
    )
    .init();

    let page = Page::new();
    let commits = CommitQueue::new();
    let config = ImeConfig::default().with_language(Language::French);
    let bridge = FocusArbiter::new(
        page.surface(),
        page.create_proxy(),
        &config,
        commits.clone(),
    );

    log::info!(
        "proxy mounted as #{} ({})",
        page.proxy_attribute("id").unwrap_or_default(),
        page.proxy_attribute("aria-label").unwrap_or_default()
    );

    // The editor gains focus.
    bridge.set_composition_mode(true);

    let mut text = String::new();
    let mut caret = 0.0_f32;
    for word in WORDS {
        bridge.set_ime_cursor(caret, 8.0, 2.0, GLYPH_WIDTH);

        // A stray keystroke is swallowed before it reaches the proxy.
        page.press_key(&bridge, 'x');
        page.compose(&bridge, word);

        // Clicking the editor keeps composition alive.
        page.click_surface(&bridge);

        commits.poll_events(|event| {
            if let iced::Event::InputMethod(input_method::Event::Commit(
                committed,
            )) = event
            {
                caret += GLYPH_WIDTH * committed.chars().count() as f32;
                text.push_str(&committed);
            }
        });
        log::info!("editor text is now {text:?}, caret at {caret}px");
    }

    // The editor loses focus.
    bridge.set_composition_mode(false);

    log::info!(
        "session finished: text {text:?}, focus on {:?}, {} focus changes",
        page.focused().unwrap_or(Node::Surface),
        page.focus_log().len()
    );
}
