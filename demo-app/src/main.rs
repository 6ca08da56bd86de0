//! Demo application for canvas-ime.
//!
//! In a browser it draws a one-line editor on a `<canvas>` and routes
//! keyboard input through the composition proxy, so an IME can be used to
//! type into it. Natively it scripts a composition session against the
//! in-memory page and logs what happens.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod scripted;

/// Main entry point for the demo application.
fn main() {
    #[cfg(target_arch = "wasm32")]
    browser::run();

    #[cfg(not(target_arch = "wasm32"))]
    scripted::run();
}
