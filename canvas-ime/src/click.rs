//! Refocus-on-click for the render surface.
//!
//! A canvas gets native click-to-focus. Clicking it mid-composition would
//! silently move focus off the proxy and drop the composition, so while
//! composing the click hands focus straight back.
//!
//! The browser applies its own focus change before this handler runs, which
//! means focus briefly lands on the surface and then returns to the proxy.
//! That double hop is accepted.

use crate::arbiter::FocusArbiter;
use crate::dom::{Focusable, ProxyElement};

/// Returns whether focus was redirected. The click itself is never
/// suppressed.
pub(crate) fn intercept<S, P>(arbiter: &FocusArbiter<S, P>) -> bool
where
    S: Focusable,
    P: ProxyElement,
{
    if !arbiter.is_inputting() {
        return false;
    }

    log::trace!("render surface clicked while composing, refocusing proxy");
    arbiter.proxy().focus();
    true
}
