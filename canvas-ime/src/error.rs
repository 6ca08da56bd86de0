//! Error types for installing the bridge.

use thiserror::Error;

/// Errors that can occur while installing the bridge into a page.
///
/// Once installed, the bridge's operations have no failure path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImeError {
    /// No global `window` object
    #[error("no global window is available")]
    NoWindow,

    /// The window has no document
    #[error("window has no document")]
    NoDocument,

    /// The document has no body to mount the proxy on
    #[error("document has no body element")]
    NoBody,

    /// Nothing matched the configured surface selector
    #[error("no render surface matches selector `{0}`")]
    SurfaceNotFound(String),

    /// The element is of an unexpected kind
    #[error("expected {expected} element")]
    UnexpectedElement {
        /// What the element should have been
        expected: &'static str,
    },

    /// A DOM call raised an exception
    #[error("DOM operation `{operation}` failed: {message}")]
    Dom {
        /// The failing operation
        operation: &'static str,
        /// The stringified JavaScript exception
        message: String,
    },
}
