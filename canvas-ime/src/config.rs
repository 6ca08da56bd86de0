//! Bridge configuration.

use crate::i18n::Language;

/// DOM id given to the proxy field unless configured otherwise.
pub const DEFAULT_PROXY_ID: &str = "canvas-ime-input";

/// CSS selector used to locate the render surface unless configured otherwise.
pub const DEFAULT_SURFACE_SELECTOR: &str = "canvas";

/// Settings for a composition bridge.
///
/// # Example
///
/// ```
/// use canvas_ime::{ImeConfig, Language};
///
/// let config = ImeConfig::default()
///     .with_proxy_id("editor-ime")
///     .with_language(Language::Spanish)
///     .with_empty_commits(false);
///
/// assert_eq!(config.proxy_id, "editor-ime");
/// assert!(!config.deliver_empty_commits);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImeConfig {
    /// `id` attribute of the proxy input
    pub proxy_id: String,
    /// Selector of the render surface, used by `web::install`
    pub surface_selector: String,
    /// Language of the proxy's accessible label
    pub language: Language,
    /// Whether a `compositionend` with empty text still reaches the sink
    pub deliver_empty_commits: bool,
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            proxy_id: DEFAULT_PROXY_ID.to_string(),
            surface_selector: DEFAULT_SURFACE_SELECTOR.to_string(),
            language: Language::default(),
            deliver_empty_commits: true,
        }
    }
}

impl ImeConfig {
    /// Sets the proxy element id.
    #[must_use]
    pub fn with_proxy_id(mut self, id: impl Into<String>) -> Self {
        self.proxy_id = id.into();
        self
    }

    /// Sets the selector used to find the render surface.
    #[must_use]
    pub fn with_surface_selector(
        mut self,
        selector: impl Into<String>,
    ) -> Self {
        self.surface_selector = selector.into();
        self
    }

    /// Sets the language of the proxy's accessible label.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Chooses whether empty compositions are delivered to the sink.
    #[must_use]
    pub fn with_empty_commits(mut self, deliver: bool) -> Self {
        self.deliver_empty_commits = deliver;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// By default empty commits still reach the sink.
    #[test]
    fn test_default_config() {
        let config = ImeConfig::default();

        assert_eq!(config.proxy_id, DEFAULT_PROXY_ID);
        assert_eq!(config.surface_selector, "canvas");
        assert_eq!(config.language, Language::English);
        assert!(config.deliver_empty_commits);
    }

    #[test]
    fn test_builder_chain() {
        let config = ImeConfig::default()
            .with_surface_selector("#app canvas")
            .with_language(Language::French);

        assert_eq!(config.surface_selector, "#app canvas");
        assert_eq!(config.language, Language::French);
        assert_eq!(config.proxy_id, DEFAULT_PROXY_ID);
    }
}
