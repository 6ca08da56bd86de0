//! Internationalization support for the proxy field.
//!
//! The proxy input is invisible but still exposed to assistive technology,
//! so it carries a localized `aria-label`. Currently supports English,
//! French, and Spanish.
//!
//! # Using rust-i18n
//!
//! The translations live in the `locales` directory and are embedded with
//! `rust-i18n`. They can also be read directly via the `t!` macro:
//!
//! ```ignore
//! let label = rust_i18n::t!("proxy.label", locale = "fr");
//! ```

/// Supported languages for the proxy's accessible label.
///
/// # Examples
///
/// ```
/// use canvas_ime::Language;
///
/// let lang = Language::English;
/// assert_eq!(lang, Language::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English language
    #[default]
    English,
    /// French language
    French,
    /// Spanish language
    Spanish,
}

impl Language {
    /// Returns the locale code for this language.
    ///
    /// # Examples
    ///
    /// ```
    /// use canvas_ime::Language;
    ///
    /// assert_eq!(Language::English.to_locale(), "en");
    /// assert_eq!(Language::French.to_locale(), "fr");
    /// assert_eq!(Language::Spanish.to_locale(), "es");
    /// ```
    #[must_use]
    pub const fn to_locale(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Spanish => "es",
        }
    }
}

/// Provides translated strings for the proxy element.
///
/// # Examples
///
/// ```
/// use canvas_ime::{Language, Translations};
///
/// let translations = Translations::new(Language::French);
/// assert_eq!(translations.proxy_label(), "Saisie de composition de texte");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Translations {
    language: Language,
}

impl Translations {
    /// Creates a new `Translations` instance with the specified language.
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    /// Returns the accessible name of the hidden composition field.
    ///
    /// # Examples
    ///
    /// ```
    /// use canvas_ime::{Language, Translations};
    ///
    /// let en = Translations::new(Language::English);
    /// assert_eq!(en.proxy_label(), "Text composition input");
    /// ```
    #[must_use]
    pub fn proxy_label(&self) -> String {
        rust_i18n::t!("proxy.label", locale = self.language.to_locale())
            .into_owned()
    }
}
