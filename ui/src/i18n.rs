//! Internationalization for the MathYou widgets.
//!
//! - `i18n-embed` picks the language and loads assets
//! - `fluent` formats messages
//! - `rust-embed` bakes the `.ftl` files into the binary
//! - `i18n-embed-fl` provides the compile-time checked `fl!` macro
//!
//! Layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/mathyou-ui.ftl   (fallback/reference)
//!   es-ES/mathyou-ui.ftl
//! ```
//!
//! Call [`init`] once at startup (it is idempotent), then look strings up
//! with `t!`:
//! ```ignore
//! ui::i18n::init();
//! let label = ui::t!("practice-submit");
//! let title = ui::t!("practice-difficulty", level = "Easy");
//! ```
//!
//! Adding a locale: copy `en-US/mathyou-ui.ftl` to `i18n/<lang-id>/`,
//! translate the values (keep ids and `$variables`), run the tests.
//!
//! The browser build asks `navigator.languages`; native builds ask the OS.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Shorthand for `fl!(&*LOADER, ...)`.
///
/// ```ignore
/// t!("nav-login")
/// t!("overview-unavailable", discipline = "Trigonometry")
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "mathyou-ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Loads the bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(%err, "language selection failed; using fallback");
        }
        // Bidi isolation marks would leak into attributes and test output.
        LOADER.set_use_isolating(false);
    });
}

/// Switches language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang])?;
    LOADER.set_use_isolating(false);
    Ok(())
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn both_locales_are_embedded() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn fallback_lookup_works() {
        init();
        let _ = set_language("en-US");
        let s = fl!(&*LOADER, "practice-submit");
        assert_eq!(s, "Submit Answer");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        init();
        let _ = set_language("en-US");
        let before = fl!(&*LOADER, "concept-untitled");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "concept-untitled");
        assert_eq!(before, after);
    }
}
