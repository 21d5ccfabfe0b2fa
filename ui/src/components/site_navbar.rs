use crate::core::context::Session;
use crate::i18n;
use crate::t;
use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Site header: brand, collapsible menu, account links and the locale
/// switcher.
///
/// Account links follow the [`Session`] in context, so a login through the
/// modal swaps Login/Register for Profile/Logout without a reload. Without a
/// session in context the header assumes a signed-out visitor.
///
/// Changing the locale writes the global language code (a `Signal<String>`
/// in context, when the launcher provides one) so every widget re-renders.
#[component]
pub fn SiteNavbar(#[props(default = "MathYou".to_string())] brand: String) -> Element {
    i18n::init();

    let mut menu_open = use_signal(|| false);
    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();
    let session = try_use_context::<Session>();
    let logged_in = session.map(|s| (s.logged_in)()).unwrap_or(false);

    #[cfg(debug_assertions)]
    tracing::debug!(lang = %_lang_marker, logged_in, "SiteNavbar render");

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %val, "could not switch language"),
        }
    };

    let open = menu_open();
    let toggle_class = if open {
        "navbar__toggle is-active"
    } else {
        "navbar__toggle"
    };
    let menu_class = if open {
        "navbar__menu is-open"
    } else {
        "navbar__menu"
    };
    let tagline = t!("nav-brand-tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    a { class: "navbar__brand-link", href: "/",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "{brand}" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                button {
                    r#type: "button",
                    class: "{toggle_class}",
                    aria_label: t!("nav-toggle-label"),
                    aria_expanded: "{open}",
                    onclick: move |_| menu_open.toggle(),
                    span { class: "navbar__toggle-bar" }
                    span { class: "navbar__toggle-bar" }
                    span { class: "navbar__toggle-bar" }
                }

                div { class: "{menu_class}",
                    AccountLinks { logged_in }

                    if show_switcher {
                        div { class: "navbar__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current_lang()}",
                                oninput: on_change,
                                { langs().iter().map(|code| {
                                    let c = code.clone();
                                    rsx!{
                                        option { key: "{c}", value: "{c}", "{c}" }
                                    }
                                })}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AccountLinks(logged_in: bool) -> Element {
    if logged_in {
        rsx! {
            nav { class: "navbar__links navbar__links--account",
                a { class: "navbar__link", href: "/profile", {t!("nav-profile")} }
                a { class: "navbar__link", href: "/logout", {t!("nav-logout")} }
            }
        }
    } else {
        rsx! {
            nav { class: "navbar__links navbar__links--account",
                a { class: "navbar__link", href: "/login", {t!("nav-login")} }
                a { class: "navbar__link navbar__link--cta", href: "/register", {t!("nav-register")} }
            }
        }
    }
}
