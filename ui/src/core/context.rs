//! Context lookups shared by the widgets.
//!
//! The launcher provides the HTTP client, navigation bus, math renderer and
//! session once at the root. A widget mounted without them falls back to a
//! private instance so it still works on its own.

use api::HttpApi;
use dioxus::prelude::*;

use super::config::ApiConfig;
use super::navigation::NavigationBus;
use super::typeset::MathRenderer;

/// The signed-in state, shared by the header and the login modal.
#[derive(Clone, Copy)]
pub struct Session {
    pub logged_in: Signal<bool>,
}

/// Handle to a mounted login modal. Widgets that hit an authorization
/// failure call [`LoginPrompt::open`] instead of navigating away.
#[derive(Clone, Copy)]
pub struct LoginPrompt {
    pub open: Signal<bool>,
}

impl LoginPrompt {
    pub fn open(mut self) {
        self.open.set(true);
    }

    pub fn close(mut self) {
        self.open.set(false);
    }
}

pub fn use_api() -> HttpApi {
    use_hook(|| {
        try_consume_context::<HttpApi>()
            .unwrap_or_else(|| HttpApi::new(ApiConfig::detect().base_url))
    })
}

pub fn use_navigation_bus() -> NavigationBus {
    use_hook(|| try_consume_context::<NavigationBus>().unwrap_or_default())
}

/// `None` when the host never wired up a renderer; math then stays raw.
pub fn use_math_renderer() -> Option<MathRenderer> {
    use_hook(try_consume_context::<MathRenderer>)
}

pub fn use_login_prompt() -> Option<LoginPrompt> {
    use_hook(try_consume_context::<LoginPrompt>)
}

/// Subscribes the caller to the active language so it re-renders when the
/// locale switcher changes it. Returns the language code (empty when the
/// host provides no language signal).
pub fn use_language_marker() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_default()
}
