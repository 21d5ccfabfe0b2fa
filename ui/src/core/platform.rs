//! Platform detection and the few direct browser calls the widgets need.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// `window.location.origin`, when running in a browser.
pub fn page_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Broadcasts a bare `CustomEvent` named `name` on `window` so that page
/// script outside the widgets can react. No-op off the web.
pub fn dispatch_window_event(name: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::CustomEvent::new(name) {
            Ok(event) => {
                if let Err(err) = window.dispatch_event(&event) {
                    tracing::warn!(?err, event = name, "failed to dispatch window event");
                }
            }
            Err(err) => tracing::warn!(?err, event = name, "failed to build window event"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(event = name, "window event (native no-op)");
    }
}
