use dioxus::logger::tracing::{info, warn, Level};
use dioxus::prelude::*;

use api::HttpApi;
use ui::core::config::{ApiConfig, HostConfig};
use ui::core::context::{LoginPrompt, Session};
use ui::core::navigation::{bridge_fragment_changes, NavigationBus};
use ui::core::readiness::MathReadiness;
use ui::core::typeset::{watch_math_renderer, MathRenderer};
use ui::views::{ConfigErrorPanel, DisciplinePage};

/// Element the server-rendered page mounts the widgets on; its `data-*`
/// attributes carry the [`HostConfig`].
const MOUNT_ID: &str = "main";

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    // Fails only when a subscriber is already installed.
    let _ = dioxus::logger::init(Level::INFO);
    ui::i18n::init();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        HostConfig::from_mount(MOUNT_ID).map_err(|err| {
            warn!(error = %err, "host page configuration unusable");
            err.to_string()
        })
    });
    let authenticated = config.as_ref().map(|c| c.authenticated).unwrap_or(false);

    use_context_provider(|| HttpApi::new(ApiConfig::detect().base_url));
    use_context_provider(|| {
        let bus = NavigationBus::new();
        bridge_fragment_changes(bus.clone());
        bus
    });
    use_context_provider(|| {
        let readiness = MathReadiness::pending();
        watch_math_renderer(&readiness);
        MathRenderer::new(readiness)
    });
    use_context_provider(|| Session {
        logged_in: Signal::new(authenticated),
    });
    use_context_provider(|| LoginPrompt {
        open: Signal::new(false),
    });
    // Global language code; the header's locale switcher writes it.
    use_context_provider(|| Signal::new(String::from("en-US")));

    use_hook(|| {
        if let Ok(config) = &config {
            info!(
                discipline = %config.discipline_id,
                concepts = config.concepts.len(),
                authenticated,
                "mounting widgets"
            );
        }
    });

    let page = match config {
        Ok(config) => rsx! { DisciplinePage { config } },
        Err(message) => rsx! { ConfigErrorPanel { message } },
    };

    rsx! {
        document::Style { "{THEME_CSS}" }
        {page}
    }
}
