use dioxus::prelude::*;

use crate::auth::LoginModal;
use crate::components::SiteNavbar;
use crate::content::MathContent;
use crate::core::config::HostConfig;

/// A discipline page: header, concept viewer and the login modal the
/// practice problems fall back on.
#[component]
pub fn DisciplinePage(config: HostConfig) -> Element {
    rsx! {
        SiteNavbar {}
        main { class: "page page-discipline",
            h1 { class: "page-discipline__title", "{config.discipline_name}" }
            MathContent {
                key: "{config.discipline_id}",
                discipline_id: config.discipline_id.clone(),
                discipline_name: config.discipline_name.clone(),
                concepts: config.concepts.clone(),
                problems: config.problems.clone(),
            }
        }
        LoginModal {}
    }
}

/// Shown instead of the page when the host markup is unusable.
#[component]
pub fn ConfigErrorPanel(message: String) -> Element {
    rsx! {
        main { class: "page page-error",
            p { class: "content-status content-status--error", "{message}" }
        }
    }
}
