use std::collections::BTreeMap;

use api::HttpApi;
use dioxus::prelude::*;
use futures_util::StreamExt;
use uuid::Uuid;

use super::loader::{fetch, ContentController};
use super::render::{ConceptSection, ConceptView, Panel};
use crate::components::Remount;
use crate::core::config::ConceptLink;
use crate::core::context::{use_api, use_language_marker, use_math_renderer, use_navigation_bus};
use crate::core::navigation::{
    self, ConceptId, NavigationBus, NavigationCause, NavigationEvent,
};
use crate::core::typeset::CONTENT_DELIMITERS;
use crate::practice::PracticeProblemList;
use crate::t;

/// Concept viewer for one discipline.
///
/// Owns the overview plus every concept in `concepts`. Navigation arrives
/// over the [`NavigationBus`]; each panel change re-keys the content wrapper
/// so the entry animation plays again, then typesets the region.
#[component]
pub fn MathContent(
    discipline_id: String,
    discipline_name: String,
    concepts: Vec<ConceptLink>,
    #[props(default)] problems: BTreeMap<String, Vec<String>>,
) -> Element {
    let _lang_marker = use_language_marker();
    let api = use_api();
    let bus = use_navigation_bus();
    let renderer = use_math_renderer();
    let region_id = use_hook(|| format!("math-content-{}", Uuid::new_v4().simple()));

    let controller = use_signal(|| {
        ContentController::new(
            discipline_id.clone(),
            concepts.iter().map(|link| link.id.clone()),
            problems.clone(),
        )
    });

    {
        let bus = bus.clone();
        let api = api.clone();
        use_future(move || {
            let bus = bus.clone();
            let api = api.clone();
            async move {
                let owned = controller.peek().view_state().controls().to_vec();
                let mut events = bus.subscribe(owned);

                let initial = ConceptId::from_fragment(navigation::current_fragment().as_deref());
                handle_navigation(
                    controller,
                    &api,
                    NavigationEvent::new(initial, NavigationCause::InitialLoad),
                );

                while let Some(event) = events.next().await {
                    handle_navigation(controller, &api, event);
                }
            }
        });
    }

    {
        let region_id = region_id.clone();
        use_effect(move || {
            let epoch = controller.read().render_epoch();
            let Some(renderer) = renderer.clone() else {
                return;
            };
            let region_id = region_id.clone();
            spawn(async move {
                let outcome = renderer.typeset(&region_id, CONTENT_DELIMITERS).await;
                tracing::trace!(epoch, ?outcome, "typeset content");
            });
        });
    }

    let (panel, epoch, active) = {
        let ctrl = controller.read();
        (
            ctrl.panel().clone(),
            ctrl.render_epoch(),
            ctrl.view_state().active().cloned(),
        )
    };
    let questions = match &panel {
        Panel::Concept(view) => view.questions.clone(),
        _ => Vec::new(),
    };

    let links = nav_links(&concepts);
    let area_class = if panel.is_overview() {
        "math-content__area math-content__area--overview"
    } else {
        "math-content__area"
    };

    rsx! {
        section { class: "math-content",
            ConceptNav {
                links,
                active,
                on_select: move |id: ConceptId| select(&bus, id),
            }
            div { id: "{region_id}", class: "{area_class}",
                Remount { epoch, class: "math-content__panel",
                    ContentPanel { panel, discipline_name: discipline_name.clone() }
                    if !questions.is_empty() {
                        section { class: "practice-block",
                            h3 { class: "practice-block__heading", {t!("practice-heading")} }
                            PracticeProblemList { question_ids: questions }
                        }
                    }
                }
            }
        }
    }
}

fn select(bus: &NavigationBus, id: ConceptId) {
    navigation::push_fragment(&id);
    bus.publish(NavigationEvent::new(id, NavigationCause::Click));
}

fn handle_navigation(
    mut controller: Signal<ContentController>,
    api: &HttpApi,
    event: NavigationEvent,
) {
    let request = controller.with_mut(|ctrl| {
        let request = ctrl.navigate(&event);
        // A fragment naming someone else's concept leaves this widget on its
        // overview rather than an empty panel.
        if request.is_none()
            && event.cause == NavigationCause::InitialLoad
            && ctrl.view_state().active().is_none()
        {
            return ctrl.navigate(&NavigationEvent::new(
                ConceptId::overview(),
                NavigationCause::InitialLoad,
            ));
        }
        request
    });
    let Some(request) = request else {
        return;
    };

    let api = api.clone();
    let discipline_id = controller.peek().discipline_id().to_string();
    spawn(async move {
        let result = fetch(&api, &discipline_id, &request).await;
        controller.with_mut(|ctrl| ctrl.complete(&request, result));
    });
}

fn nav_links(concepts: &[ConceptLink]) -> Vec<ConceptLink> {
    let mut links = vec![ConceptLink {
        id: ConceptId::overview(),
        label: t!("nav-overview"),
    }];
    links.extend(concepts.iter().filter(|link| !link.id.is_overview()).cloned());
    links
}

#[component]
pub fn ConceptNav(
    links: Vec<ConceptLink>,
    #[props(!optional)] active: Option<ConceptId>,
    on_select: EventHandler<ConceptId>,
) -> Element {
    let label = t!("concept-nav-label");
    rsx! {
        nav { class: "concept-nav", aria_label: "{label}",
            ul { class: "concept-nav__items",
                for link in links.into_iter() {
                    {render_nav_link(link, active.as_ref(), on_select)}
                }
            }
        }
    }
}

fn render_nav_link(
    link: ConceptLink,
    active: Option<&ConceptId>,
    on_select: EventHandler<ConceptId>,
) -> Element {
    let selected = active == Some(&link.id);
    let class = if selected {
        "concept-nav__link active"
    } else {
        "concept-nav__link"
    };
    let current = if selected { "page" } else { "false" };
    let id = link.id.clone();

    rsx! {
        li { key: "{link.id}", class: "concept-nav__item",
            a {
                class: "{class}",
                href: "#{link.id}",
                "data-concept": "{link.id}",
                aria_current: "{current}",
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    on_select.call(id.clone());
                },
                "{link.label}"
            }
        }
    }
}

/// Renders one [`Panel`]. [`MathContent`] wraps it in a [`Remount`] so every
/// change rebuilds it.
#[component]
pub fn ContentPanel(panel: Panel, discipline_name: String) -> Element {
    match panel {
        Panel::Loading { overview } => {
            let message = if overview {
                t!("content-loading")
            } else {
                t!("concept-loading")
            };
            rsx! {
                div { class: "content-wrapper content-wrapper--loading",
                    p { class: "content-status", "{message}" }
                }
            }
        }
        Panel::Overview { paragraphs } => rsx! {
            OverviewBody { paragraphs }
        },
        Panel::OverviewUnavailable => {
            let message = t!("overview-unavailable", discipline = discipline_name.as_str());
            rsx! {
                div { class: "content-wrapper content-wrapper--error",
                    p { class: "content-status content-status--error", "{message}" }
                }
            }
        }
        Panel::Concept(view) => rsx! {
            ConceptBody { view }
        },
        Panel::ConceptUnavailable => rsx! {
            div { class: "content-wrapper content-wrapper--error",
                p { class: "content-status content-status--error", {t!("concept-unavailable")} }
            }
        },
    }
}

#[component]
pub fn OverviewBody(paragraphs: Vec<String>) -> Element {
    rsx! {
        div { class: "content-wrapper overview-text",
            for (index, line) in paragraphs.iter().enumerate() {
                p { key: "{index}", dangerous_inner_html: "{line}" }
            }
        }
    }
}

#[component]
pub fn ConceptBody(view: ConceptView) -> Element {
    let title = view.title.clone().unwrap_or_else(|| t!("concept-untitled"));

    rsx! {
        div { class: "content-wrapper concept-wrapper",
            h2 { class: "concept-title", "{title}" }
            if let Some(formula) = view.formula.as_ref() {
                div { class: "formula", "{formula}" }
            }
            if let Some(explanation) = view.explanation.as_ref() {
                div { class: "explanation", dangerous_inner_html: "{explanation}" }
            }
            for (section, body) in view.sections.iter() {
                div {
                    key: "{section.field()}",
                    class: "concept-section concept-section--{section.field()}",
                    h3 { class: "concept-section__title", {section_label(*section)} }
                    div { class: "concept-section__body", dangerous_inner_html: "{body}" }
                }
            }
        }
    }
}

fn section_label(section: ConceptSection) -> String {
    match section {
        ConceptSection::CoreIdea => t!("section-core-idea"),
        ConceptSection::RealWorldApplication => t!("section-real-world-application"),
        ConceptSection::MathematicalDemonstration => t!("section-mathematical-demonstration"),
        ConceptSection::StudyPlan => t!("section-study-plan"),
    }
}
