use api::{Problem, ProblemKind, QuestionSource};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::answer::AnswerDraft;
use super::machine::{Feedback, NextState, PracticeMachine, PracticeState, SubmitEffect};
use crate::components::Remount;
use crate::core::context::{use_api, use_language_marker, use_login_prompt, use_math_renderer};
use crate::core::timing::{sleep_ms, NEXT_QUESTION_ERROR_MS};
use crate::core::typeset::PROBLEM_DELIMITERS;
use crate::t;

const VECTOR_AXES: [&str; 3] = ["x", "y", "z"];

/// One [`PracticeProblem`] per question id, in order. Ids that fail to load
/// are logged and left out.
#[component]
pub fn PracticeProblemList(question_ids: Vec<String>) -> Element {
    rsx! {
        div { class: "practice-list",
            for question_id in question_ids.into_iter() {
                PracticeProblemSlot { key: "{question_id}", question_id: question_id.clone() }
            }
        }
    }
}

#[component]
fn PracticeProblemSlot(question_id: String) -> Element {
    let api = use_api();
    let problem = use_resource(move || {
        let api = api.clone();
        let question_id = question_id.clone();
        async move {
            api.fetch_question(&question_id)
                .await
                .inspect_err(|err| warn!(%question_id, error = %err, "skipping practice problem"))
        }
    });

    match &*problem.read_unchecked() {
        Some(Ok(problem)) => rsx! {
            PracticeProblem { problem: problem.clone() }
        },
        Some(Err(_)) => rsx! {},
        None => rsx! {
            div { class: "practice-problem practice-problem--loading" }
        },
    }
}

enum PracticeAction {
    Submit,
    TryAnother,
}

/// Interactive practice problem: answer form, grading feedback and
/// "Try Another".
#[component]
pub fn PracticeProblem(problem: Problem) -> Element {
    let _lang_marker = use_language_marker();
    let api = use_api();
    let renderer = use_math_renderer();
    let login_prompt = use_login_prompt();
    let card_id = use_hook(|| format!("practice-{}", Uuid::new_v4().simple()));

    let mut machine = use_signal(|| PracticeMachine::new(problem.clone()));
    let mut draft = use_signal(AnswerDraft::default);
    let mut typeset_requests = use_signal(|| 0u64);

    let actions = use_coroutine(move |mut rx: UnboundedReceiver<PracticeAction>| {
        let api = api.clone();
        async move {
            while let Some(action) = rx.next().await {
                match action {
                    PracticeAction::Submit => {
                        let begun = machine.with_mut(|m| m.begin_submit(&draft.peek()));
                        let pending = match begun {
                            Ok(Some(pending)) => pending,
                            Ok(None) => continue,
                            Err(err) => {
                                debug!(error = %err, "answer rejected locally");
                                continue;
                            }
                        };
                        let api = api.clone();
                        spawn(async move {
                            let result = api.submit_answer(&pending.request).await;
                            let effect = machine.with_mut(|m| {
                                m.finish_submit(pending.epoch, result, login_prompt.is_some())
                            });
                            match effect {
                                SubmitEffect::ShowLoginPrompt => {
                                    if let Some(prompt) = login_prompt {
                                        prompt.open();
                                    }
                                }
                                SubmitEffect::Typeset => typeset_requests += 1,
                                SubmitEffect::None => {}
                            }
                        });
                    }
                    PracticeAction::TryAnother => {
                        let Some(current_id) = machine.with_mut(|m| m.begin_next()) else {
                            continue;
                        };
                        let api = api.clone();
                        spawn(async move {
                            let result = api.fetch_next_question(&current_id).await;
                            if machine.with_mut(|m| m.finish_next(result)) {
                                draft.set(AnswerDraft::default());
                            } else {
                                sleep_ms(NEXT_QUESTION_ERROR_MS).await;
                                machine.with_mut(|m| m.clear_next_error());
                            }
                        });
                    }
                }
            }
        }
    });

    let epoch = use_memo(move || machine.read().epoch());
    {
        let card_id = card_id.clone();
        use_effect(move || {
            let problem_epoch = epoch();
            let requests = typeset_requests();
            let Some(renderer) = renderer.clone() else {
                return;
            };
            let card_id = card_id.clone();
            spawn(async move {
                let outcome = renderer.typeset(&card_id, PROBLEM_DELIMITERS).await;
                tracing::trace!(problem_epoch, requests, ?outcome, "typeset practice problem");
            });
        });
    }

    let current = machine.read().clone();
    let problem = current.problem();
    let submitting = current.state() == PracticeState::Submitting;
    let answered = current.state() == PracticeState::Answered;
    let submit_label = if submitting {
        t!("practice-checking")
    } else {
        t!("practice-submit")
    };
    let next_label = match current.next_state() {
        NextState::Idle => t!("practice-try-another"),
        NextState::Loading => t!("practice-loading-next"),
        NextState::Failed => t!("practice-next-error"),
    };
    let difficulty = problem
        .difficulty
        .as_deref()
        .map(|level| t!("practice-difficulty", level = level));

    rsx! {
        article { id: "{card_id}", class: "practice-problem", "data-question": "{problem.id}",
            header { class: "practice-problem__header",
                h4 { class: "practice-problem__title", {t!("practice-title")} }
                if let Some(difficulty) = difficulty {
                    span { class: "practice-problem__difficulty", "{difficulty}" }
                }
            }
            Remount { epoch: current.epoch(), class: "practice-problem__body",
                p { class: "practice-problem__text", dangerous_inner_html: "{problem.text}" }
                {answer_inputs(problem, &card_id, draft, actions)}
            }

            div { class: "practice-problem__actions",
                button {
                    r#type: "button",
                    class: "practice-problem__submit",
                    disabled: !current.can_submit(),
                    onclick: move |_| actions.send(PracticeAction::Submit),
                    "{submit_label}"
                }
                if answered {
                    button {
                        r#type: "button",
                        class: "practice-problem__next",
                        disabled: current.next_state() != NextState::Idle,
                        onclick: move |_| actions.send(PracticeAction::TryAnother),
                        "{next_label}"
                    }
                }
            }

            FeedbackArea { feedback: current.feedback().clone(), provisional: current.provisional() }
        }
    }
}

fn answer_inputs(
    problem: &Problem,
    card_id: &str,
    mut draft: Signal<AnswerDraft>,
    actions: Coroutine<PracticeAction>,
) -> Element {
    match problem.kind {
        ProblemKind::MultipleChoice => {
            let group = format!("{card_id}-choice");
            let selected = draft.read().selected_choice;
            rsx! {
                div { class: "practice-problem__choices", role: "radiogroup",
                    for (index, choice) in problem.choices.iter().enumerate() {
                        label {
                            key: "{index}",
                            class: "practice-problem__choice",
                            r#for: "{group}-{index}",
                            input {
                                r#type: "radio",
                                id: "{group}-{index}",
                                name: "{group}",
                                value: "{index}",
                                checked: selected == Some(index),
                                onchange: move |_| draft.with_mut(|d| d.selected_choice = Some(index)),
                            }
                            span { class: "practice-problem__choice-text", dangerous_inner_html: "{choice}" }
                        }
                    }
                }
            }
        }
        ProblemKind::Vector => {
            let components = draft.read().components.clone();
            rsx! {
                div { class: "practice-problem__vector",
                    for (index, (axis, value)) in VECTOR_AXES.iter().zip(components).enumerate() {
                        input {
                            key: "{axis}",
                            r#type: "text",
                            class: "practice-problem__component",
                            placeholder: "{axis}",
                            aria_label: "{axis}",
                            value: "{value}",
                            oninput: move |evt: FormEvent| {
                                draft.with_mut(|d| d.components[index] = evt.value())
                            },
                        }
                    }
                }
            }
        }
        ProblemKind::Numerical | ProblemKind::Unknown => {
            let text = draft.read().text.clone();
            let placeholder = t!("practice-answer-placeholder");
            rsx! {
                input {
                    r#type: "text",
                    class: "practice-problem__answer",
                    placeholder: "{placeholder}",
                    value: "{text}",
                    oninput: move |evt: FormEvent| draft.with_mut(|d| d.text = evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            actions.send(PracticeAction::Submit);
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn FeedbackArea(feedback: Feedback, #[props(!optional)] provisional: Option<bool>) -> Element {
    match feedback {
        Feedback::None => rsx! {
            div { class: "practice-feedback", aria_live: "polite" }
        },
        Feedback::Validation => rsx! {
            div { class: "practice-feedback practice-feedback--error", aria_live: "polite",
                {t!("practice-validation")}
            }
        },
        Feedback::Pending => {
            let hint = match provisional {
                Some(true) => Some(("practice-feedback__hint--right", t!("practice-provisional-right"))),
                Some(false) => Some(("practice-feedback__hint--wrong", t!("practice-provisional-wrong"))),
                None => None,
            };
            rsx! {
                div { class: "practice-feedback practice-feedback--pending", aria_live: "polite",
                    if let Some((modifier, text)) = hint {
                        p { class: "practice-feedback__hint {modifier}", "{text}" }
                        p { class: "practice-feedback__wait", {t!("practice-provisional-wait")} }
                    } else {
                        p { class: "practice-feedback__wait", {t!("practice-pending")} }
                    }
                }
            }
        }
        Feedback::Graded { correct, explanation } => {
            let (class, verdict) = if correct {
                ("practice-feedback practice-feedback--correct", t!("practice-correct"))
            } else {
                ("practice-feedback practice-feedback--incorrect", t!("practice-incorrect"))
            };
            rsx! {
                div { class: "{class}", aria_live: "polite",
                    strong { class: "practice-feedback__verdict", "{verdict}" }
                    if let Some(explanation) = explanation {
                        div { class: "practice-feedback__explanation", dangerous_inner_html: "{explanation}" }
                    }
                }
            }
        }
        Feedback::LoginRequired => rsx! {
            div { class: "practice-feedback practice-feedback--error", aria_live: "polite",
                span { {t!("practice-login-required")} }
                " "
                a { href: "/login", class: "practice-feedback__login", {t!("practice-login-link")} }
            }
        },
        Feedback::Failed => rsx! {
            div { class: "practice-feedback practice-feedback--error", aria_live: "polite",
                {t!("practice-submit-failed")}
            }
        },
    }
}
