use api::AuthSource;
use dioxus::prelude::*;

use super::state::{LoginError, LoginModalState, LoginState};
use crate::core::context::{use_api, use_language_marker, LoginPrompt, Session};
use crate::core::platform::dispatch_window_event;
use crate::core::timing::{sleep_ms, LOGIN_SUCCESS_CLOSE_MS};
use crate::t;

/// DOM event broadcast on `window` after a successful login.
pub const LOGIN_SUCCESS_EVENT: &str = "user-login-success";

/// Overlay login form. Shown while the [`LoginPrompt`] in context is open.
#[component]
pub fn LoginModal() -> Element {
    let _lang_marker = use_language_marker();
    let api = use_api();
    let prompt = use_hook(|| {
        try_consume_context::<LoginPrompt>().unwrap_or(LoginPrompt {
            open: Signal::new(false),
        })
    });
    let session = use_hook(try_consume_context::<Session>);
    let mut modal = use_signal(LoginModalState::default);

    use_effect(move || {
        if (prompt.open)() {
            modal.with_mut(|m| m.open());
        } else {
            modal.with_mut(|m| m.close());
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(request) = modal.with_mut(|m| m.begin()) else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            let result = api.login(&request).await;
            let (succeeded, showing) = modal.with_mut(|m| (m.finish(result), m.showing()));
            if !succeeded {
                return;
            }
            dispatch_window_event(LOGIN_SUCCESS_EVENT);
            if let Some(Session { mut logged_in }) = session {
                logged_in.set(true);
            }
            sleep_ms(LOGIN_SUCCESS_CLOSE_MS).await;
            // The user may have closed and reopened the modal meanwhile.
            if modal.peek().should_auto_close(showing) {
                prompt.close();
            }
        });
    };

    if !(prompt.open)() {
        return rsx! {};
    }

    let current = modal.read().clone();
    let body = match current.state() {
        LoginState::Succeeded => rsx! {
            div { class: "login-modal__success",
                h3 { {t!("login-success-title")} }
                p { {t!("login-success-body")} }
            }
        },
        LoginState::Closed | LoginState::Open { .. } => {
            let error = current.error().map(error_message);
            let submitting = current.is_submitting();
            rsx! {
                form { class: "login-modal__form", onsubmit: submit,
                    if let Some(error) = error {
                        p { class: "login-modal__error", role: "alert", "{error}" }
                    }
                    input {
                        r#type: "email",
                        name: "email",
                        class: "login-modal__input",
                        placeholder: t!("login-email-placeholder"),
                        required: true,
                        value: "{current.form.email}",
                        oninput: move |evt: FormEvent| modal.with_mut(|m| m.form.email = evt.value()),
                    }
                    input {
                        r#type: "password",
                        name: "password",
                        class: "login-modal__input",
                        placeholder: t!("login-password-placeholder"),
                        required: true,
                        value: "{current.form.password}",
                        oninput: move |evt: FormEvent| modal.with_mut(|m| m.form.password = evt.value()),
                    }
                    button {
                        r#type: "submit",
                        class: "login-modal__submit",
                        disabled: submitting,
                        {t!("login-submit")}
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "login-modal is-open", onclick: move |_| prompt.close(),
            div {
                class: "login-modal__dialog",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                header { class: "login-modal__header",
                    h2 { class: "login-modal__title", {t!("login-title")} }
                    button {
                        r#type: "button",
                        class: "login-modal__close",
                        aria_label: t!("login-close"),
                        onclick: move |_| prompt.close(),
                        "×"
                    }
                }
                {body}
            }
        }
    }
}

fn error_message(error: &LoginError) -> String {
    match error {
        LoginError::Rejected(Some(message)) => message.clone(),
        LoginError::Rejected(None) => t!("login-failed"),
        LoginError::Transport => t!("login-error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(app: fn() -> Element) -> String {
        crate::i18n::init();
        let _ = crate::i18n::set_language("en-US");
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn hidden_without_an_open_prompt() {
        fn app() -> Element {
            rsx! { LoginModal {} }
        }
        assert!(!render(app).contains("login-modal"));
    }

    #[test]
    fn open_prompt_shows_the_form() {
        fn app() -> Element {
            use_context_provider(|| LoginPrompt {
                open: Signal::new(true),
            });
            rsx! { LoginModal {} }
        }
        let html = render(app);
        assert!(html.contains("Login Required"));
        assert!(html.contains("type=\"password\""));
    }

    #[test]
    fn error_messages_prefer_the_server_text() {
        crate::i18n::init();
        let _ = crate::i18n::set_language("en-US");
        assert_eq!(
            error_message(&LoginError::Rejected(Some("Unknown email".into()))),
            "Unknown email"
        );
        assert_eq!(error_message(&LoginError::Rejected(None)), "Login failed");
        assert_eq!(
            error_message(&LoginError::Transport),
            "An error occurred. Please try again."
        );
    }
}
