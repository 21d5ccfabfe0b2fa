//! Login modal state.
//!
//! Hiding always resets: fields cleared, error dropped, back to the form.

use api::{ApiError, LoginRequest, LoginResponse};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The backend answered `success: false`, possibly with a message.
    Rejected(Option<String>),
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Closed,
    Open {
        error: Option<LoginError>,
        submitting: bool,
    },
    Succeeded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginModalState {
    state: LoginState,
    pub form: LoginForm,
    /// Bumped every time the modal is shown.
    showing: u64,
}

impl Default for LoginModalState {
    fn default() -> Self {
        Self {
            state: LoginState::Closed,
            form: LoginForm::default(),
            showing: 0,
        }
    }
}

impl LoginModalState {
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, LoginState::Open { submitting: true, .. })
    }

    pub fn error(&self) -> Option<&LoginError> {
        match &self.state {
            LoginState::Open { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// Identifies the current showing of the modal.
    pub fn showing(&self) -> u64 {
        self.showing
    }

    /// True while the success panel from `showing` is still on screen.
    pub fn should_auto_close(&self, showing: u64) -> bool {
        self.showing == showing && self.state == LoginState::Succeeded
    }

    pub fn open(&mut self) {
        if self.state == LoginState::Closed {
            self.showing += 1;
            self.state = LoginState::Open {
                error: None,
                submitting: false,
            };
        }
    }

    pub fn close(&mut self) {
        self.state = LoginState::Closed;
        self.form = LoginForm::default();
    }

    /// Starts a login attempt. `None` unless the form is showing and idle.
    pub fn begin(&mut self) -> Option<LoginRequest> {
        match self.state {
            LoginState::Open {
                submitting: false, ..
            } => {
                self.state = LoginState::Open {
                    error: None,
                    submitting: true,
                };
                Some(LoginRequest {
                    email: self.form.email.trim().to_string(),
                    password: self.form.password.clone(),
                })
            }
            _ => None,
        }
    }

    /// Applies the backend's answer and reports whether the login succeeded.
    /// A modal hidden mid-request stays hidden.
    pub fn finish(&mut self, result: Result<LoginResponse, ApiError>) -> bool {
        let (succeeded, error) = match result {
            Ok(response) if response.success => (true, None),
            Ok(response) => {
                let message = response.message.filter(|m| !m.trim().is_empty());
                (false, Some(LoginError::Rejected(message)))
            }
            Err(err) => {
                warn!(error = %err, "login request failed");
                (false, Some(LoginError::Transport))
            }
        };

        if self.state == LoginState::Closed {
            return succeeded;
        }
        if succeeded {
            info!("login succeeded");
            self.state = LoginState::Succeeded;
            self.form.password.clear();
        } else {
            self.state = LoginState::Open {
                error,
                submitting: false,
            };
        }
        succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoginModalState {
        let mut modal = LoginModalState::default();
        modal.open();
        modal.form.email = " ada@example.com ".into();
        modal.form.password = "hunter2".into();
        modal
    }

    #[test]
    fn hiding_resets_the_form() {
        let mut modal = filled();
        modal.begin();
        modal.finish(Ok(LoginResponse {
            success: false,
            message: Some("Wrong password".into()),
        }));
        assert!(modal.error().is_some());

        modal.close();
        modal.open();
        assert_eq!(modal.form, LoginForm::default());
        assert_eq!(modal.error(), None);
        assert!(!modal.is_submitting());
    }

    #[test]
    fn begin_trims_email_and_blocks_double_submit() {
        let mut modal = filled();
        let request = modal.begin().unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert!(modal.is_submitting());
        assert_eq!(modal.begin(), None);
    }

    #[test]
    fn rejected_login_keeps_server_message() {
        let mut modal = filled();
        modal.begin();
        let ok = modal.finish(Ok(LoginResponse {
            success: false,
            message: None,
        }));
        assert!(!ok);
        assert_eq!(modal.error(), Some(&LoginError::Rejected(None)));
    }

    #[test]
    fn transport_failure_is_distinguished() {
        let mut modal = filled();
        modal.begin();
        assert!(!modal.finish(Err(ApiError::Missing("body"))));
        assert_eq!(modal.error(), Some(&LoginError::Transport));
    }

    #[test]
    fn success_shows_the_success_panel() {
        let mut modal = filled();
        modal.begin();
        assert!(modal.finish(Ok(LoginResponse {
            success: true,
            message: None,
        })));
        assert_eq!(modal.state(), &LoginState::Succeeded);
        assert!(modal.form.password.is_empty());
    }

    #[test]
    fn auto_close_only_targets_its_own_showing() {
        let mut modal = filled();
        modal.begin();
        assert!(modal.finish(Ok(LoginResponse {
            success: true,
            message: None,
        })));
        let showing = modal.showing();
        assert!(modal.should_auto_close(showing));

        modal.close();
        modal.open();
        assert!(!modal.should_auto_close(showing));
        assert!(matches!(modal.state(), LoginState::Open { .. }));
    }
}
