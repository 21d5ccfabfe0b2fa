//! Submission state of a single practice problem.
//!
//! ```text
//! Unanswered --submit--> Submitting --graded--> Answered
//!      ^                     |                     |
//!      +--- unauthorized ----+                     |
//!      +--- other failure ---+                     |
//!      +------------------ try another ------------+
//! ```
//!
//! Every problem swap bumps an epoch; a grading response carrying an older
//! epoch belongs to a problem that is gone and is ignored.

use api::{ApiError, GradeResult, Problem, SubmitAnswerRequest};
use tracing::{debug, warn};

use super::answer::{AnswerDraft, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeState {
    Unanswered,
    Submitting,
    Answered,
}

/// Why a grading request failed. Local validation failures never reach the
/// backend and surface as [`ValidationError`] from [`PracticeMachine::begin_submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("login required")]
    Unauthorized,
    #[error("grading failed: {0}")]
    Network(ApiError),
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            SubmitError::Unauthorized
        } else {
            SubmitError::Network(err)
        }
    }
}

/// What the feedback area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    None,
    Validation,
    Pending,
    Graded {
        correct: bool,
        explanation: Option<String>,
    },
    /// No login modal is mounted; point at the login page instead.
    LoginRequired,
    Failed,
}

/// State of the "Try Another" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    Idle,
    Loading,
    /// Shows the error label until [`PracticeMachine::clear_next_error`].
    Failed,
}

/// A grading call the view should perform.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    pub epoch: u64,
    pub request: SubmitAnswerRequest,
}

/// Follow-up the view owes after a grading response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitEffect {
    None,
    ShowLoginPrompt,
    Typeset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PracticeMachine {
    problem: Problem,
    state: PracticeState,
    feedback: Feedback,
    /// Local verdict computed from the problem's own `answer`, if exposed.
    provisional: Option<bool>,
    epoch: u64,
    next: NextState,
}

impl PracticeMachine {
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            state: PracticeState::Unanswered,
            feedback: Feedback::None,
            provisional: None,
            epoch: 0,
            next: NextState::Idle,
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn state(&self) -> PracticeState {
        self.state
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn provisional(&self) -> Option<bool> {
        self.provisional
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn next_state(&self) -> NextState {
        self.next
    }

    pub fn can_submit(&self) -> bool {
        self.state == PracticeState::Unanswered
    }

    /// Validates `draft` and moves to Submitting. A validation failure stays
    /// Unanswered and shows the local message. Returns `Ok(None)` while a
    /// submission is already outstanding or the problem is answered.
    pub fn begin_submit(
        &mut self,
        draft: &AnswerDraft,
    ) -> Result<Option<PendingSubmit>, ValidationError> {
        if !self.can_submit() {
            return Ok(None);
        }
        let answer = match draft.extract(self.problem.kind) {
            Ok(answer) => answer,
            Err(err) => {
                self.feedback = Feedback::Validation;
                self.provisional = None;
                return Err(err);
            }
        };

        self.provisional = self
            .problem
            .answer
            .as_ref()
            .map(|expected| answer.matches(expected));
        self.state = PracticeState::Submitting;
        self.feedback = Feedback::Pending;
        debug!(question = %self.problem.id, epoch = self.epoch, "submitting answer");

        Ok(Some(PendingSubmit {
            epoch: self.epoch,
            request: SubmitAnswerRequest {
                question_id: self.problem.id.clone(),
                answer,
            },
        }))
    }

    /// Applies the grading response for the submission started at `epoch`.
    pub fn finish_submit(
        &mut self,
        epoch: u64,
        result: Result<GradeResult, ApiError>,
        login_prompt_available: bool,
    ) -> SubmitEffect {
        if epoch != self.epoch || self.state != PracticeState::Submitting {
            debug!(question = %self.problem.id, epoch, "discarding grade for replaced problem");
            return SubmitEffect::None;
        }

        match result.map_err(SubmitError::from) {
            Ok(grade) => {
                self.state = PracticeState::Answered;
                self.provisional = None;
                self.feedback = Feedback::Graded {
                    correct: grade.correct,
                    explanation: grade.explanation.filter(|e| !e.trim().is_empty()),
                };
                SubmitEffect::Typeset
            }
            Err(SubmitError::Unauthorized) => {
                self.state = PracticeState::Unanswered;
                self.provisional = None;
                if login_prompt_available {
                    self.feedback = Feedback::None;
                    SubmitEffect::ShowLoginPrompt
                } else {
                    self.feedback = Feedback::LoginRequired;
                    SubmitEffect::None
                }
            }
            Err(err) => {
                warn!(question = %self.problem.id, error = %err, "submit failed");
                self.state = PracticeState::Unanswered;
                self.provisional = None;
                self.feedback = Feedback::Failed;
                SubmitEffect::None
            }
        }
    }

    /// Starts fetching the next problem. Returns the id to ask about, or
    /// `None` when a fetch is already running.
    pub fn begin_next(&mut self) -> Option<String> {
        if self.next == NextState::Loading {
            return None;
        }
        self.next = NextState::Loading;
        Some(self.problem.id.clone())
    }

    /// Swaps in the fetched problem, or flags the error label. Returns
    /// whether the problem changed.
    pub fn finish_next(&mut self, result: Result<Problem, ApiError>) -> bool {
        match result {
            Ok(problem) => {
                self.replace_problem(problem);
                true
            }
            Err(err) => {
                warn!(question = %self.problem.id, error = %err, "next question unavailable");
                self.next = NextState::Failed;
                false
            }
        }
    }

    pub fn clear_next_error(&mut self) {
        if self.next == NextState::Failed {
            self.next = NextState::Idle;
        }
    }

    pub fn replace_problem(&mut self, problem: Problem) {
        self.problem = problem;
        self.state = PracticeState::Unanswered;
        self.feedback = Feedback::None;
        self.provisional = None;
        self.next = NextState::Idle;
        self.epoch += 1;
    }
}
