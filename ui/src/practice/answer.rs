//! Turning form input into an [`Answer`].

use api::{Answer, ProblemKind};

/// Raw input of one practice problem's form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerDraft {
    pub selected_choice: Option<usize>,
    pub text: String,
    pub components: [String; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no choice selected")]
    NoChoice,
    #[error("answer is empty")]
    Empty,
    #[error("vector component {0} is empty")]
    EmptyComponent(usize),
}

impl AnswerDraft {
    /// Validates the draft for `kind`. Never touches the network.
    pub fn extract(&self, kind: ProblemKind) -> Result<Answer, ValidationError> {
        match kind {
            ProblemKind::MultipleChoice => self
                .selected_choice
                .map(Answer::Choice)
                .ok_or(ValidationError::NoChoice),
            ProblemKind::Vector => {
                let mut parts = Vec::with_capacity(self.components.len());
                for (index, component) in self.components.iter().enumerate() {
                    let trimmed = component.trim();
                    if trimmed.is_empty() {
                        return Err(ValidationError::EmptyComponent(index));
                    }
                    parts.push(trimmed.to_string());
                }
                Ok(Answer::Components(parts))
            }
            ProblemKind::Numerical | ProblemKind::Unknown => {
                let trimmed = self.text.trim();
                if trimmed.is_empty() {
                    Err(ValidationError::Empty)
                } else {
                    Ok(Answer::Text(trimmed.to_string()))
                }
            }
        }
    }
}
