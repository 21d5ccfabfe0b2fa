//! Wire types exchanged with the MathYou backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /api/overview` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewPayload {
    #[serde(default)]
    pub overview: Option<String>,
}

impl OverviewPayload {
    /// Returns the overview text when the backend supplied a non-blank one.
    pub fn text(&self) -> Option<&str> {
        self.overview
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// `GET /api/concept` response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub core_idea: Option<String>,
    #[serde(default)]
    pub real_world_application: Option<String>,
    #[serde(default)]
    pub mathematical_demonstration: Option<String>,
    #[serde(default)]
    pub study_plan: Option<String>,
    /// Question ids attached to the concept by the backend.
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    #[default]
    Numerical,
    MultipleChoice,
    Vector,
    /// Any type tag this client doesn't know; answered like a numerical problem.
    #[serde(other)]
    Unknown,
}

/// A practice problem as served by `/api/question/<id>` and `/api/question/next`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ProblemKind,
    #[serde(rename = "problem", default)]
    pub text: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    /// Correct answer, when the backend chooses to expose it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A learner's answer in the shape the grading endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Text(String),
    Components(Vec<String>),
}

impl Answer {
    /// Compares against the expected answer the way the backend does:
    /// trimmed string equality, element-wise for vectors.
    pub fn matches(&self, expected: &Value) -> bool {
        match (self, expected) {
            (Answer::Components(given), Value::Array(wanted)) => {
                given.len() == wanted.len()
                    && given
                        .iter()
                        .zip(wanted)
                        .all(|(g, w)| g.trim() == value_text(w).trim())
            }
            (Answer::Components(_), _) => false,
            (Answer::Choice(index), other) => index.to_string() == value_text(other).trim(),
            (Answer::Text(text), other) => text.trim() == value_text(other).trim(),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `POST /api/question/submit_answer` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: Answer,
}

/// Grading verdict returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn choice_answer_serializes_as_bare_index() {
        let req = SubmitAnswerRequest {
            question_id: "dot_1".into(),
            answer: Answer::Choice(1),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "question_id": "dot_1", "answer": 1 })
        );
    }

    #[test]
    fn problem_without_type_defaults_to_numerical() {
        let problem: Problem = serde_json::from_value(json!({
            "id": "q7",
            "problem": "What is $2+2$?",
            "difficulty": "Easy"
        }))
        .unwrap();
        assert_eq!(problem.kind, ProblemKind::Numerical);
        assert!(problem.choices.is_empty());
        assert!(problem.answer.is_none());
    }

    #[test]
    fn unknown_problem_type_is_tolerated() {
        let problem: Problem = serde_json::from_value(json!({
            "id": "q8",
            "type": "matrix",
            "problem": "Invert it."
        }))
        .unwrap();
        assert_eq!(problem.kind, ProblemKind::Unknown);
    }

    #[test]
    fn answer_matching_trims_and_compares_elementwise() {
        assert!(Answer::Text(" 4 ".into()).matches(&json!("4")));
        assert!(Answer::Text("4".into()).matches(&json!(4)));
        assert!(Answer::Choice(2).matches(&json!(2)));
        assert!(Answer::Choice(2).matches(&json!("2")));
        assert!(Answer::Components(vec!["1".into(), "0".into(), "-1".into()])
            .matches(&json!(["1", "0", " -1"])));
        assert!(!Answer::Components(vec!["1".into(), "0".into()]).matches(&json!(["1", "0", "0"])));
        assert!(!Answer::Components(vec!["1".into()]).matches(&json!("1")));
    }

    #[test]
    fn blank_overview_has_no_text() {
        let payload = OverviewPayload {
            overview: Some("  \n ".into()),
        };
        assert!(payload.text().is_none());
    }
}
